use super::*;

#[test]
fn test_empty_object_uses_defaults() {
    let config = ResolverConfig::from_json_str("{}").expect("valid config");
    assert_eq!(config, ResolverConfig::default());
    assert_eq!(config.solvers, vec![SolverEntry::Runtime { jre_only: false }]);
    assert_eq!(config.facade_options(), FacadeOptions::default());
}

#[test]
fn test_solver_entries_keep_their_order() {
    let config = ResolverConfig::from_json_str(
        r#"{
            "solvers": [
                { "kind": "classPath", "directories": ["out/a", "out/b"] },
                { "kind": "runtime", "jreOnly": true }
            ],
            "cache": false,
            "skipConfigurationErrors": true
        }"#,
    )
    .expect("valid config");
    assert_eq!(
        config.solvers,
        vec![
            SolverEntry::ClassPath {
                directories: vec![PathBuf::from("out/a"), PathBuf::from("out/b")],
            },
            SolverEntry::Runtime { jre_only: true },
        ]
    );
    assert!(!config.cache);
    assert!(config.skip_configuration_errors);
    assert!(!config.facade_options().cache);
}

#[test]
fn test_partial_limits_fall_back_to_defaults() {
    let config = ResolverConfig::from_json_str(r#"{ "limits": { "maxQueryDepth": 16 } }"#)
        .expect("valid config");
    let limits = config.facade_options().limits;
    assert_eq!(limits.max_query_depth, 16);
    assert_eq!(limits.max_expr_depth, QueryLimits::default().max_expr_depth);
}

#[test]
fn test_unknown_fields_and_kinds_are_configuration_errors() {
    for source in [
        r#"{ "caching": true }"#,
        r#"{ "solvers": [{ "kind": "maven" }] }"#,
        r#"{ "solvers": [{ "kind": "runtime", "jdk": 21 }] }"#,
        r#"{ "limits": { "depth": 3 } }"#,
        "not json",
    ] {
        let err = ResolverConfig::from_json_str(source).expect_err(source);
        assert_eq!(err.code(), "configuration", "{source}: {err}");
    }
}

#[test]
fn test_from_path_reads_and_reports_the_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("jsolve.json");
    std::fs::write(&path, r#"{ "cache": false }"#).expect("write config");
    assert!(!ResolverConfig::from_path(&path).expect("valid config").cache);

    let missing = dir.path().join("absent.json");
    let err = ResolverConfig::from_path(&missing).expect_err("no such file");
    match err {
        ResolveError::Configuration { source_name, .. } => {
            assert!(source_name.ends_with("absent.json"), "{source_name}");
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}
