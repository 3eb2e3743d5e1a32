use super::*;
use crate::position::Position;

#[test]
fn test_unsolved_symbol_message_includes_location() {
    let err = ResolveError::unsolved("foo", SourceLocation::new("A.java", Position::new(0, 4)));
    assert_eq!(err.to_string(), "unsolved symbol `foo` at A.java:1:5");
    assert!(err.is_unsolved());
    assert_eq!(err.code(), "unsolved-symbol");
}

#[test]
fn test_ambiguous_overload_lists_candidates() {
    let err = ResolveError::AmbiguousOverload {
        name: "m".into(),
        candidates: vec!["A.m(int, long)".to_string(), "A.m(long, int)".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "ambiguous call to `m`, candidates: A.m(int, long); A.m(long, int)"
    );
    assert!(err.location().is_none());
}

#[test]
fn test_errors_are_cloneable_and_comparable() {
    let err = ResolveError::cyclic("A -> B -> A");
    assert_eq!(err.clone(), err);
    assert_eq!(err.code(), "cyclic-resolution");
}

#[test]
fn test_configuration_error_message() {
    let err = ResolveError::configuration("classpath", "directory /nope does not exist");
    assert_eq!(
        err.to_string(),
        "configuration error in classpath: directory /nope does not exist"
    );
}
