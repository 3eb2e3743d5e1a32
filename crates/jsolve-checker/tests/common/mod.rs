//! Shared fixtures for the facade integration tests.
#![allow(dead_code)]

use jsolve_checker::{FacadeOptions, ResolutionFacade};
use jsolve_solver::{CombinedTypeSolver, RuntimeTypeSolver, SourceTypeSolver, TypeSolver};
use jsolve_syntax::{NodeIndex, SourceUnit, TreeBuilder};
use std::sync::Arc;

/// Route resolver logs to the test harness when `JSOLVE_LOG` is set.
pub fn init_test_logging() {
    if std::env::var_os("JSOLVE_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_env("JSOLVE_LOG"))
            .with_test_writer()
            .try_init();
    }
}

/// A facade over `[source(units), runtime]`.
pub fn facade(units: &[Arc<SourceUnit>]) -> ResolutionFacade {
    facade_with(units, FacadeOptions::default())
}

pub fn facade_with(units: &[Arc<SourceUnit>], options: FacadeOptions) -> ResolutionFacade {
    init_test_logging();
    let source: Arc<dyn TypeSolver> = Arc::new(SourceTypeSolver::new(units.to_vec()));
    let runtime: Arc<dyn TypeSolver> = Arc::new(RuntimeTypeSolver::new().expect("runtime catalog"));
    let chain = CombinedTypeSolver::new(vec![source, runtime]).expect("solver chain");
    ResolutionFacade::with_options(chain as Arc<dyn TypeSolver>, options)
}

/// Wrap `members` in `package demo; <imports> public class <name> { ... }`.
pub fn unit_with_class(
    mut b: TreeBuilder,
    imports: &[(&str, bool)],
    name: &str,
    members: Vec<NodeIndex>,
) -> Arc<SourceUnit> {
    let imports: Vec<NodeIndex> = imports
        .iter()
        .map(|(path, is_static)| b.import(path, *is_static))
        .collect();
    let class = b.class(name, members);
    let root = b.compilation_unit(Some("demo"), imports, vec![class]);
    Arc::new(b.finish(format!("demo/{name}.java"), root))
}

/// `public void <name>() { <statements> }`
pub fn void_method(b: &mut TreeBuilder, name: &str, parameters: Vec<NodeIndex>, statements: Vec<NodeIndex>) -> NodeIndex {
    let body = b.block(statements);
    let void = b.void_type();
    b.method(void, name, parameters, body)
}
