//! jsolve: symbol and type resolution for Java syntax trees.
//!
//! The member crates do the work; this crate re-exports their public
//! surface and adds configuration-driven solver assembly.
//!
//! ```no_run
//! use jsolve::{ResolverConfig, SymbolResolver, facade_for};
//! # fn run(unit: std::sync::Arc<jsolve::SourceUnit>, call: jsolve::NodeIndex) -> jsolve::ResolveResult<()> {
//! let config = ResolverConfig::from_json_str(r#"{ "solvers": [{ "kind": "runtime" }] }"#)?;
//! let facade = facade_for(&config, vec![unit.clone()])?;
//! let declaration = facade.resolve_declaration(&unit, call)?;
//! println!("{}", declaration.qualified_signature());
//! # Ok(())
//! # }
//! ```

// Shared positions, errors and diagnostics
pub use jsolve_common::{
    Diagnostic, DiagnosticCategory, LineMap, PrimitiveKind, ResolveError, ResolveResult,
    SourceLocation,
};

// Syntax trees
pub use jsolve_syntax::{NodeArena, NodeIndex, SourceUnit, SyntaxKind, TreeBuilder};

// Declaration and type model, type solvers
pub use jsolve_solver::{
    ClassFileTypeSolver, CombinedTypeSolver, ConstructorDeclaration, ExceptionHandler,
    FieldDeclaration, MemoryTypeSolver, MethodDeclaration, MethodUsage, ReferenceType,
    ResolvedDeclaration, ResolvedType, RuntimeTypeSolver, SourceTypeSolver, SymbolReference,
    TypeDeclaration, TypeSolver,
};

// Resolution facade
pub use jsolve_checker::{
    CacheStats, FacadeOptions, QueryLimits, ResolutionCache, ResolutionFacade, SymbolResolver,
};

pub mod config;
pub use config::{LimitsConfig, ResolverConfig, SolverEntry};

pub mod assembly;
pub use assembly::{SolverAssembly, facade_for};

pub mod tracing_config;
pub use tracing_config::init_tracing;
