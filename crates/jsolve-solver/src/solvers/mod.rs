//! The `TypeSolver` capability and its providers.
//!
//! A solver answers "which declaration does this qualified name denote".
//! Providers are composed explicitly by the embedder through
//! [`CombinedTypeSolver`]; each child gets a non-owning pointer to its
//! parent so that lookups started inside one provider (e.g. qualifying a
//! name while building a source declaration) can consult the whole chain.

use crate::declarations::TypeDeclaration;
use crate::symbol_reference::SymbolReference;
use jsolve_common::{ResolveError, ResolveResult, SourceLocation};
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

mod class_file;
mod class_reader;
mod combined;
pub mod jvm;
mod memory;
mod runtime;
mod source;
mod source_builder;

pub use class_file::ClassFileTypeSolver;
pub use class_reader::{ClassFileReader, parse_class_file};
pub use combined::{CombinedTypeSolver, ExceptionHandler};
pub use memory::MemoryTypeSolver;
pub use runtime::RuntimeTypeSolver;
pub use source::{SourceTypeSolver, qualified_name_of};
pub use source_builder::{TypeNameQualifier, binary_name_of};

pub trait TypeSolver: Send + Sync + fmt::Debug {
    /// Short label used in logs and configuration errors.
    fn label(&self) -> &str;

    /// Look up a type by qualified name (`java.util.Map.Entry`).
    ///
    /// Not finding the name is `Ok(Unsolved)`; an error means the provider
    /// found something it could not turn into a declaration.
    fn try_to_solve_type(&self, name: &str) -> ResolveResult<SymbolReference<Arc<TypeDeclaration>>>;

    /// Existence check that never builds a declaration.
    fn has_type(&self, name: &str) -> bool;

    fn parent(&self) -> Option<Arc<dyn TypeSolver>>;

    /// Attach the parent. Setting a parent twice is a configuration error.
    fn set_parent(&self, parent: Weak<dyn TypeSolver>) -> ResolveResult<()>;

    /// Demand a type: `Unsolved` becomes [`ResolveError::UnsolvedSymbol`].
    fn solve_type(&self, name: &str) -> ResolveResult<Arc<TypeDeclaration>> {
        self.try_to_solve_type(name)?
            .require(name, SourceLocation::unknown())
    }
}

/// The topmost solver reachable from `solver`.
pub fn root(solver: &Arc<dyn TypeSolver>) -> Arc<dyn TypeSolver> {
    let mut current = solver.clone();
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
}

/// Run `f` against the root of `solver`'s chain, or `solver` itself when it
/// has no parent.
pub fn with_root<R>(solver: &dyn TypeSolver, f: impl FnOnce(&dyn TypeSolver) -> R) -> R {
    match solver.parent() {
        Some(parent) => {
            let top = root(&parent);
            f(top.as_ref())
        }
        None => f(solver),
    }
}

/// Write-once parent pointer shared by all providers.
#[derive(Default)]
pub(crate) struct ParentLink {
    parent: OnceLock<Weak<dyn TypeSolver>>,
}

impl ParentLink {
    pub(crate) fn get(&self) -> Option<Arc<dyn TypeSolver>> {
        self.parent.get().and_then(Weak::upgrade)
    }

    pub(crate) fn set(&self, label: &str, parent: Weak<dyn TypeSolver>) -> ResolveResult<()> {
        self.parent
            .set(parent)
            .map_err(|_| ResolveError::configuration(label.to_string(), "parent already set"))
    }
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.parent.get().is_some() {
            "ParentLink(set)"
        } else {
            "ParentLink(unset)"
        })
    }
}

#[cfg(test)]
#[path = "../../tests/solver_chain_tests.rs"]
mod tests;
