//! Ordered composition of type solvers.

use super::{ParentLink, TypeSolver};
use crate::declarations::TypeDeclaration;
use crate::symbol_reference::SymbolReference;
use jsolve_common::{ResolveError, ResolveResult};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// What to do when a child fails a lookup with an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExceptionHandler {
    /// Return the child's error to the caller.
    #[default]
    Propagate,
    /// Log configuration faults and continue with the next child; other
    /// errors still propagate.
    SkipConfigurationErrors,
}

impl ExceptionHandler {
    fn skips(self, error: &ResolveError) -> bool {
        match self {
            Self::Propagate => false,
            Self::SkipConfigurationErrors => matches!(error, ResolveError::Configuration { .. }),
        }
    }
}

/// Children are consulted in order; the first `Solved` wins.
#[derive(Debug)]
pub struct CombinedTypeSolver {
    children: Vec<Arc<dyn TypeSolver>>,
    handler: ExceptionHandler,
    parent: ParentLink,
}

impl CombinedTypeSolver {
    pub fn new(children: Vec<Arc<dyn TypeSolver>>) -> ResolveResult<Arc<Self>> {
        Self::with_handler(children, ExceptionHandler::default())
    }

    /// Build the composition and attach it as the parent of every child.
    pub fn with_handler(
        children: Vec<Arc<dyn TypeSolver>>,
        handler: ExceptionHandler,
    ) -> ResolveResult<Arc<Self>> {
        let combined = Arc::new(Self {
            children,
            handler,
            parent: ParentLink::default(),
        });
        let weak: Weak<dyn TypeSolver> = Arc::downgrade(&combined) as Weak<dyn TypeSolver>;
        for child in &combined.children {
            child.set_parent(weak.clone())?;
        }
        Ok(combined)
    }

    pub fn children(&self) -> &[Arc<dyn TypeSolver>] {
        &self.children
    }

    pub fn handler(&self) -> ExceptionHandler {
        self.handler
    }
}

impl TypeSolver for CombinedTypeSolver {
    fn label(&self) -> &str {
        "combined"
    }

    fn try_to_solve_type(&self, name: &str) -> ResolveResult<SymbolReference<Arc<TypeDeclaration>>> {
        for child in &self.children {
            match child.try_to_solve_type(name) {
                Ok(SymbolReference::Solved(decl)) => {
                    debug!(name, solver = child.label(), "type solved");
                    return Ok(SymbolReference::Solved(decl));
                }
                Ok(SymbolReference::Unsolved) => {}
                Err(error) if self.handler.skips(&error) => {
                    warn!(name, solver = child.label(), %error, "skipping failing solver");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(SymbolReference::Unsolved)
    }

    fn has_type(&self, name: &str) -> bool {
        self.children.iter().any(|child| child.has_type(name))
    }

    fn parent(&self) -> Option<Arc<dyn TypeSolver>> {
        self.parent.get()
    }

    fn set_parent(&self, parent: Weak<dyn TypeSolver>) -> ResolveResult<()> {
        self.parent.set(self.label(), parent)
    }
}
