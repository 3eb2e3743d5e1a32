//! Explicitly registered declarations.

use super::{ParentLink, TypeSolver};
use crate::declarations::TypeDeclaration;
use crate::symbol_reference::SymbolReference;
use dashmap::DashMap;
use jsolve_common::ResolveResult;
use std::sync::{Arc, Weak};

#[derive(Debug, Default)]
pub struct MemoryTypeSolver {
    declarations: DashMap<Arc<str>, Arc<TypeDeclaration>>,
    parent: ParentLink,
}

impl MemoryTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl` under its qualified name, replacing an earlier one.
    pub fn register(&self, decl: TypeDeclaration) -> Arc<TypeDeclaration> {
        let decl = Arc::new(decl);
        self.declarations
            .insert(decl.qualified_name.clone(), decl.clone());
        decl
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl TypeSolver for MemoryTypeSolver {
    fn label(&self) -> &str {
        "memory"
    }

    fn try_to_solve_type(&self, name: &str) -> ResolveResult<SymbolReference<Arc<TypeDeclaration>>> {
        Ok(self
            .declarations
            .get(name)
            .map(|entry| entry.value().clone())
            .into())
    }

    fn has_type(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    fn parent(&self) -> Option<Arc<dyn TypeSolver>> {
        self.parent.get()
    }

    fn set_parent(&self, parent: Weak<dyn TypeSolver>) -> ResolveResult<()> {
        self.parent.set(self.label(), parent)
    }
}
