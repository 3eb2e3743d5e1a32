//! Declarations built from parsed source units.

use super::source_builder::build_source_declaration;
use super::{ParentLink, TypeSolver, with_root};
use crate::declarations::TypeDeclaration;
use crate::symbol_reference::SymbolReference;
use dashmap::DashMap;
use jsolve_common::ResolveResult;
use jsolve_syntax::{FileId, NodeIndex, NodeRef, SourceUnit, SyntaxKind};
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, trace};

/// Qualified and binary name of the type declared at `node`, or `None`
/// when `node` is not a type declaration reachable from the compilation
/// unit through type declarations only (local and anonymous classes).
pub fn qualified_name_of(unit: &SourceUnit, node: NodeIndex) -> Option<(Arc<str>, Arc<str>)> {
    let arena = unit.arena();
    let navigator = unit.navigator();
    let mut names = Vec::new();
    let mut current = node;
    loop {
        let kind = arena.kind_of(current)?;
        if !kind.is_type_declaration() {
            return None;
        }
        names.push(arena.name_of(current)?);
        match navigator.parent(current) {
            Some(parent) if arena.is_kind(parent, SyntaxKind::CompilationUnit) => break,
            Some(parent) => current = parent,
            None => break,
        }
    }
    names.reverse();
    let prefix = unit
        .package_name()
        .map(|package| format!("{package}."))
        .unwrap_or_default();
    Some((
        format!("{prefix}{}", names.join(".")).into(),
        format!("{prefix}{}", names.join("$")).into(),
    ))
}

#[derive(Clone, Debug)]
struct IndexEntry {
    unit: usize,
    node: NodeIndex,
    binary: Arc<str>,
}

#[derive(Debug)]
pub struct SourceTypeSolver {
    units: Vec<Arc<SourceUnit>>,
    index: OnceLock<FxHashMap<Arc<str>, IndexEntry>>,
    cache: DashMap<Arc<str>, Arc<TypeDeclaration>>,
    parent: ParentLink,
}

impl SourceTypeSolver {
    pub fn new(units: Vec<Arc<SourceUnit>>) -> Self {
        Self {
            units,
            index: OnceLock::new(),
            cache: DashMap::new(),
            parent: ParentLink::default(),
        }
    }

    pub fn units(&self) -> &[Arc<SourceUnit>] {
        &self.units
    }

    pub fn unit(&self, file: FileId) -> Option<&Arc<SourceUnit>> {
        self.units.iter().find(|unit| unit.id() == file)
    }

    /// The declaration node of the source type `name`.
    pub fn type_node_of(&self, name: &str) -> Option<NodeRef> {
        let entry = self.index().get(name)?;
        Some(self.units[entry.unit].node_ref(entry.node))
    }

    fn index(&self) -> &FxHashMap<Arc<str>, IndexEntry> {
        self.index.get_or_init(|| {
            let mut index = FxHashMap::default();
            for (position, unit) in self.units.iter().enumerate() {
                let mut pending: Vec<NodeIndex> = unit.types().iter().collect();
                while let Some(node) = pending.pop() {
                    pending.extend(unit.navigator().member_types(node));
                    let Some((qualified, binary)) = qualified_name_of(unit, node) else {
                        continue;
                    };
                    if index.contains_key(&qualified) {
                        debug!(name = %qualified, path = %unit.path(), "duplicate source type ignored");
                        continue;
                    }
                    index.insert(
                        qualified,
                        IndexEntry {
                            unit: position,
                            node,
                            binary,
                        },
                    );
                }
            }
            debug!(units = self.units.len(), types = index.len(), "indexed source types");
            index
        })
    }
}

impl TypeSolver for SourceTypeSolver {
    fn label(&self) -> &str {
        "source"
    }

    fn try_to_solve_type(&self, name: &str) -> ResolveResult<SymbolReference<Arc<TypeDeclaration>>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(SymbolReference::Solved(cached.value().clone()));
        }
        let Some((qualified, entry)) = self.index().get_key_value(name) else {
            return Ok(SymbolReference::Unsolved);
        };
        let unit = &self.units[entry.unit];
        let decl = with_root(self, |root| {
            build_source_declaration(
                root,
                unit,
                entry.node,
                qualified.clone(),
                entry.binary.clone(),
            )
        })?;
        trace!(name, path = %unit.path(), "solved from source");
        let stored = self
            .cache
            .entry(qualified.clone())
            .or_insert_with(|| Arc::new(decl))
            .value()
            .clone();
        Ok(SymbolReference::Solved(stored))
    }

    fn has_type(&self, name: &str) -> bool {
        self.index().contains_key(name)
    }

    fn parent(&self) -> Option<Arc<dyn TypeSolver>> {
        self.parent.get()
    }

    fn set_parent(&self, parent: Weak<dyn TypeSolver>) -> ResolveResult<()> {
        self.parent.set(self.label(), parent)
    }
}
