//! Parsed compilation units.

use crate::base::{NodeIndex, NodeList};
use crate::navigator::Navigator;
use crate::node::{ImportData, NodeArena};
use jsolve_common::{LineMap, SourceLocation};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Global counter for assigning unique file identifiers.
static NEXT_FILE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one source unit for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    pub fn next() -> Self {
        Self(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node in a specific source unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub file: FileId,
    pub node: NodeIndex,
}

/// One parsed compilation unit.
#[derive(Debug)]
pub struct SourceUnit {
    id: FileId,
    path: Arc<str>,
    arena: NodeArena,
    root: NodeIndex,
    line_map: LineMap,
}

impl SourceUnit {
    pub fn new(path: impl Into<Arc<str>>, arena: NodeArena, root: NodeIndex) -> Self {
        Self {
            id: FileId::next(),
            path: path.into(),
            arena,
            root,
            line_map: LineMap::default(),
        }
    }

    /// Attach the source text so that locations render real lines.
    pub fn with_text(mut self, text: &str) -> Self {
        self.line_map = LineMap::build(text);
        self
    }

    #[inline]
    pub fn id(&self) -> FileId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &Arc<str> {
        &self.path
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.arena)
    }

    pub fn node_ref(&self, node: NodeIndex) -> NodeRef {
        NodeRef {
            file: self.id,
            node,
        }
    }

    /// `path:line:col` of the start of `node`.
    pub fn location_of(&self, node: NodeIndex) -> SourceLocation {
        let pos = self.arena.get(node).map(|n| n.pos).unwrap_or(0);
        SourceLocation::new(self.path.clone(), self.line_map.position_of(pos))
    }

    /// Declared package, `None` for the default package.
    pub fn package_name(&self) -> Option<&str> {
        let unit = self.arena.get(self.root).and_then(|n| self.arena.get_compilation_unit(n))?;
        let package = self.arena.get(unit.package)?;
        self.arena.get_package(package).map(|p| p.name.as_str())
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportData> + '_ {
        self.root_data()
            .map(|unit| unit.imports.nodes.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.arena.get(i).and_then(|n| self.arena.get_import(n)))
    }

    /// Top-level type declarations.
    pub fn types(&self) -> NodeList {
        self.root_data()
            .map(|unit| unit.types.clone())
            .unwrap_or_default()
    }

    fn root_data(&self) -> Option<&crate::node::CompilationUnitData> {
        self.arena
            .get(self.root)
            .and_then(|n| self.arena.get_compilation_unit(n))
    }
}
