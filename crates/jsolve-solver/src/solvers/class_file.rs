//! Declarations read from `.class` files under classpath directories.

use super::class_reader::parse_class_file;
use super::jvm::{build_type_declaration, internal_to_qualified};
use super::{ParentLink, TypeSolver};
use crate::declarations::{DeclarationOrigin, TypeDeclaration};
use crate::symbol_reference::SymbolReference;
use dashmap::DashMap;
use jsolve_common::{ResolveError, ResolveResult};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct ClassFileTypeSolver {
    roots: Vec<PathBuf>,
    cache: DashMap<Arc<str>, Arc<TypeDeclaration>>,
    parent: ParentLink,
}

impl ClassFileTypeSolver {
    /// Fails when any directory does not exist.
    pub fn new<I, P>(directories: I) -> ResolveResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut roots = Vec::new();
        for dir in directories {
            let dir = dir.into();
            if !dir.is_dir() {
                return Err(ResolveError::configuration(
                    "class_path",
                    format!("directory `{}` does not exist", dir.display()),
                ));
            }
            roots.push(dir);
        }
        Ok(Self {
            roots,
            cache: DashMap::new(),
            parent: ParentLink::default(),
        })
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Relative paths that may hold `name`, longest package first:
    /// `a.b.C.D` tries `a/b/C/D.class`, `a/b/C$D.class`, `a/b$C$D.class`,
    /// then `a$b$C$D.class`.
    pub fn candidate_paths(name: &str) -> Vec<PathBuf> {
        let segments: Vec<&str> = name.split('.').collect();
        (0..segments.len())
            .rev()
            .map(|split| {
                let (package, nested) = segments.split_at(split);
                let mut path = PathBuf::new();
                for part in package {
                    path.push(part);
                }
                path.push(format!("{}.class", nested.join("$")));
                path
            })
            .collect()
    }

    /// Existing files that may hold `name`, in lookup order.
    fn locate(&self, name: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let candidates = Self::candidate_paths(name);
        self.roots.iter().flat_map(move |root| {
            candidates
                .iter()
                .map(|candidate| root.join(candidate))
                .filter(|path| path.is_file())
                .collect::<Vec<_>>()
        })
    }

    fn load(&self, name: &str, path: &Path) -> ResolveResult<Option<TypeDeclaration>> {
        let source = path.display().to_string();
        let bytes = std::fs::read(path)
            .map_err(|err| ResolveError::configuration(source.clone(), err.to_string()))?;
        let class = parse_class_file(&bytes, &source)?;
        if internal_to_qualified(&class.internal_name) != name {
            trace!(name, found = %class.internal_name, "class file declares another type");
            return Ok(None);
        }
        build_type_declaration(&class, DeclarationOrigin::ClassFile(Arc::from(path))).map(Some)
    }
}

impl TypeSolver for ClassFileTypeSolver {
    fn label(&self) -> &str {
        "class_path"
    }

    fn try_to_solve_type(&self, name: &str) -> ResolveResult<SymbolReference<Arc<TypeDeclaration>>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(SymbolReference::Solved(cached.value().clone()));
        }
        for path in self.locate(name) {
            let Some(decl) = self.load(name, &path)? else {
                continue;
            };
            debug!(name, path = %path.display(), "loaded class file");
            let stored = self
                .cache
                .entry(decl.qualified_name.clone())
                .or_insert_with(|| Arc::new(decl))
                .value()
                .clone();
            return Ok(SymbolReference::Solved(stored));
        }
        Ok(SymbolReference::Unsolved)
    }

    fn has_type(&self, name: &str) -> bool {
        self.cache.contains_key(name) || self.locate(name).next().is_some()
    }

    fn parent(&self) -> Option<Arc<dyn TypeSolver>> {
        self.parent.get()
    }

    fn set_parent(&self, parent: Weak<dyn TypeSolver>) -> ResolveResult<()> {
        self.parent.set(self.label(), parent)
    }
}
