//! The built-in runtime type catalog.
//!
//! Core platform types are described in an embedded JSON catalog using the
//! same vocabulary as class files (internal names, access flags, JVM
//! signatures), and built through [`build_type_declaration`] on first use.
//!
//! Catalog format:
//!
//! ```json
//! { "types": [ {
//!     "name": "java/util/List",
//!     "kind": "interface",
//!     "access": ["public"],
//!     "signature": "<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;",
//!     "super": "java/lang/Object",
//!     "interfaces": [],
//!     "fields": [ { "name": "X", "type": "I", "access": ["public", "static", "final"] } ],
//!     "methods": [ { "name": "get", "sig": "(I)TE;" } ],
//!     "members": ["java/util/Map$Entry"]
//! } ] }
//! ```
//!
//! `kind` defaults to `class`, `access` to `["public"]` and `super` to
//! `java/lang/Object`. Interface methods are abstract unless marked
//! `static` or `default`.

use super::jvm::{JvmClass, JvmMember, access, build_type_declaration, internal_to_qualified};
use super::{ParentLink, TypeSolver};
use crate::declarations::{DeclarationOrigin, TypeDeclaration};
use crate::symbol_reference::SymbolReference;
use dashmap::DashMap;
use indexmap::IndexMap;
use jsolve_common::{ResolveError, ResolveResult};
use rustc_hash::FxBuildHasher;
use serde::Deserialize;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

const BUILTIN_CATALOG: &str = include_str!("catalog/runtime_types.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Catalog {
    types: Vec<CatalogType>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum CatalogKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogType {
    name: String,
    #[serde(default)]
    kind: CatalogKind,
    #[serde(default = "default_access")]
    access: Vec<String>,
    #[serde(default)]
    signature: Option<String>,
    #[serde(rename = "super", default = "default_super")]
    superclass: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    fields: Vec<CatalogField>,
    #[serde(default)]
    methods: Vec<CatalogMethod>,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default = "default_access")]
    access: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogMethod {
    name: String,
    sig: String,
    #[serde(default = "default_access")]
    access: Vec<String>,
}

fn default_access() -> Vec<String> {
    vec!["public".to_string()]
}

fn default_super() -> Option<String> {
    Some("java/lang/Object".to_string())
}

fn access_flags(words: &[String], owner: &str) -> ResolveResult<u16> {
    let mut flags = 0;
    for word in words {
        flags |= match word.as_str() {
            "public" => access::PUBLIC,
            "private" => access::PRIVATE,
            "protected" => access::PROTECTED,
            "static" => access::STATIC,
            "final" => access::FINAL,
            "abstract" => access::ABSTRACT,
            "synchronized" => access::SYNCHRONIZED,
            "native" => access::NATIVE,
            "varargs" => access::VARARGS,
            // Interface methods with a body; no class-file bit of its own.
            "default" => 0,
            other => {
                return Err(ResolveError::configuration(
                    "runtime catalog",
                    format!("unknown access word `{other}` on `{owner}`"),
                ));
            }
        };
    }
    Ok(flags)
}

impl CatalogType {
    fn to_jvm_class(&self) -> ResolveResult<JvmClass> {
        let mut flags = access_flags(&self.access, &self.name)?;
        flags |= match self.kind {
            CatalogKind::Class => 0,
            CatalogKind::Interface => access::INTERFACE | access::ABSTRACT,
            CatalogKind::Enum => access::ENUM,
            CatalogKind::Annotation => access::ANNOTATION | access::INTERFACE | access::ABSTRACT,
        };
        let is_interface = flags & access::INTERFACE != 0;
        let superclass = if self.name == "java/lang/Object" {
            None
        } else {
            self.superclass.clone()
        };

        let fields = self
            .fields
            .iter()
            .map(|field| {
                let owner = format!("{}.{}", self.name, field.name);
                Ok(JvmMember {
                    name: field.name.clone(),
                    access: access_flags(&field.access, &owner)?,
                    descriptor: field.ty.clone(),
                    signature: None,
                })
            })
            .collect::<ResolveResult<Vec<_>>>()?;

        let methods = self
            .methods
            .iter()
            .map(|method| {
                let owner = format!("{}.{}", self.name, method.name);
                let mut flags = access_flags(&method.access, &owner)?;
                let is_body = method.access.iter().any(|w| w == "static" || w == "default");
                if is_interface && !is_body {
                    flags |= access::ABSTRACT;
                }
                Ok(JvmMember {
                    name: method.name.clone(),
                    access: flags,
                    descriptor: method.sig.clone(),
                    signature: Some(method.sig.clone()),
                })
            })
            .collect::<ResolveResult<Vec<_>>>()?;

        Ok(JvmClass {
            internal_name: self.name.clone(),
            access: flags,
            signature: self.signature.clone(),
            superclass,
            interfaces: self.interfaces.clone(),
            fields,
            methods,
            member_classes: self.members.clone(),
            inner_access: None,
        })
    }
}

/// Serves the built-in catalog (or an embedder-supplied one).
#[derive(Debug)]
pub struct RuntimeTypeSolver {
    entries: IndexMap<Arc<str>, CatalogType, FxBuildHasher>,
    cache: DashMap<Arc<str>, Arc<TypeDeclaration>>,
    jre_only: bool,
    parent: ParentLink,
}

impl RuntimeTypeSolver {
    /// The built-in catalog.
    pub fn new() -> ResolveResult<Self> {
        Self::from_catalog_json(BUILTIN_CATALOG, false)
    }

    /// The built-in catalog, serving only `java.` and `javax.` names.
    pub fn jre_only() -> ResolveResult<Self> {
        Self::from_catalog_json(BUILTIN_CATALOG, true)
    }

    pub fn from_catalog_json(text: &str, jre_only: bool) -> ResolveResult<Self> {
        let catalog: Catalog = serde_json::from_str(text)
            .map_err(|err| ResolveError::configuration("runtime catalog", err.to_string()))?;
        let mut entries = IndexMap::with_capacity_and_hasher(catalog.types.len(), FxBuildHasher);
        for ty in catalog.types {
            let qualified: Arc<str> = internal_to_qualified(&ty.name).into();
            if entries.contains_key(&qualified) {
                return Err(ResolveError::configuration(
                    "runtime catalog",
                    format!("duplicate entry `{}`", ty.name),
                ));
            }
            entries.insert(qualified, ty);
        }
        debug!(types = entries.len(), jre_only, "runtime catalog loaded");
        Ok(Self {
            entries,
            cache: DashMap::new(),
            jre_only,
            parent: ParentLink::default(),
        })
    }

    pub fn is_jre_only(&self) -> bool {
        self.jre_only
    }

    /// Qualified names the catalog can serve, in catalog order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .keys()
            .map(|name| &**name)
            .filter(|name| self.serves(name))
    }

    fn serves(&self, name: &str) -> bool {
        !self.jre_only || name.starts_with("java.") || name.starts_with("javax.")
    }
}

impl TypeSolver for RuntimeTypeSolver {
    fn label(&self) -> &str {
        "runtime"
    }

    fn try_to_solve_type(&self, name: &str) -> ResolveResult<SymbolReference<Arc<TypeDeclaration>>> {
        if !self.serves(name) {
            return Ok(SymbolReference::Unsolved);
        }
        if let Some(cached) = self.cache.get(name) {
            return Ok(SymbolReference::Solved(cached.value().clone()));
        }
        let Some(entry) = self.entries.get(name) else {
            return Ok(SymbolReference::Unsolved);
        };
        let decl = build_type_declaration(&entry.to_jvm_class()?, DeclarationOrigin::Runtime)?;
        trace!(name, "built runtime declaration");
        let stored = self
            .cache
            .entry(decl.qualified_name.clone())
            .or_insert_with(|| Arc::new(decl))
            .value()
            .clone();
        Ok(SymbolReference::Solved(stored))
    }

    fn has_type(&self, name: &str) -> bool {
        self.serves(name) && self.entries.contains_key(name)
    }

    fn parent(&self) -> Option<Arc<dyn TypeSolver>> {
        self.parent.get()
    }

    fn set_parent(&self, parent: Weak<dyn TypeSolver>) -> ResolveResult<()> {
        self.parent.set(self.label(), parent)
    }
}

#[cfg(test)]
#[path = "../../tests/runtime_catalog_tests.rs"]
mod tests;
