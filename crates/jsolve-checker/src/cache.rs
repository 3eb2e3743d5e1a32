//! Resolution cache.
//!
//! One cache belongs to one facade and lives exactly as long as it. Entries
//! are keyed by the solver configuration the facade was built over, the
//! file, the node and the query kind, so two facades over different solver
//! chains never share answers even if they are handed the same units.
//!
//! Entries are write-once: the first answer recorded for a key is the one
//! every later query sees, including failures. Nothing is ever invalidated.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use jsolve_common::ResolveResult;
use jsolve_solver::{ResolvedDeclaration, ResolvedType, SymbolReference, TypeDeclaration};
use jsolve_syntax::{FileId, NodeIndex};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Global counter for solver configuration ids.
static NEXT_CONFIGURATION_ID: AtomicU64 = AtomicU64::new(1);

/// The four memoized queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Declaration,
    ExpressionType,
    TypeNode,
    TypeDeclaration,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::ExpressionType => "expression-type",
            Self::TypeNode => "type-node",
            Self::TypeDeclaration => "type-declaration",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub configuration: u64,
    pub file: FileId,
    pub node: NodeIndex,
    pub kind: QueryKind,
}

/// A recorded answer.
#[derive(Clone, Debug)]
pub enum CachedValue {
    Declaration(SymbolReference<ResolvedDeclaration>),
    Type(ResolvedType),
    TypeDeclaration(Arc<TypeDeclaration>),
}

/// Values the resolver memoizes.
pub(crate) trait Cacheable: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: CachedValue) -> Option<Self>;
}

impl Cacheable for SymbolReference<ResolvedDeclaration> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Declaration(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Declaration(decl) => Some(decl),
            _ => None,
        }
    }
}

impl Cacheable for ResolvedType {
    fn into_cached(self) -> CachedValue {
        CachedValue::Type(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

impl Cacheable for Arc<TypeDeclaration> {
    fn into_cached(self) -> CachedValue {
        CachedValue::TypeDeclaration(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::TypeDeclaration(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Snapshot of the cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct ResolutionCache {
    configuration: u64,
    enabled: bool,
    entries: DashMap<CacheKey, ResolveResult<CachedValue>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("configuration", &self.configuration)
            .field("enabled", &self.enabled)
            .field("stats", &self.stats())
            .finish()
    }
}

impl ResolutionCache {
    /// A cache for a fresh solver configuration.
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    /// A cache that never records anything; counters still run.
    pub fn disabled() -> Self {
        Self::with_enabled(false)
    }

    pub fn with_enabled(enabled: bool) -> Self {
        let configuration = NEXT_CONFIGURATION_ID.fetch_add(1, Ordering::SeqCst);
        trace!(configuration, enabled, "ResolutionCache::new");
        Self {
            configuration,
            enabled,
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn configuration(&self) -> u64 {
        self.configuration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key(&self, file: FileId, node: NodeIndex, kind: QueryKind) -> CacheKey {
        CacheKey {
            configuration: self.configuration,
            file,
            node,
            kind,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<ResolveResult<CachedValue>> {
        let found = self
            .entries
            .get(key)
            .map(|entry| entry.value().clone());
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(node = key.node.0, kind = %key.kind, "cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(node = key.node.0, kind = %key.kind, "cache miss");
        }
        found
    }

    /// Record `value` unless an answer is already present, and return the
    /// answer that is now recorded.
    pub fn record(
        &self,
        key: CacheKey,
        value: ResolveResult<CachedValue>,
    ) -> ResolveResult<CachedValue> {
        if !self.enabled {
            return value;
        }
        match self.entries.entry(key) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => slot.insert(value).value().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod tests;
