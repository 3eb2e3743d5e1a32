//! Symbol declarators for the jsolve resolver.
//!
//! Given a scope-defining node, this crate answers which names that node
//! introduces directly and which of them are visible from a reference
//! inside it. It is purely syntactic: declared types are returned as
//! deferred references to type nodes or initializers, and the resolver
//! decides when to compute them.
//!
//! - `scope`: classification of scope-defining nodes
//! - `symbol`: the `ScopeSymbol` record and its deferred type
//! - `declarator`: per-scope symbol extraction and visibility
//! - `patterns`: `instanceof` pattern binding introduction

pub mod scope;
pub use scope::ScopeKind;

pub mod symbol;
pub use symbol::{DeferredType, ScopeSymbol, SymbolKind};

pub mod patterns;

pub mod declarator;
pub use declarator::SymbolDeclarator;
