//! Resolution facade for the jsolve resolver.
//!
//! This crate answers point queries over a syntax tree: what declaration a
//! reference denotes, what type an expression has, what a type node means
//! and which type declaration a node belongs to. It is organized into
//! several submodules:
//! - `facade` - `ResolutionFacade`, the entry point embedders hold
//! - `resolver` - the `SymbolResolver` trait
//! - `cache` - the write-once answer cache
//! - `context` - per-query recursion guard and lambda assumptions
//! - `state` - `ResolverState`, which the query modules below extend
//! - `declarations` - declaration and type declaration queries
//! - `name_resolution` - scope walks, static imports, ambiguous names
//! - `type_nodes` - written types and `var`
//! - `expr` - expression types
//! - `call_checker` - method calls and constructor invocations
//! - `overload` - applicability phases and most specific selection
//! - `inference` - method and diamond type argument inference
//! - `lambdas` - lambda target typing

pub mod cache;
pub mod context;
pub mod facade;
pub mod resolver;

mod call_checker;
mod declarations;
mod expr;
mod inference;
mod lambdas;
mod name_resolution;
mod overload;
mod state;
mod type_nodes;

pub use cache::{CacheStats, QueryKind, ResolutionCache};
pub use context::{QueryContext, QueryLimits};
pub use facade::{FacadeOptions, ResolutionFacade};
pub use resolver::SymbolResolver;
