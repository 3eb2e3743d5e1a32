//! Syntax tree capability for the jsolve resolver.
//!
//! The parser is an external collaborator; this crate defines the tree it
//! produces and everything the resolver needs to walk it:
//! - `NodeArena`: flat node storage with typed data pools and parent links
//! - `SyntaxKind`: the closed set of node kinds
//! - `Navigator`: ancestor/descendant queries and `demand_*` lookups
//! - `SourceUnit`: one parsed compilation unit plus its line map
//! - `TreeBuilder`: programmatic construction of trees

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod modifiers;
pub use modifiers::Modifiers;

pub mod operators;
pub use operators::{AssignOperator, BinaryOperator, UnaryOperator};

pub mod node;
pub use node::*;

mod node_access;
mod node_arena;
pub use node_access::Children;

pub mod navigator;
pub use navigator::Navigator;

pub mod source_unit;
pub use source_unit::{FileId, NodeRef, SourceUnit};

pub mod builder;
pub use builder::TreeBuilder;

pub mod literal;
