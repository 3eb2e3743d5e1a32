//! Classification of scope-defining nodes.

use jsolve_syntax::{NodeArena, NodeIndex, SyntaxKind};

/// The kinds of node that introduce names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Imports and top-level types; no value symbols.
    CompilationUnit,
    /// Class, interface, enum or annotation body: declared fields.
    TypeBody,
    /// Method or constructor: parameters.
    Callable,
    /// Lambda: parameters.
    Lambda,
    /// Block: locals declared before the reference.
    Block,
    /// Basic `for`: init variables.
    For,
    /// Enhanced `for`: the loop variable.
    ForEach,
    /// Catch clause: the caught exception.
    Catch,
}

impl ScopeKind {
    pub fn of(arena: &NodeArena, node: NodeIndex) -> Option<ScopeKind> {
        let kind = arena.kind_of(node)?;
        Some(match kind {
            SyntaxKind::CompilationUnit => Self::CompilationUnit,
            k if k.is_type_declaration() => Self::TypeBody,
            k if k.is_callable_declaration() => Self::Callable,
            SyntaxKind::LambdaExpression => Self::Lambda,
            SyntaxKind::Block => Self::Block,
            SyntaxKind::ForStatement => Self::For,
            SyntaxKind::ForEachStatement => Self::ForEach,
            SyntaxKind::CatchClause => Self::Catch,
            _ => return None,
        })
    }
}
