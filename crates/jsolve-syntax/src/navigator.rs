//! Tree navigation helpers.
//!
//! `Navigator` answers structural questions (ancestors, enclosing
//! declarations, descendant search). The `demand_*` family looks up a
//! declaration that the caller requires to exist and fails otherwise.

use crate::base::NodeIndex;
use crate::node::{Node, NodeArena};
use crate::syntax_kind::SyntaxKind;
use jsolve_common::{ResolveError, ResolveResult, SourceLocation};

#[derive(Clone, Copy)]
pub struct Navigator<'a> {
    arena: &'a NodeArena,
}

impl<'a> Navigator<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    #[inline]
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.arena.parent_of(node).to_option()
    }

    /// Strict ancestors, innermost first.
    pub fn ancestors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + 'a {
        let arena = self.arena;
        std::iter::successors(arena.parent_of(node).to_option(), move |&n| {
            arena.parent_of(n).to_option()
        })
    }

    /// Nearest strict ancestor whose kind satisfies `pred`.
    pub fn find_ancestor(
        &self,
        node: NodeIndex,
        pred: impl Fn(SyntaxKind) -> bool,
    ) -> Option<NodeIndex> {
        self.ancestors(node)
            .find(|&n| self.arena.kind_of(n).is_some_and(&pred))
    }

    /// Nearest enclosing class, interface, enum or annotation declaration.
    pub fn enclosing_type(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.find_ancestor(node, SyntaxKind::is_type_declaration)
    }

    /// Nearest enclosing method or constructor declaration.
    pub fn enclosing_callable(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.find_ancestor(node, SyntaxKind::is_callable_declaration)
    }

    /// The compilation unit at the top of the tree containing `node`.
    pub fn compilation_unit(&self, node: NodeIndex) -> Option<NodeIndex> {
        if self.arena.is_kind(node, SyntaxKind::CompilationUnit) {
            return Some(node);
        }
        self.find_ancestor(node, |k| k == SyntaxKind::CompilationUnit)
    }

    /// `node` and all its descendants in pre-order.
    pub fn descendants(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if self.arena.get(current).is_none() {
                continue;
            }
            out.push(current);
            stack.extend(self.arena.children(current).into_iter().rev());
        }
        out
    }

    /// First node in pre-order below (and including) `root` matching `pred`.
    pub fn find_first(
        &self,
        root: NodeIndex,
        pred: impl Fn(NodeIndex, &Node) -> bool,
    ) -> Option<NodeIndex> {
        self.descendants(root).into_iter().find(|&n| {
            self.arena
                .get(n)
                .is_some_and(|node| pred(n, node))
        })
    }

    pub fn find_name_expression(&self, root: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.find_named(root, SyntaxKind::NameExpression, name)
    }

    pub fn find_method_call(&self, root: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.find_named(root, SyntaxKind::MethodCallExpression, name)
    }

    pub fn find_field_access(&self, root: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.find_named(root, SyntaxKind::FieldAccessExpression, name)
    }

    fn find_named(&self, root: NodeIndex, kind: SyntaxKind, name: &str) -> Option<NodeIndex> {
        self.find_first(root, |n, node| {
            node.kind == kind && self.arena.name_of(n) == Some(name)
        })
    }

    // -------------------------------------------------------------------------
    // demand_* lookups
    // -------------------------------------------------------------------------

    /// Type declaration named `name` in the unit rooted at `root`. Nested
    /// types use dotted names (`Outer.Inner`).
    pub fn demand_type(&self, root: NodeIndex, name: &str) -> ResolveResult<NodeIndex> {
        let unit = self
            .arena
            .get(root)
            .and_then(|n| self.arena.get_compilation_unit(n))
            .ok_or_else(|| ResolveError::unsupported("non-root navigation", SourceLocation::unknown()))?;

        let mut segments = name.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = unit
            .types
            .iter()
            .find(|&t| self.arena.name_of(t) == Some(first))
            .ok_or_else(|| ResolveError::unsolved(name, SourceLocation::unknown()))?;

        for segment in segments {
            current = self
                .member_types(current)
                .find(|&t| self.arena.name_of(t) == Some(segment))
                .ok_or_else(|| ResolveError::unsolved(name, SourceLocation::unknown()))?;
        }
        Ok(current)
    }

    /// Like [`demand_type`](Self::demand_type), restricted to classes.
    pub fn demand_class(&self, root: NodeIndex, name: &str) -> ResolveResult<NodeIndex> {
        let node = self.demand_type(root, name)?;
        let is_class = self
            .arena
            .get(node)
            .filter(|n| n.kind == SyntaxKind::ClassDeclaration)
            .and_then(|n| self.arena.get_type_decl(n))
            .is_some_and(|d| !d.is_interface);
        if is_class {
            Ok(node)
        } else {
            Err(ResolveError::unsolved(
                format!("class {name}"),
                SourceLocation::unknown(),
            ))
        }
    }

    pub fn demand_interface(&self, root: NodeIndex, name: &str) -> ResolveResult<NodeIndex> {
        let node = self.demand_type(root, name)?;
        let is_interface = self
            .arena
            .get(node)
            .and_then(|n| self.arena.get_type_decl(n))
            .is_some_and(|d| d.is_interface);
        if is_interface {
            Ok(node)
        } else {
            Err(ResolveError::unsolved(
                format!("interface {name}"),
                SourceLocation::unknown(),
            ))
        }
    }

    pub fn demand_enum(&self, root: NodeIndex, name: &str) -> ResolveResult<NodeIndex> {
        let node = self.demand_type(root, name)?;
        if self.arena.is_kind(node, SyntaxKind::EnumDeclaration) {
            Ok(node)
        } else {
            Err(ResolveError::unsolved(
                format!("enum {name}"),
                SourceLocation::unknown(),
            ))
        }
    }

    /// The only method named `name` declared directly in `type_decl`.
    pub fn demand_method(&self, type_decl: NodeIndex, name: &str) -> ResolveResult<NodeIndex> {
        let found: Vec<NodeIndex> = self
            .members(type_decl)
            .filter(|&m| {
                self.arena.is_kind(m, SyntaxKind::MethodDeclaration)
                    && self.arena.name_of(m) == Some(name)
            })
            .collect();
        match found.as_slice() {
            [single] => Ok(*single),
            [] => Err(ResolveError::unsolved(
                format!("method {name}"),
                SourceLocation::unknown(),
            )),
            many => Err(ResolveError::AmbiguousOverload {
                name: name.into(),
                candidates: many.iter().map(|m| format!("{name}#{}", m.0)).collect(),
            }),
        }
    }

    /// Constructor of `type_decl` at `index` among its constructors.
    pub fn demand_constructor(&self, type_decl: NodeIndex, index: usize) -> ResolveResult<NodeIndex> {
        self.members(type_decl)
            .filter(|&m| self.arena.is_kind(m, SyntaxKind::ConstructorDeclaration))
            .nth(index)
            .ok_or_else(|| {
                ResolveError::unsolved(format!("constructor #{index}"), SourceLocation::unknown())
            })
    }

    /// Declarator of the field `name` declared directly in `type_decl`.
    pub fn demand_field(&self, type_decl: NodeIndex, name: &str) -> ResolveResult<NodeIndex> {
        self.members(type_decl)
            .filter(|&m| self.arena.is_kind(m, SyntaxKind::FieldDeclaration))
            .filter_map(|m| self.arena.get(m).and_then(|n| self.arena.get_variable_decl(n)))
            .flat_map(|decl| decl.declarators.iter())
            .find(|&d| self.arena.name_of(d) == Some(name))
            .ok_or_else(|| ResolveError::unsolved(format!("field {name}"), SourceLocation::unknown()))
    }

    /// Body members of a type declaration.
    pub fn members(&self, type_decl: NodeIndex) -> impl Iterator<Item = NodeIndex> + 'a {
        self.arena
            .get(type_decl)
            .and_then(|n| self.arena.get_type_decl(n))
            .map(|d| d.members.nodes.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }

    /// Member type declarations of a type declaration.
    pub fn member_types(&self, type_decl: NodeIndex) -> impl Iterator<Item = NodeIndex> + 'a {
        let arena = self.arena;
        self.members(type_decl)
            .filter(move |&m| arena.kind_of(m).is_some_and(SyntaxKind::is_type_declaration))
    }
}

#[cfg(test)]
#[path = "../tests/navigator_tests.rs"]
mod tests;
