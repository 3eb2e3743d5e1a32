//! Per-scope symbol extraction.
//!
//! A declarator is stateless: the same scope and reference always produce
//! the same symbols, and an empty scope produces an empty list.
//!
//! # Visibility
//!
//! - Type body: every declared field and enum constant, regardless of order
//! - Method / constructor / lambda: every parameter
//! - Block: locals of statements strictly before the statement containing the
//!   reference, plus earlier declarators of that statement (and the one whose
//!   initializer contains the reference)
//! - For: init variables; for-each: the loop variable, in the body only;
//!   catch: the parameter, in the body only
//! - Patterns: bindings introduced by a condition on the branch where it is
//!   known to hold, and after an `if (!(x instanceof T t)) return;`

use crate::patterns::{bindings_when_false, bindings_when_true, never_completes};
use crate::scope::ScopeKind;
use crate::symbol::{DeferredType, ScopeSymbol, SymbolKind};
use jsolve_syntax::{BinaryOperator, Navigator, NodeArena, NodeIndex, SyntaxKind};
use tracing::trace;

#[derive(Clone, Copy)]
pub struct SymbolDeclarator<'a> {
    arena: &'a NodeArena,
}

impl<'a> SymbolDeclarator<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Self { arena }
    }

    /// The child of `scope` on the path down to `reference`, or `NONE` when
    /// `reference` is not below `scope`.
    pub fn child_towards(&self, scope: NodeIndex, reference: NodeIndex) -> NodeIndex {
        let mut current = reference;
        while current.is_some() {
            let parent = self.arena.parent_of(current);
            if parent == scope {
                return current;
            }
            current = parent;
        }
        NodeIndex::NONE
    }

    /// Every symbol `scope` introduces directly, ignoring position.
    pub fn declared_symbols(&self, scope: NodeIndex) -> Vec<ScopeSymbol> {
        let mut out = Vec::new();
        match ScopeKind::of(self.arena, scope) {
            Some(ScopeKind::TypeBody) => self.type_body_symbols(scope, &mut out),
            Some(ScopeKind::Callable) => self.callable_symbols(scope, &mut out),
            Some(ScopeKind::Lambda) => self.lambda_symbols(scope, &mut out),
            Some(ScopeKind::Block) => {
                if let Some(block) = self.arena.get(scope).and_then(|n| self.arena.get_block(n)) {
                    for stmt in block.statements.iter() {
                        self.local_declarators(stmt, SymbolKind::LocalVariable, None, &mut out);
                    }
                }
            }
            Some(ScopeKind::For) => self.for_symbols(scope, &mut out),
            Some(ScopeKind::ForEach) => self.for_each_symbols(scope, &mut out),
            Some(ScopeKind::Catch) => self.catch_symbols(scope, &mut out),
            Some(ScopeKind::CompilationUnit) | None => {}
        }
        out
    }

    /// Symbols introduced by `scope` that are visible from `reference`.
    ///
    /// `scope` need not be a scope-defining node: conditions (`if`, `while`,
    /// `?:`, `&&`, `||`) contribute pattern bindings.
    pub fn visible_symbols(&self, scope: NodeIndex, reference: NodeIndex) -> Vec<ScopeSymbol> {
        let from = self.child_towards(scope, reference);
        if from.is_none() {
            return Vec::new();
        }

        let mut out = Vec::new();
        self.pattern_symbols(scope, from, &mut out);

        match ScopeKind::of(self.arena, scope) {
            Some(ScopeKind::Block) => self.block_symbols(scope, from, reference, &mut out),
            Some(ScopeKind::ForEach) => {
                let body = self
                    .arena
                    .get(scope)
                    .and_then(|n| self.arena.get_for_each(n))
                    .map(|d| d.body);
                if body == Some(from) {
                    self.for_each_symbols(scope, &mut out);
                }
            }
            Some(ScopeKind::Catch) => {
                let body = self
                    .arena
                    .get(scope)
                    .and_then(|n| self.arena.get_catch_clause(n))
                    .map(|d| d.body);
                if body == Some(from) {
                    self.catch_symbols(scope, &mut out);
                }
            }
            Some(_) => out.extend(self.declared_symbols(scope)),
            None => {}
        }
        trace!(scope = scope.0, reference = reference.0, count = out.len(), "visible symbols");
        out
    }

    /// First symbol named `name` that `scope` makes visible from `reference`.
    pub fn solve_symbol(&self, scope: NodeIndex, reference: NodeIndex, name: &str) -> Option<ScopeSymbol> {
        self.visible_symbols(scope, reference)
            .into_iter()
            .find(|symbol| symbol.name == name)
    }

    /// Type parameter nodes declared by a type or callable declaration.
    pub fn type_parameters(&self, scope: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.arena.get(scope) else {
            return Vec::new();
        };
        if let Some(decl) = self.arena.get_type_decl(node) {
            decl.type_parameters.iter().collect()
        } else if let Some(method) = self.arena.get_method(node) {
            method.type_parameters.iter().collect()
        } else {
            Vec::new()
        }
    }

    // -------------------------------------------------------------------------
    // Scope kinds
    // -------------------------------------------------------------------------

    fn type_body_symbols(&self, scope: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(decl) = self.arena.get(scope).and_then(|n| self.arena.get_type_decl(n)) else {
            return;
        };
        for constant in decl.entries.iter() {
            if let Some(name) = self.arena.name_of(constant) {
                out.push(ScopeSymbol::new(
                    name,
                    constant,
                    SymbolKind::EnumConstant,
                    DeferredType::DeclaringType(scope),
                ));
            }
        }
        let nav = Navigator::new(self.arena);
        for member in nav.members(scope) {
            if self.arena.is_kind(member, SyntaxKind::FieldDeclaration) {
                self.local_declarators(member, SymbolKind::Field, None, out);
            }
        }
    }

    fn callable_symbols(&self, scope: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(method) = self.arena.get(scope).and_then(|n| self.arena.get_method(n)) else {
            return;
        };
        for param in method.parameters.iter() {
            self.push_parameter(param, SymbolKind::Parameter, None, out);
        }
    }

    fn lambda_symbols(&self, scope: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(lambda) = self.arena.get(scope).and_then(|n| self.arena.get_lambda(n)) else {
            return;
        };
        for (index, param) in lambda.parameters.iter().enumerate() {
            self.push_parameter(param, SymbolKind::LambdaParameter, Some((scope, index)), out);
        }
    }

    fn for_symbols(&self, scope: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        if let Some(data) = self.arena.get(scope).and_then(|n| self.arena.get_for(n)) {
            for init in data.initialization.iter() {
                self.local_declarators(init, SymbolKind::LocalVariable, None, out);
            }
        }
    }

    fn for_each_symbols(&self, scope: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(data) = self.arena.get(scope).and_then(|n| self.arena.get_for_each(n)) else {
            return;
        };
        let start = out.len();
        self.local_declarators(data.variable, SymbolKind::LocalVariable, None, out);
        // `var` loop variables take the iterable's element type.
        if self.is_var_type(self.variable_type(data.variable)) {
            for symbol in &mut out[start..] {
                symbol.declared_type = DeferredType::ForEachElement(data.iterable);
            }
        }
    }

    fn catch_symbols(&self, scope: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        if let Some(data) = self.arena.get(scope).and_then(|n| self.arena.get_catch_clause(n)) {
            self.push_parameter(data.parameter, SymbolKind::CatchParameter, None, out);
        }
    }

    fn block_symbols(&self, scope: NodeIndex, from: NodeIndex, reference: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(block) = self.arena.get(scope).and_then(|n| self.arena.get_block(n)) else {
            return;
        };
        for stmt in block.statements.iter() {
            if stmt == from {
                let limit = self.child_towards(stmt, reference);
                self.local_declarators(stmt, SymbolKind::LocalVariable, Some(limit), out);
                break;
            }
            self.local_declarators(stmt, SymbolKind::LocalVariable, None, out);
            self.flow_bindings(stmt, out);
        }
    }

    /// `if (!(x instanceof T t)) return;` leaves `t` bound after the `if`.
    fn flow_bindings(&self, stmt: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(node) = self.arena.get(stmt) else {
            return;
        };
        if node.kind != SyntaxKind::IfStatement {
            return;
        }
        let Some(data) = self.arena.get_conditional(node) else {
            return;
        };
        if data.when_false.is_none() && never_completes(self.arena, data.when_true) {
            for pattern in bindings_when_false(self.arena, data.condition) {
                self.push_pattern(pattern, out);
            }
        }
    }

    fn pattern_symbols(&self, scope: NodeIndex, from: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        let Some(node) = self.arena.get(scope) else {
            return;
        };
        let patterns = match node.kind {
            SyntaxKind::IfStatement | SyntaxKind::ConditionalExpression => {
                let Some(data) = self.arena.get_conditional(node) else {
                    return;
                };
                if from == data.when_true {
                    bindings_when_true(self.arena, data.condition)
                } else if from == data.when_false {
                    bindings_when_false(self.arena, data.condition)
                } else {
                    return;
                }
            }
            SyntaxKind::WhileStatement => {
                let Some(data) = self.arena.get_loop(node) else {
                    return;
                };
                if from != data.body {
                    return;
                }
                bindings_when_true(self.arena, data.condition)
            }
            SyntaxKind::ForStatement => {
                let Some(data) = self.arena.get_for(node) else {
                    return;
                };
                if from != data.body {
                    return;
                }
                bindings_when_true(self.arena, data.compare)
            }
            SyntaxKind::BinaryExpression => {
                let Some(data) = self.arena.get_binary_expr(node) else {
                    return;
                };
                if from != data.right {
                    return;
                }
                match data.operator {
                    BinaryOperator::And => bindings_when_true(self.arena, data.left),
                    BinaryOperator::Or => bindings_when_false(self.arena, data.left),
                    _ => return,
                }
            }
            _ => return,
        };
        for pattern in patterns {
            self.push_pattern(pattern, out);
        }
    }

    // -------------------------------------------------------------------------
    // Symbol construction
    // -------------------------------------------------------------------------

    /// Declarators of a field or local variable declaration. With `limit`,
    /// stops after the declarator `limit` (the one containing the reference).
    fn local_declarators(
        &self,
        stmt: NodeIndex,
        kind: SymbolKind,
        limit: Option<NodeIndex>,
        out: &mut Vec<ScopeSymbol>,
    ) {
        let Some(node) = self.arena.get(stmt) else {
            return;
        };
        if !matches!(
            node.kind,
            SyntaxKind::LocalVariableDeclaration | SyntaxKind::FieldDeclaration
        ) {
            return;
        }
        let Some(decl) = self.arena.get_variable_decl(node) else {
            return;
        };
        let is_var = self.is_var_type(decl.ty);
        for declarator in decl.declarators.iter() {
            let Some(data) = self.arena.get(declarator).and_then(|n| self.arena.get_declarator(n)) else {
                continue;
            };
            let declared_type = if is_var {
                DeferredType::Inferred(data.initializer)
            } else {
                DeferredType::Declared(decl.ty)
            };
            out.push(ScopeSymbol::new(data.name.clone(), declarator, kind, declared_type));
            if limit == Some(declarator) {
                break;
            }
        }
    }

    fn push_parameter(
        &self,
        param: NodeIndex,
        kind: SymbolKind,
        lambda: Option<(NodeIndex, usize)>,
        out: &mut Vec<ScopeSymbol>,
    ) {
        let Some(data) = self.arena.get(param).and_then(|n| self.arena.get_parameter(n)) else {
            return;
        };
        let declared_type = match lambda {
            Some((lambda, index)) if data.ty.is_none() || self.is_var_type(data.ty) => {
                DeferredType::LambdaParameter { lambda, index }
            }
            _ => DeferredType::Declared(data.ty),
        };
        let mut symbol = ScopeSymbol::new(data.name.clone(), param, kind, declared_type);
        symbol.is_varargs = data.is_varargs;
        out.push(symbol);
    }

    fn push_pattern(&self, pattern: NodeIndex, out: &mut Vec<ScopeSymbol>) {
        if let Some(data) = self.arena.get(pattern).and_then(|n| self.arena.get_type_pattern(n)) {
            out.push(ScopeSymbol::new(
                data.name.clone(),
                pattern,
                SymbolKind::PatternBinding,
                DeferredType::Declared(data.ty),
            ));
        }
    }

    fn variable_type(&self, decl: NodeIndex) -> NodeIndex {
        self.arena
            .get(decl)
            .and_then(|n| self.arena.get_variable_decl(n))
            .map(|d| d.ty)
            .unwrap_or(NodeIndex::NONE)
    }

    fn is_var_type(&self, ty: NodeIndex) -> bool {
        self.arena.is_kind(ty, SyntaxKind::VarType)
    }
}
