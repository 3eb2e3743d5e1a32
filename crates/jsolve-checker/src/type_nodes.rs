//! Type nodes.
//!
//! Written types are translated by the semantic type name qualifier. `var`
//! is the exception: it stands for the type of the initializer, of the
//! iterated elements, or of the lambda parameter it declares.

use crate::cache::QueryKind;
use crate::state::ResolverState;
use jsolve_common::ResolveResult;
use jsolve_solver::ResolvedType;
use jsolve_syntax::{NodeArena, NodeIndex, SyntaxKind};

impl<'a> ResolverState<'a> {
    /// The type a type node denotes.
    pub(crate) fn type_node(&mut self, node: NodeIndex) -> ResolveResult<ResolvedType> {
        self.query(QueryKind::TypeNode, node, |state| {
            if state.kind_of(node) == Some(SyntaxKind::VarType) {
                state.var_type(node)
            } else {
                state.qualifier().resolve_type(node)
            }
        })
    }

    fn var_type(&mut self, node: NodeIndex) -> ResolveResult<ResolvedType> {
        let navigator = self.navigator();
        let Some(owner) = navigator.parent(node) else {
            return Err(self.unsupported("var outside a declaration", node));
        };
        match self.kind_of(owner) {
            Some(SyntaxKind::LocalVariableDeclaration) => {
                if let Some(loop_node) = navigator.parent(owner)
                    && let Some(header) = self.arena().get(loop_node)
                    && let Some(for_each) = self.arena().get_for_each(header)
                    && for_each.variable == owner
                {
                    return self.element_type(for_each.iterable);
                }
                let data = self.data(owner, "local variable declaration", NodeArena::get_variable_decl)?;
                let Some(declarator) = data.declarators.get(0) else {
                    return Err(self.unsupported("var without a declarator", owner));
                };
                if data.declarators.len() > 1 {
                    return Err(self.unsupported("var with several declarators", owner));
                }
                let initializer = self
                    .data(declarator, "variable declarator", NodeArena::get_declarator)?
                    .initializer;
                self.inferred_variable_type(initializer, declarator)
            }
            Some(SyntaxKind::Parameter) => {
                let lambda = navigator
                    .parent(owner)
                    .filter(|&n| self.kind_of(n) == Some(SyntaxKind::LambdaExpression))
                    .ok_or_else(|| self.unsupported("var parameter outside a lambda", owner))?;
                let index = self
                    .data(lambda, "lambda", NodeArena::get_lambda)?
                    .parameters
                    .position(owner)
                    .unwrap_or_default();
                self.lambda_parameter_type(lambda, index)
            }
            _ => Err(self.unsupported("var in this position", node)),
        }
    }
}
