//! Lambda typing.
//!
//! A lambda has no type of its own: it takes the functional interface its
//! context expects. The context is found by walking up from the lambda to
//! the construct that assigns it a target: a variable initializer, a call
//! argument, a return, an assignment or a cast. Implicitly typed parameters
//! take the parameter types of the interface's single abstract method.

use crate::state::ResolverState;
use jsolve_common::ResolveResult;
use jsolve_solver::{MethodUsage, ResolvedType, SymbolReference};
use jsolve_syntax::{NodeArena, NodeIndex, SyntaxKind};
use tracing::trace;

impl<'a> ResolverState<'a> {
    /// The functional interface type a lambda is converted to.
    pub(crate) fn lambda_target_type(&mut self, lambda: NodeIndex) -> ResolveResult<ResolvedType> {
        match self.target_type(lambda, true)? {
            Some(target) => Ok(target),
            None => Err(self.unsupported("lambda without a target type", lambda)),
        }
    }

    /// Type of parameter `index` of an implicitly typed lambda.
    pub(crate) fn lambda_parameter_type(&mut self, lambda: NodeIndex, index: usize) -> ResolveResult<ResolvedType> {
        if let Some(assumed) = self.ctx.assumed_lambda_parameter(lambda, index) {
            return Ok(assumed.clone());
        }
        let target = self.lambda_target_type(lambda)?;
        let method = self.functional_method_of(&target, lambda)?;
        method
            .parameter_types
            .get(index)
            .map(ResolvedType::upper_bound)
            .ok_or_else(|| self.unsupported("lambda arity does not match its target", lambda))
    }

    fn functional_method_of(
        &mut self,
        target: &ResolvedType,
        node: NodeIndex,
    ) -> ResolveResult<MethodUsage> {
        let iface = self.receiver_of(&target.upper_bound(), node)?;
        self.lookup()
            .functional_method(&iface)?
            .ok_or_else(|| self.unsupported(format!("{iface} is not a functional interface"), node))
    }

    /// Type of the value a lambda body produces: the body expression, or
    /// the first `return` of a block body. `void` when nothing is returned.
    pub(crate) fn lambda_body_type(&mut self, lambda: NodeIndex) -> ResolveResult<ResolvedType> {
        let body = self.data(lambda, "lambda", NodeArena::get_lambda)?.body;
        if self.kind_of(body) != Some(SyntaxKind::Block) {
            return self.expression_type(body);
        }
        let arena = self.arena();
        let navigator = self.navigator();
        let returned = navigator.descendants(body).into_iter().find_map(|node| {
            let header = arena.get(node)?;
            if header.kind != SyntaxKind::ReturnStatement {
                return None;
            }
            let owner = navigator.find_ancestor(node, |kind| {
                kind == SyntaxKind::LambdaExpression
                    || kind.is_callable_declaration()
                    || kind.is_type_declaration()
            });
            let expression = arena.get_wrapper(header)?.expression;
            (owner == Some(lambda) && expression.is_some()).then_some(expression)
        });
        match returned {
            Some(expression) => self.expression_type(expression),
            None => Ok(ResolvedType::Void),
        }
    }

    /// The type the context of `expr` expects, if it expects one.
    /// `through_calls` allows call arguments as contexts, which requires
    /// resolving the enclosing call.
    pub(crate) fn target_type(&mut self, expr: NodeIndex, through_calls: bool) -> ResolveResult<Option<ResolvedType>> {
        let arena = self.arena();
        let Some(parent) = self.navigator().parent(expr) else {
            return Ok(None);
        };
        let Some(header) = arena.get(parent) else {
            return Ok(None);
        };
        let target = match header.kind {
            SyntaxKind::VariableDeclarator => {
                let Some(declaration) = self.navigator().parent(parent) else {
                    return Ok(None);
                };
                let ty = self
                    .data(declaration, "variable declaration", NodeArena::get_variable_decl)?
                    .ty;
                if self.kind_of(ty) == Some(SyntaxKind::VarType) {
                    return Ok(None);
                }
                Some(self.type_node(ty)?)
            }
            SyntaxKind::MethodCallExpression if through_calls => {
                let Some(index) = arena
                    .get_method_call(header)
                    .and_then(|data| data.arguments.position(expr))
                else {
                    return Ok(None);
                };
                match self.solve_method_call(parent)? {
                    SymbolReference::Solved(call) => call.target_of(index).cloned(),
                    SymbolReference::Unsolved => None,
                }
            }
            SyntaxKind::ObjectCreationExpression if through_calls => {
                let Some(index) = arena
                    .get_object_creation(header)
                    .and_then(|data| data.arguments.position(expr))
                else {
                    return Ok(None);
                };
                match self.solve_object_creation(parent)? {
                    SymbolReference::Solved(creation) => creation.call.target_of(index).cloned(),
                    SymbolReference::Unsolved => None,
                }
            }
            SyntaxKind::ExplicitConstructorInvocation if through_calls => {
                let Some(index) = arena
                    .get_explicit_ctor_call(header)
                    .and_then(|data| data.arguments.position(expr))
                else {
                    return Ok(None);
                };
                match self.solve_explicit_constructor_call(parent)? {
                    SymbolReference::Solved(call) => call.target_of(index).cloned(),
                    SymbolReference::Unsolved => None,
                }
            }
            SyntaxKind::ReturnStatement => self.return_target(parent)?,
            SyntaxKind::LambdaExpression => self.lambda_return_target(parent)?,
            SyntaxKind::AssignExpression => match arena.get_assignment(header) {
                Some(data) if data.value == expr => Some(self.expression_type(data.target)?),
                _ => None,
            },
            SyntaxKind::CastExpression => match arena.get_cast(header) {
                Some(data) => Some(self.type_node(data.ty)?),
                None => None,
            },
            SyntaxKind::EnclosedExpression => self.target_type(parent, through_calls)?,
            SyntaxKind::ConditionalExpression => match arena.get_conditional(header) {
                Some(data) if data.condition != expr => self.target_type(parent, through_calls)?,
                _ => None,
            },
            _ => None,
        };
        if let Some(ty) = &target {
            trace!(node = expr.0, target = %ty, "target type");
        }
        Ok(target)
    }

    /// Declared return type of the method, or functional return type of the
    /// lambda, that a `return` statement belongs to.
    fn return_target(&mut self, statement: NodeIndex) -> ResolveResult<Option<ResolvedType>> {
        let arena = self.arena();
        let owner = self.navigator().find_ancestor(statement, |kind| {
            kind == SyntaxKind::LambdaExpression || kind.is_callable_declaration()
        });
        let Some(owner) = owner else {
            return Ok(None);
        };
        match arena.kind_of(owner) {
            Some(SyntaxKind::LambdaExpression) => self.lambda_return_target(owner),
            Some(SyntaxKind::MethodDeclaration) => {
                let ty = self.data(owner, "method", NodeArena::get_method)?.return_type;
                Ok(Some(self.type_node(ty)?))
            }
            _ => Ok(None),
        }
    }

    fn lambda_return_target(&mut self, lambda: NodeIndex) -> ResolveResult<Option<ResolvedType>> {
        let target = self.lambda_target_type(lambda)?;
        let method = self.functional_method_of(&target, lambda)?;
        Ok(Some(method.return_type).filter(|ty| !ty.is_void()))
    }
}
