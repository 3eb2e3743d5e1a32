//! Expression Typing Module
//!
//! Computes the static type of an expression node. It handles:
//! - Literals, names and field accesses (including `array.length`)
//! - Method calls and object creation, through the call checker
//! - Lambdas, typed from their target
//! - Conditional, binary and unary operators with numeric promotion
//! - Array access and creation, casts, assignments, `instanceof`
//! - `this`, `super` and class literals
//!
//! Every expression is its own memoized query, so sharing a subexpression
//! between two outer queries computes it once.

use crate::cache::QueryKind;
use crate::name_resolution::Qualifier;
use crate::state::ResolverState;
use jsolve_common::ResolveResult;
use jsolve_solver::promotion::{binary_result_type, numeric_conditional_type, unary_result_type};
use jsolve_solver::types::CLASS;
use jsolve_solver::{PrimitiveKind, ReferenceType, ResolvedType, SymbolReference};
use jsolve_syntax::{NodeArena, NodeIndex, SyntaxKind};
use tracing::trace;

const VOID_CLASS: &str = "java.lang.Void";

impl<'a> ResolverState<'a> {
    /// The static type of an expression.
    pub(crate) fn expression_type(&mut self, expr: NodeIndex) -> ResolveResult<ResolvedType> {
        self.query(QueryKind::ExpressionType, expr, |state| {
            if !state.ctx.enter_expression() {
                return Err(state.unsupported("expression nested too deeply", expr));
            }
            let result = state.compute_expression_type(expr);
            state.ctx.leave_expression();
            if let Ok(ty) = &result {
                trace!(node = expr.0, ty = %ty, "expression type");
            }
            result
        })
    }

    fn compute_expression_type(&mut self, expr: NodeIndex) -> ResolveResult<ResolvedType> {
        let Some(kind) = self.kind_of(expr) else {
            return Err(self.unsupported("missing expression", expr));
        };
        match kind {
            SyntaxKind::IntegerLiteral => Ok(ResolvedType::Primitive(PrimitiveKind::Int)),
            SyntaxKind::LongLiteral => Ok(ResolvedType::Primitive(PrimitiveKind::Long)),
            SyntaxKind::FloatLiteral => Ok(ResolvedType::Primitive(PrimitiveKind::Float)),
            SyntaxKind::DoubleLiteral => Ok(ResolvedType::Primitive(PrimitiveKind::Double)),
            SyntaxKind::CharLiteral => Ok(ResolvedType::Primitive(PrimitiveKind::Char)),
            SyntaxKind::BooleanLiteral => Ok(ResolvedType::Primitive(PrimitiveKind::Boolean)),
            SyntaxKind::StringLiteral | SyntaxKind::TextBlockLiteral => Ok(ResolvedType::string()),
            SyntaxKind::NullLiteral => Ok(ResolvedType::Null),

            SyntaxKind::NameExpression => {
                let name = self.arena().name_of(expr).unwrap_or_default();
                match self.solve_value_name(name, expr)? {
                    SymbolReference::Solved(symbol) => self.value_type(&symbol),
                    SymbolReference::Unsolved => Err(self.unsolved(name, expr)),
                }
            }
            SyntaxKind::FieldAccessExpression => match self.classify_qualifier(expr)? {
                Qualifier::Value(ty) => Ok(ty),
                Qualifier::Type(ty) => Err(self.unsupported(format!("type {ty} used as a value"), expr)),
                Qualifier::Package(package) => Err(self.unsolved(package, expr)),
            },
            SyntaxKind::MethodCallExpression => self.method_call_type(expr),
            SyntaxKind::ObjectCreationExpression => self.object_creation_type(expr),
            SyntaxKind::LambdaExpression => self.lambda_target_type(expr),

            SyntaxKind::ConditionalExpression => self.conditional_type(expr),
            SyntaxKind::BinaryExpression => {
                let data = self.data(expr, "binary expression", NodeArena::get_binary_expr)?;
                let left = self.expression_type(data.left)?;
                let right = self.expression_type(data.right)?;
                binary_result_type(data.operator, &left, &right).ok_or_else(|| {
                    self.unsupported(
                        format!(
                            "operator {} on {} and {}",
                            data.operator.as_str(),
                            left.describe(),
                            right.describe()
                        ),
                        expr,
                    )
                })
            }
            SyntaxKind::UnaryExpression => {
                let data = self.data(expr, "unary expression", NodeArena::get_unary_expr)?;
                let operand = self.expression_type(data.expression)?;
                unary_result_type(data.operator, &operand).ok_or_else(|| {
                    self.unsupported(
                        format!("operator {} on {}", data.operator.as_str(), operand.describe()),
                        expr,
                    )
                })
            }

            SyntaxKind::ArrayAccessExpression => {
                let data = self.data(expr, "array access", NodeArena::get_array_access)?;
                let array = self.expression_type(data.name)?;
                match array.component() {
                    Some(component) => Ok(component.clone()),
                    None => Err(self.unsupported(format!("indexing {}", array.describe()), expr)),
                }
            }
            SyntaxKind::ArrayCreationExpression => {
                let data = self.data(expr, "array creation", NodeArena::get_array_creation)?;
                let element = self.type_node(data.element_type)?;
                Ok(element.array_of(data.levels() as usize))
            }
            SyntaxKind::AssignExpression => {
                let target = self.data(expr, "assignment", NodeArena::get_assignment)?.target;
                self.expression_type(target)
            }
            SyntaxKind::CastExpression => {
                let ty = self.data(expr, "cast", NodeArena::get_cast)?.ty;
                self.type_node(ty)
            }
            SyntaxKind::InstanceOfExpression => Ok(ResolvedType::Primitive(PrimitiveKind::Boolean)),
            SyntaxKind::EnclosedExpression => {
                let inner = self.data(expr, "parenthesized expression", NodeArena::get_wrapper)?.expression;
                self.expression_type(inner)
            }

            SyntaxKind::ThisExpression => self.this_type(expr).map(ResolvedType::Reference),
            SyntaxKind::SuperExpression => self.super_type(expr).map(ResolvedType::Reference),
            SyntaxKind::ClassExpression => {
                let ty = self.data(expr, "class literal", NodeArena::get_class_expr)?.ty;
                let argument = match self.type_node(ty)? {
                    ResolvedType::Primitive(kind) => ResolvedType::boxed(kind),
                    ResolvedType::Void => ResolvedType::top_level(VOID_CLASS),
                    other => other,
                };
                Ok(ResolvedType::Reference(
                    ReferenceType::top_level(CLASS).with_arguments(vec![argument]),
                ))
            }

            other => Err(self.unsupported(format!("{} as an expression", other.name()), expr)),
        }
    }

    /// `c ? a : b` (JLS 15.25): numeric promotion when both branches are
    /// numeric, boxing against `null`, otherwise the least upper bound.
    fn conditional_type(&mut self, expr: NodeIndex) -> ResolveResult<ResolvedType> {
        let data = self.data(expr, "conditional expression", NodeArena::get_conditional)?;
        let when_true = self.expression_type(data.when_true)?;
        let when_false = self.expression_type(data.when_false)?;

        if when_true == when_false {
            return Ok(when_true);
        }
        if let Some(numeric) = numeric_conditional_type(&when_true, &when_false) {
            return Ok(numeric);
        }
        if when_true.is_boolean_like() && when_false.is_boolean_like() {
            return Ok(ResolvedType::Primitive(PrimitiveKind::Boolean));
        }
        let boxed = |ty: ResolvedType| match ty {
            ResolvedType::Primitive(kind) => ResolvedType::boxed(kind),
            other => other,
        };
        match (when_true, when_false) {
            (ResolvedType::Null, other) | (other, ResolvedType::Null) => Ok(boxed(other)),
            (a, b) => self.hierarchy().least_upper_bound(&[boxed(a), boxed(b)]),
        }
    }

    /// Type of `this` or `Outer.this`: the class as seen from inside its body.
    pub(crate) fn this_type(&mut self, expr: NodeIndex) -> ResolveResult<ReferenceType> {
        let qualifier = self.data(expr, "this", NodeArena::get_qualifier)?.type_name;
        if qualifier.is_some() {
            let named = self.qualified_type_name(qualifier)?;
            return Ok(self.hierarchy().declaration(&named)?.declared_type());
        }
        Ok(self.enclosing_type_declaration(expr)?.declared_type())
    }

    /// Type of `super`: the direct superclass of the enclosing class, or
    /// the named interface for `Iface.super`.
    pub(crate) fn super_type(&mut self, expr: NodeIndex) -> ResolveResult<ReferenceType> {
        let qualifier = self.data(expr, "super", NodeArena::get_qualifier)?.type_name;
        if qualifier.is_some() {
            let named = self.qualified_type_name(qualifier)?;
            let decl = self.hierarchy().declaration(&named)?;
            if decl.is_interface() {
                return Ok(named);
            }
            return Ok(decl.superclass.clone().unwrap_or_else(ReferenceType::object));
        }
        let decl = self.enclosing_type_declaration(expr)?;
        Ok(decl.superclass.clone().unwrap_or_else(ReferenceType::object))
    }

    fn qualified_type_name(&mut self, type_name: NodeIndex) -> ResolveResult<ReferenceType> {
        match self.type_node(type_name)? {
            ResolvedType::Reference(reference) => Ok(reference),
            other => Err(self.unsupported(format!("{} as a qualifier", other.describe()), type_name)),
        }
    }
}
