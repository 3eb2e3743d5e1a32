//! Pattern binding introduction.
//!
//! `x instanceof T t` introduces `t` where the test is known to have been
//! true. Conditions compose through `!`, `&&`, `||` and parentheses:
//!
//! | condition      | introduces when true      | introduces when false     |
//! |----------------|---------------------------|---------------------------|
//! | `x instanceof T t` | `t`                   | -                         |
//! | `!a`           | when-false of `a`         | when-true of `a`          |
//! | `a && b`       | when-true of `a` and `b`  | -                         |
//! | `a \|\| b`     | -                         | when-false of `a` and `b` |

use jsolve_syntax::{BinaryOperator, NodeArena, NodeIndex, SyntaxKind, UnaryOperator};
use smallvec::SmallVec;

/// Type pattern nodes bound when `expr` evaluates to true.
pub fn bindings_when_true(arena: &NodeArena, expr: NodeIndex) -> SmallVec<[NodeIndex; 2]> {
    let mut out = SmallVec::new();
    collect(arena, expr, true, &mut out);
    out
}

/// Type pattern nodes bound when `expr` evaluates to false.
pub fn bindings_when_false(arena: &NodeArena, expr: NodeIndex) -> SmallVec<[NodeIndex; 2]> {
    let mut out = SmallVec::new();
    collect(arena, expr, false, &mut out);
    out
}

fn collect(arena: &NodeArena, expr: NodeIndex, when: bool, out: &mut SmallVec<[NodeIndex; 2]>) {
    let Some(node) = arena.get(expr) else {
        return;
    };
    match node.kind {
        SyntaxKind::InstanceOfExpression if when => {
            if let Some(data) = arena.get_instance_of(node)
                && data.pattern.is_some()
            {
                out.push(data.pattern);
            }
        }
        SyntaxKind::EnclosedExpression => {
            if let Some(data) = arena.get_wrapper(node) {
                collect(arena, data.expression, when, out);
            }
        }
        SyntaxKind::UnaryExpression => {
            if let Some(data) = arena.get_unary_expr(node)
                && data.operator == UnaryOperator::LogicalComplement
            {
                collect(arena, data.expression, !when, out);
            }
        }
        SyntaxKind::BinaryExpression => {
            if let Some(data) = arena.get_binary_expr(node) {
                let combines = match data.operator {
                    BinaryOperator::And => when,
                    BinaryOperator::Or => !when,
                    _ => false,
                };
                if combines {
                    collect(arena, data.left, when, out);
                    collect(arena, data.right, when, out);
                }
            }
        }
        _ => {}
    }
}

/// Whether `stmt` never completes normally: a `return`, or a block whose last
/// statement never completes normally.
pub fn never_completes(arena: &NodeArena, stmt: NodeIndex) -> bool {
    let Some(node) = arena.get(stmt) else {
        return false;
    };
    match node.kind {
        SyntaxKind::ReturnStatement => true,
        SyntaxKind::Block => arena
            .get_block(node)
            .and_then(|b| b.statements.nodes.last().copied())
            .is_some_and(|last| never_completes(arena, last)),
        _ => false,
    }
}
