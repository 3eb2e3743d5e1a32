//! Numeric promotion and operator result types (JLS 5.6, 15.15-15.25).

use crate::types::{PrimitiveKind, ResolvedType, STRING};
use jsolve_syntax::{BinaryOperator, UnaryOperator};

/// `byte`, `short` and `char` promote to `int`.
pub fn unary_numeric_promotion(kind: PrimitiveKind) -> PrimitiveKind {
    match kind {
        PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char => PrimitiveKind::Int,
        other => other,
    }
}

pub fn binary_numeric_promotion(left: PrimitiveKind, right: PrimitiveKind) -> PrimitiveKind {
    use PrimitiveKind::*;
    if left == Double || right == Double {
        Double
    } else if left == Float || right == Float {
        Float
    } else if left == Long || right == Long {
        Long
    } else {
        Int
    }
}

/// Result type of `left op right`, `None` when the operand types do not
/// admit the operator.
pub fn binary_result_type(
    operator: BinaryOperator,
    left: &ResolvedType,
    right: &ResolvedType,
) -> Option<ResolvedType> {
    let boolean = ResolvedType::Primitive(PrimitiveKind::Boolean);
    match operator {
        BinaryOperator::Plus
            if left.is_reference_named(STRING) || right.is_reference_named(STRING) =>
        {
            Some(ResolvedType::string())
        }
        BinaryOperator::Or | BinaryOperator::And => Some(boolean),
        BinaryOperator::Equals | BinaryOperator::NotEquals => Some(boolean),
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEquals
        | BinaryOperator::GreaterEquals => Some(boolean),
        BinaryOperator::BinaryAnd | BinaryOperator::BinaryOr | BinaryOperator::Xor => {
            if left.is_boolean_like() && right.is_boolean_like() {
                return Some(boolean);
            }
            let (l, r) = (left.numeric_kind()?, right.numeric_kind()?);
            (l.is_integral() && r.is_integral())
                .then(|| ResolvedType::Primitive(binary_numeric_promotion(l, r)))
        }
        BinaryOperator::LeftShift
        | BinaryOperator::SignedRightShift
        | BinaryOperator::UnsignedRightShift => {
            let l = left.numeric_kind()?;
            l.is_integral()
                .then(|| ResolvedType::Primitive(unary_numeric_promotion(l)))
        }
        BinaryOperator::Plus
        | BinaryOperator::Minus
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Remainder => {
            let (l, r) = (left.numeric_kind()?, right.numeric_kind()?);
            Some(ResolvedType::Primitive(binary_numeric_promotion(l, r)))
        }
    }
}

pub fn unary_result_type(operator: UnaryOperator, operand: &ResolvedType) -> Option<ResolvedType> {
    match operator {
        UnaryOperator::LogicalComplement => Some(ResolvedType::Primitive(PrimitiveKind::Boolean)),
        UnaryOperator::Plus | UnaryOperator::Minus | UnaryOperator::BitwiseComplement => operand
            .numeric_kind()
            .map(|kind| ResolvedType::Primitive(unary_numeric_promotion(kind))),
        UnaryOperator::PrefixIncrement
        | UnaryOperator::PrefixDecrement
        | UnaryOperator::PostfixIncrement
        | UnaryOperator::PostfixDecrement => Some(operand.clone()),
    }
}

/// Type of `c ? a : b` when both branches are numeric (JLS 15.25.2,
/// without the constant-fits rules).
pub fn numeric_conditional_type(a: &ResolvedType, b: &ResolvedType) -> Option<ResolvedType> {
    let (ka, kb) = (a.numeric_kind()?, b.numeric_kind()?);
    if ka == kb {
        return Some(ResolvedType::Primitive(ka));
    }
    use PrimitiveKind::*;
    match (ka, kb) {
        (Byte, Short) | (Short, Byte) => Some(ResolvedType::Primitive(Short)),
        _ => Some(ResolvedType::Primitive(binary_numeric_promotion(ka, kb))),
    }
}

#[cfg(test)]
#[path = "../tests/promotion_tests.rs"]
mod tests;
