//! Operator tokens carried by expression nodes.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BinaryOr,
    BinaryAnd,
    Xor,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BinaryOr => "|",
            Self::BinaryAnd => "&",
            Self::Xor => "^",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::LeftShift => "<<",
            Self::SignedRightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }

    pub const fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::Less
                | Self::Greater
                | Self::LessEquals
                | Self::GreaterEquals
        )
    }

    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::Or | Self::And)
    }

    pub const fn is_shift(self) -> bool {
        matches!(
            self,
            Self::LeftShift | Self::SignedRightShift | Self::UnsignedRightShift
        )
    }

    pub const fn is_bitwise(self) -> bool {
        matches!(self, Self::BinaryOr | Self::BinaryAnd | Self::Xor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
    PrefixIncrement,
    PrefixDecrement,
    LogicalComplement,
    BitwiseComplement,
    PostfixIncrement,
    PostfixDecrement,
}

impl UnaryOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::PrefixIncrement | Self::PostfixIncrement => "++",
            Self::PrefixDecrement | Self::PostfixDecrement => "--",
            Self::LogicalComplement => "!",
            Self::BitwiseComplement => "~",
        }
    }

    pub const fn is_increment_or_decrement(self) -> bool {
        matches!(
            self,
            Self::PrefixIncrement
                | Self::PrefixDecrement
                | Self::PostfixIncrement
                | Self::PostfixDecrement
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    BinaryAnd,
    BinaryOr,
    Xor,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
}

impl AssignOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Plus => "+=",
            Self::Minus => "-=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
            Self::Remainder => "%=",
            Self::BinaryAnd => "&=",
            Self::BinaryOr => "|=",
            Self::Xor => "^=",
            Self::LeftShift => "<<=",
            Self::SignedRightShift => ">>=",
            Self::UnsignedRightShift => ">>>=",
        }
    }
}
