//! Primitive type keywords.
//!
//! Shared by the syntax tree (primitive type nodes) and the solver's
//! resolved type model.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Binary descriptor character.
    pub const fn descriptor(self) -> char {
        match self {
            Self::Boolean => 'Z',
            Self::Byte => 'B',
            Self::Short => 'S',
            Self::Char => 'C',
            Self::Int => 'I',
            Self::Long => 'J',
            Self::Float => 'F',
            Self::Double => 'D',
        }
    }

    pub fn from_descriptor(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.descriptor() == c)
    }

    /// Qualified name of the boxing class.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Char => "java.lang.Character",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.boxed_name() == name)
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Boolean)
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Char | Self::Int | Self::Long
        )
    }

    /// Identity or widening primitive conversion from `self` to `target`.
    pub const fn widens_to(self, target: Self) -> bool {
        use PrimitiveKind::*;
        match (self, target) {
            (Boolean, Boolean) => true,
            (Boolean, _) | (_, Boolean) => false,
            (Byte, Byte | Short | Int | Long | Float | Double) => true,
            (Short, Short | Int | Long | Float | Double) => true,
            (Char, Char | Int | Long | Float | Double) => true,
            (Int, Int | Long | Float | Double) => true,
            (Long, Long | Float | Double) => true,
            (Float, Float | Double) => true,
            (Double, Double) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
#[path = "../tests/primitive_tests.rs"]
mod tests;
