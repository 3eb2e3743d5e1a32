//! Result of a lookup that may legitimately find nothing.

use jsolve_common::{ResolveError, ResolveResult, SourceLocation};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolReference<T> {
    Solved(T),
    Unsolved,
}

impl<T> SymbolReference<T> {
    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Solved(value) => Some(value),
            Self::Unsolved => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Solved(value) => Some(value),
            Self::Unsolved => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SymbolReference<U> {
        match self {
            Self::Solved(value) => SymbolReference::Solved(f(value)),
            Self::Unsolved => SymbolReference::Unsolved,
        }
    }

    /// Convert into a demanded value; `Unsolved` becomes
    /// [`ResolveError::UnsolvedSymbol`].
    pub fn require(
        self,
        name: impl Into<Arc<str>>,
        location: SourceLocation,
    ) -> ResolveResult<T> {
        match self {
            Self::Solved(value) => Ok(value),
            Self::Unsolved => Err(ResolveError::unsolved(name, location)),
        }
    }
}

impl<T> From<Option<T>> for SymbolReference<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Solved(value),
            None => Self::Unsolved,
        }
    }
}
