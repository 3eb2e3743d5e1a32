//! Resolution failure taxonomy.
//!
//! Failures are explicit results. Lookups that may legitimately find nothing
//! return `SymbolReference::Unsolved` instead of an error; a [`ResolveError`]
//! is raised only when the caller demanded certainty, when a construct is
//! outside the supported surface, or when configuration is broken.
//!
//! Errors are `Clone` so that the resolution cache can record a failure once
//! and hand it back on every later query for the same node.

use crate::position::SourceLocation;
use std::sync::Arc;
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A name could not be resolved through any provider or scope.
    #[error("unsolved symbol `{name}` at {location}")]
    UnsolvedSymbol {
        name: Arc<str>,
        location: SourceLocation,
    },

    /// Overload resolution found no unique most specific candidate.
    #[error("ambiguous call to `{name}`, candidates: {}", candidates.join("; "))]
    AmbiguousOverload {
        name: Arc<str>,
        candidates: Vec<String>,
    },

    /// The node kind or shape is outside what the resolver handles.
    #[error("unsupported construct {construct} at {location}")]
    UnsupportedConstruct {
        construct: Arc<str>,
        location: SourceLocation,
    },

    /// A resolution re-entered itself, e.g. a type that is its own supertype.
    #[error("cyclic resolution: {path}")]
    CyclicResolution { path: Arc<str> },

    /// A provider could not be constructed from its configuration.
    #[error("configuration error in {source_name}: {reason}")]
    Configuration {
        source_name: Arc<str>,
        reason: Arc<str>,
    },
}

impl ResolveError {
    pub fn unsolved(name: impl Into<Arc<str>>, location: SourceLocation) -> Self {
        Self::UnsolvedSymbol {
            name: name.into(),
            location,
        }
    }

    pub fn unsupported(construct: impl Into<Arc<str>>, location: SourceLocation) -> Self {
        Self::UnsupportedConstruct {
            construct: construct.into(),
            location,
        }
    }

    pub fn cyclic(path: impl Into<Arc<str>>) -> Self {
        Self::CyclicResolution { path: path.into() }
    }

    pub fn configuration(source_name: impl Into<Arc<str>>, reason: impl Into<Arc<str>>) -> Self {
        Self::Configuration {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for the failure kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsolvedSymbol { .. } => "unsolved-symbol",
            Self::AmbiguousOverload { .. } => "ambiguous-overload",
            Self::UnsupportedConstruct { .. } => "unsupported-construct",
            Self::CyclicResolution { .. } => "cyclic-resolution",
            Self::Configuration { .. } => "configuration",
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::UnsolvedSymbol { location, .. } | Self::UnsupportedConstruct { location, .. } => {
                Some(location)
            }
            _ => None,
        }
    }

    pub fn is_unsolved(&self) -> bool {
        matches!(self, Self::UnsolvedSymbol { .. })
    }
}

#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod tests;
