//! Diagnostics derived from resolution failures.
//!
//! The resolver raises [`ResolveError`]s; consumers such as rule-based
//! validators that want to keep going downgrade them into [`Diagnostic`]s
//! with [`Diagnostic::from_error`].

use crate::error::ResolveError;
use crate::position::SourceLocation;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: &'static str,
    pub location: Option<SourceLocation>,
    pub message_text: String,
    pub related_information: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: &'static str, location: Option<SourceLocation>, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            location,
            message_text: message.into(),
            related_information: Vec::new(),
        }
    }

    pub fn warning(code: &'static str, location: Option<SourceLocation>, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            ..Self::error(code, location, message)
        }
    }

    pub fn with_related(mut self, message: impl Into<String>) -> Self {
        self.related_information.push(message.into());
        self
    }

    /// Downgrade a raised failure into a diagnostic.
    ///
    /// Ambiguous overloads keep each tied candidate as related information.
    pub fn from_error(error: &ResolveError) -> Self {
        let location = error.location().cloned();
        let mut diagnostic = Self::error(error.code(), location, error.to_string());
        if let ResolveError::AmbiguousOverload { candidates, .. } = error {
            for candidate in candidates {
                diagnostic = diagnostic.with_related(candidate.clone());
            }
        }
        diagnostic
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
