//! Common types and utilities for the jsolve symbol resolver.
//!
//! This crate provides foundational types used across all jsolve crates:
//! - Source positions (`LineMap`, `SourceLocation`)
//! - Resolution limits and thresholds
//! - The resolution failure taxonomy (`ResolveError`)
//! - Diagnostics derived from resolution failures
//! - Primitive type keywords shared by syntax and solver

// Centralized limits and thresholds
pub mod limits;

// Line/column source locations
pub mod position;
pub use position::{LineMap, Position, SourceLocation};

// Resolution failures
pub mod error;
pub use error::{ResolveError, ResolveResult};

// Diagnostics for downstream validators
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Primitive keywords
pub mod primitive;
pub use primitive::PrimitiveKind;
