//! Centralized limits and thresholds for the resolver.
//!
//! Recursion limits for the solver's hierarchy walks are expressed through
//! `jsolve_solver::recursion::RecursionProfile`; the constants here cover the
//! checker-side walks and fixed capacities.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for expression type calculation.
///
/// Each nested expression adds a frame to the call stack. Beyond this depth
/// the resolver reports a cyclic resolution instead of overflowing.
///
/// ```java
/// int x = ((((((((((1 + 2) + 3) + 4) /* ... 500 levels ... */)))));
/// ```
pub const MAX_EXPR_DEPTH: u32 = 500;

/// Maximum number of nested resolution queries on a single call path.
///
/// A query (declaration, type, type node) may trigger further queries, e.g.
/// typing `a.b().c` resolves `a`, then `b`, then `c`. The nesting is bounded
/// so that mutually dependent `var` initializers terminate.
pub const MAX_QUERY_DEPTH: u32 = 200;

/// Maximum supertype depth walked when collecting ancestors.
pub const MAX_HIERARCHY_DEPTH: u32 = 100;

/// Maximum depth for generic type substitution.
///
/// Guards against self-referential argument chains such as
/// `class Foo<T extends Foo<Foo<T>>>` being expanded without bound.
pub const MAX_SUBSTITUTION_DEPTH: u32 = 50;

/// Maximum depth for JVM signature parsing.
///
/// Signatures nest through type arguments; legitimate class files stay far
/// below this.
pub const MAX_SIGNATURE_DEPTH: u32 = 64;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum number of constant pool entries accepted from a class file.
pub const MAX_CONSTANT_POOL_ENTRIES: usize = u16::MAX as usize;

/// Stack red zone used with `stacker::maybe_grow` in deep recursion.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Stack segment allocated by `stacker::maybe_grow` when the red zone is hit.
pub const STACK_GROW_SIZE: usize = 1024 * 1024;
