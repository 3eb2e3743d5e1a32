//! Recursion guard for cycle detection and depth limiting in hierarchy
//! walks, substitution and resolution queries.
//!
//! `RecursionGuard` combines three safety mechanisms:
//! 1. **Cycle detection** via an ordered visiting path
//! 2. **Depth limiting** to prevent stack overflow
//! 3. **Iteration bounding** to prevent runaway walks
//!
//! The visiting path is kept in entry order so that a detected cycle can be
//! reported as `A -> B -> A`.
//!
//! # Profiles
//!
//! [`RecursionProfile`] names the limit presets used at each call site:
//!
//! ```ignore
//! let mut guard = RecursionGuard::with_profile(RecursionProfile::Hierarchy);
//! ```

use indexmap::IndexSet;
use jsolve_common::limits;
use rustc_hash::FxBuildHasher;
use std::fmt::Display;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Supertype walks: ancestors, subtype tests, member lookup.
    ///
    /// depth = 100, iterations = 100,000
    Hierarchy,

    /// Generic substitution and erasure of nested type arguments.
    ///
    /// depth = 50, iterations = 100,000
    Substitution,

    /// Nested resolution queries on one call path (declaration, type, type
    /// node). Keeps mutually dependent `var` initializers finite.
    ///
    /// depth = 200, iterations = 1,000,000
    Query,
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::Hierarchy => limits::MAX_HIERARCHY_DEPTH,
            Self::Substitution => limits::MAX_SUBSTITUTION_DEPTH,
            Self::Query => limits::MAX_QUERY_DEPTH,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::Hierarchy | Self::Substitution => 100_000,
            Self::Query => 1_000_000,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being visited.
    Cycle,
    /// Maximum recursion depth exceeded.
    DepthExceeded,
    /// Maximum iteration count exceeded.
    IterationExceeded,
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks recursion state for cycle detection, depth limiting and iteration
/// bounding.
///
/// # Usage
///
/// ```ignore
/// match guard.enter(key.clone()) {
///     RecursionResult::Entered => {
///         let result = do_work();
///         guard.leave(&key);
///         result
///     }
///     RecursionResult::Cycle => Err(ResolveError::cyclic(guard.describe_cycle(&key))),
///     _ => Err(ResolveError::cyclic("depth exceeded")),
/// }
/// ```
///
/// In debug builds, dropping a guard with active entries panics, as does
/// leaving a key that was never entered.
pub struct RecursionGuard<K: Hash + Eq + Clone> {
    visiting: IndexSet<K, FxBuildHasher>,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl<K: Hash + Eq + Clone> RecursionGuard<K> {
    /// Create a guard with explicit limits.
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: IndexSet::default(),
            iterations: 0,
            max_depth,
            max_iterations,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter a recursive computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller must call
    /// [`leave`](Self::leave) with the same key when done.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            return RecursionResult::IterationExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.visiting.len() as u32 >= self.max_depth {
            return RecursionResult::DepthExceeded;
        }

        self.visiting.insert(key);
        RecursionResult::Entered
    }

    /// Leave a recursive computation for `key`.
    ///
    /// Entries are strictly nested, so `key` is always the innermost entry.
    pub fn leave(&mut self, key: &K) {
        let was_innermost = self.visiting.last() == Some(key);
        debug_assert!(
            was_innermost,
            "RecursionGuard::leave() called with a key that is not the innermost entry. \
             This indicates a double-leave or a leave without a matching enter()."
        );
        if was_innermost {
            self.visiting.pop();
        } else {
            self.visiting.shift_remove(key);
        }
    }

    #[inline]
    pub fn is_visiting(&self, key: &K) -> bool {
        self.visiting.contains(key)
    }

    /// Current recursion depth.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.visiting.len() as u32
    }

    /// Active entries, outermost first.
    pub fn path(&self) -> impl Iterator<Item = &K> + '_ {
        self.visiting.iter()
    }
}

impl<K: Hash + Eq + Clone + Display> RecursionGuard<K> {
    /// Render the cycle closed by re-entering `key`, e.g. `A -> B -> A`.
    pub fn describe_cycle(&self, key: &K) -> String {
        let start = self.visiting.get_index_of(key).unwrap_or(0);
        let mut parts: Vec<String> = self
            .visiting
            .iter()
            .skip(start)
            .map(ToString::to_string)
            .collect();
        parts.push(key.to_string());
        parts.join(" -> ")
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Clone> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries still in the visiting set. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.visiting.len(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// DepthCounter
// ---------------------------------------------------------------------------

/// A depth-only guard for walks that may legitimately revisit a key, such as
/// substituting the same type variable at several nesting levels.
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
    exceeded: bool,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth())
    }

    /// Returns `false` when the limit is reached; do not call `leave()` then.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "DepthCounter::leave() called at depth 0. \
             This indicates a leave without a matching enter()."
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
