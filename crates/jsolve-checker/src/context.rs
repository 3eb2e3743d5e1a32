//! Per-query state.
//!
//! Every outermost facade call creates one `QueryContext`. It carries the
//! (node, query) pairs currently on the call path, the expression nesting
//! depth, and the parameter types assumed for lambdas while a generic call
//! is being inferred. Nothing in here outlives the call that created it.

use crate::cache::QueryKind;
use jsolve_common::{ResolveError, ResolveResult, limits};
use jsolve_solver::{RecursionGuard, RecursionProfile, RecursionResult, ResolvedType};
use jsolve_syntax::{NodeIndex, NodeRef};
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::debug;

/// A query on the active path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub node: NodeRef,
    pub kind: QueryKind,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.node.node.0)
    }
}

/// Limits a context is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_query_depth: u32,
    pub max_expr_depth: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_query_depth: limits::MAX_QUERY_DEPTH,
            max_expr_depth: limits::MAX_EXPR_DEPTH,
        }
    }
}

pub struct QueryContext {
    guard: RecursionGuard<QueryKey>,
    expr_depth: u32,
    max_expr_depth: u32,
    /// Parameter types assumed for implicitly typed lambdas.
    lambda_parameters: FxHashMap<NodeIndex, Vec<ResolvedType>>,
}

impl QueryContext {
    pub fn new(limits: QueryLimits) -> Self {
        Self {
            guard: RecursionGuard::new(
                limits.max_query_depth,
                RecursionProfile::Query.max_iterations(),
            ),
            expr_depth: 0,
            max_expr_depth: limits.max_expr_depth,
            lambda_parameters: FxHashMap::default(),
        }
    }

    /// Put `key` on the active path. Re-entering a key already on the path
    /// is a cycle.
    pub fn enter(&mut self, key: QueryKey) -> ResolveResult<()> {
        match self.guard.enter(key) {
            RecursionResult::Entered => Ok(()),
            RecursionResult::Cycle => {
                let path = self.guard.describe_cycle(&key);
                debug!(%path, "query cycle");
                Err(ResolveError::cyclic(path))
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                let path: Vec<String> = self.guard.path().map(ToString::to_string).collect();
                debug!(depth = self.guard.depth(), "query depth exceeded");
                Err(ResolveError::cyclic(format!(
                    "query limit exceeded at {key}: {}",
                    path.join(" -> ")
                )))
            }
        }
    }

    pub fn leave(&mut self, key: &QueryKey) {
        self.guard.leave(key);
    }

    pub fn is_active(&self, key: &QueryKey) -> bool {
        self.guard.is_visiting(key)
    }

    pub fn depth(&self) -> u32 {
        self.guard.depth()
    }

    /// Count one level of expression nesting; `false` once the limit is hit.
    pub fn enter_expression(&mut self) -> bool {
        if self.expr_depth >= self.max_expr_depth {
            return false;
        }
        self.expr_depth += 1;
        true
    }

    pub fn leave_expression(&mut self) {
        self.expr_depth = self.expr_depth.saturating_sub(1);
    }

    pub fn assume_lambda_parameters(&mut self, lambda: NodeIndex, types: Vec<ResolvedType>) {
        self.lambda_parameters.insert(lambda, types);
    }

    pub fn forget_lambda_parameters(&mut self, lambda: NodeIndex) {
        self.lambda_parameters.remove(&lambda);
    }

    pub fn assumed_lambda_parameter(&self, lambda: NodeIndex, index: usize) -> Option<&ResolvedType> {
        self.lambda_parameters.get(&lambda)?.get(index)
    }

    /// Answers computed under assumptions must not be recorded.
    pub fn is_speculative(&self) -> bool {
        !self.lambda_parameters.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;
