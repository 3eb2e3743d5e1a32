//! Resolution facade.
//!
//! `ResolutionFacade` is the entry point embedders hold: one solver chain,
//! one cache, and the options every query runs under. Each call builds a
//! fresh [`ResolverState`] whose context lives for that call only.

use crate::cache::{CacheStats, ResolutionCache};
use crate::context::QueryLimits;
use crate::resolver::SymbolResolver;
use crate::state::ResolverState;
use jsolve_common::ResolveResult;
use jsolve_solver::{
    MethodUsage, ResolvedDeclaration, ResolvedType, SymbolReference, TypeDeclaration, TypeSolver,
};
use jsolve_syntax::{NodeIndex, SourceUnit};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Options a facade is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacadeOptions {
    /// Memoize answers in the facade's cache.
    pub cache: bool,
    pub limits: QueryLimits,
}

impl Default for FacadeOptions {
    fn default() -> Self {
        Self {
            cache: true,
            limits: QueryLimits::default(),
        }
    }
}

pub struct ResolutionFacade {
    solver: Arc<dyn TypeSolver>,
    cache: ResolutionCache,
    options: FacadeOptions,
}

impl fmt::Debug for ResolutionFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionFacade")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ResolutionFacade {
    pub fn new(solver: Arc<dyn TypeSolver>) -> Self {
        Self::with_options(solver, FacadeOptions::default())
    }

    pub fn with_options(solver: Arc<dyn TypeSolver>, options: FacadeOptions) -> Self {
        debug!(cache = options.cache, ?options.limits, "ResolutionFacade::new");
        Self {
            solver,
            cache: ResolutionCache::with_enabled(options.cache),
            options,
        }
    }

    pub fn solver(&self) -> &Arc<dyn TypeSolver> {
        &self.solver
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn options(&self) -> FacadeOptions {
        self.options
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn state<'a>(&'a self, unit: &'a SourceUnit) -> ResolverState<'a> {
        ResolverState::new(self, unit)
    }

    /// Like [`SymbolResolver::resolve_declaration`], with a reference that
    /// names nothing reported as `Unsolved` instead of an error.
    #[tracing::instrument(level = "debug", skip(self, unit), fields(path = %unit.path(), node = node.0))]
    pub fn solve(&self, unit: &SourceUnit, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        self.state(unit).declaration(node)
    }

    /// The method a call invokes, seen through its receiver with inferred
    /// type arguments substituted.
    #[tracing::instrument(level = "debug", skip(self, unit), fields(path = %unit.path(), node = call.0))]
    pub fn solve_method_usage(&self, unit: &SourceUnit, call: NodeIndex) -> ResolveResult<SymbolReference<MethodUsage>> {
        Ok(self.state(unit).solve_method_call(call)?.map(|solved| solved.usage))
    }
}

impl SymbolResolver for ResolutionFacade {
    #[tracing::instrument(level = "debug", skip(self, unit), fields(path = %unit.path(), node = node.0))]
    fn resolve_declaration(&self, unit: &SourceUnit, node: NodeIndex) -> ResolveResult<ResolvedDeclaration> {
        let mut state = self.state(unit);
        let reference = state.declaration(node)?;
        reference.require(state.reference_name(node), unit.location_of(node))
    }

    #[tracing::instrument(level = "debug", skip(self, unit), fields(path = %unit.path(), node = type_node.0))]
    fn to_resolved_type(&self, unit: &SourceUnit, type_node: NodeIndex) -> ResolveResult<ResolvedType> {
        self.state(unit).type_node(type_node)
    }

    #[tracing::instrument(level = "debug", skip(self, unit), fields(path = %unit.path(), node = expr.0))]
    fn calculate_type(&self, unit: &SourceUnit, expr: NodeIndex) -> ResolveResult<ResolvedType> {
        self.state(unit).expression_type(expr)
    }

    #[tracing::instrument(level = "debug", skip(self, unit), fields(path = %unit.path(), node = node.0))]
    fn to_type_declaration(&self, unit: &SourceUnit, node: NodeIndex) -> ResolveResult<Arc<TypeDeclaration>> {
        self.state(unit).type_declaration(node)
    }
}
