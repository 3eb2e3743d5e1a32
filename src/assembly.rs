//! Solver chain assembly from a [`ResolverConfig`].

use crate::config::{ResolverConfig, SolverEntry};
use jsolve_checker::{FacadeOptions, ResolutionFacade};
use jsolve_common::ResolveResult;
use jsolve_solver::{
    ClassFileTypeSolver, CombinedTypeSolver, ExceptionHandler, RuntimeTypeSolver, SourceTypeSolver,
    TypeSolver,
};
use jsolve_syntax::SourceUnit;
use std::sync::Arc;
use tracing::{debug, info};

/// A composed solver chain and the options its facade runs with.
#[derive(Debug)]
pub struct SolverAssembly {
    pub solver: Arc<CombinedTypeSolver>,
    pub options: FacadeOptions,
}

impl SolverAssembly {
    /// Compose `[source(units), ...configured]` in configuration order.
    ///
    /// Class path directories are checked here, so a missing directory
    /// fails before any query runs.
    pub fn build(config: &ResolverConfig, units: Vec<Arc<SourceUnit>>) -> ResolveResult<Self> {
        let mut children: Vec<Arc<dyn TypeSolver>> = Vec::with_capacity(config.solvers.len() + 1);
        debug!(units = units.len(), "source solver");
        children.push(Arc::new(SourceTypeSolver::new(units)));

        for entry in &config.solvers {
            let child: Arc<dyn TypeSolver> = match entry {
                SolverEntry::Runtime { jre_only: true } => Arc::new(RuntimeTypeSolver::jre_only()?),
                SolverEntry::Runtime { jre_only: false } => Arc::new(RuntimeTypeSolver::new()?),
                SolverEntry::ClassPath { directories } => {
                    Arc::new(ClassFileTypeSolver::new(directories.iter().cloned())?)
                }
            };
            debug!(solver = child.label(), "configured solver");
            children.push(child);
        }

        let handler = if config.skip_configuration_errors {
            ExceptionHandler::SkipConfigurationErrors
        } else {
            ExceptionHandler::Propagate
        };
        let solver = CombinedTypeSolver::with_handler(children, handler)?;
        info!(children = solver.children().len(), ?handler, "solver chain assembled");
        Ok(Self {
            solver,
            options: config.facade_options(),
        })
    }

    pub fn into_facade(self) -> ResolutionFacade {
        ResolutionFacade::with_options(self.solver as Arc<dyn TypeSolver>, self.options)
    }
}

/// Build a facade over `units` and the configured solvers.
pub fn facade_for(config: &ResolverConfig, units: Vec<Arc<SourceUnit>>) -> ResolveResult<ResolutionFacade> {
    Ok(SolverAssembly::build(config, units)?.into_facade())
}
