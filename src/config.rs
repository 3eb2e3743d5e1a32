//! Resolver configuration.
//!
//! A `ResolverConfig` describes which type solvers sit behind the source
//! solver, in lookup order, and the options the facade runs with:
//!
//! ```json
//! {
//!   "solvers": [
//!     { "kind": "runtime", "jreOnly": false },
//!     { "kind": "classPath", "directories": ["build/classes"] }
//!   ],
//!   "cache": true,
//!   "limits": { "maxQueryDepth": 256 }
//! }
//! ```

use jsolve_checker::{FacadeOptions, QueryLimits};
use jsolve_common::{ResolveError, ResolveResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One entry of the solver chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", deny_unknown_fields)]
pub enum SolverEntry {
    /// The built-in catalog of platform types.
    #[serde(rename_all = "camelCase")]
    Runtime {
        /// Serve only `java.` and `javax.` names from the catalog.
        #[serde(default)]
        jre_only: bool,
    },
    /// Compiled class files under the given root directories.
    ClassPath { directories: Vec<PathBuf> },
}

/// Recursion limits, each falling back to the facade default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LimitsConfig {
    #[serde(default)]
    pub max_query_depth: Option<u32>,
    #[serde(default)]
    pub max_expr_depth: Option<u32>,
}

impl LimitsConfig {
    pub fn resolve(self) -> QueryLimits {
        let defaults = QueryLimits::default();
        QueryLimits {
            max_query_depth: self.max_query_depth.unwrap_or(defaults.max_query_depth),
            max_expr_depth: self.max_expr_depth.unwrap_or(defaults.max_expr_depth),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolverConfig {
    /// Solvers consulted after the source solver, in order.
    #[serde(default = "default_solvers")]
    pub solvers: Vec<SolverEntry>,
    #[serde(default = "default_cache")]
    pub cache: bool,
    /// Continue past children that fail with configuration errors.
    #[serde(default)]
    pub skip_configuration_errors: bool,
    #[serde(default)]
    pub limits: LimitsConfig,
}

fn default_solvers() -> Vec<SolverEntry> {
    vec![SolverEntry::Runtime { jre_only: false }]
}

const fn default_cache() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            solvers: default_solvers(),
            cache: default_cache(),
            skip_configuration_errors: false,
            limits: LimitsConfig::default(),
        }
    }
}

impl ResolverConfig {
    pub fn from_json_str(source: &str) -> ResolveResult<Self> {
        serde_json::from_str(source).map_err(|err| ResolveError::configuration("resolver config", err.to_string()))
    }

    pub fn from_path(path: &Path) -> ResolveResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| {
            ResolveError::configuration(path.display().to_string(), format!("cannot read config: {err}"))
        })?;
        serde_json::from_str(&source)
            .map_err(|err| ResolveError::configuration(path.display().to_string(), err.to_string()))
    }

    pub fn facade_options(&self) -> FacadeOptions {
        FacadeOptions {
            cache: self.cache,
            limits: self.limits.resolve(),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
