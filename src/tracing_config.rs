//! Tracing setup for embedders and test runs.
//!
//! Three output formats, selected with `JSOLVE_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`, one level per nested query
//! - `json`: one JSON object per span or event
//!
//! ```bash
//! JSOLVE_LOG=debug JSOLVE_LOG_FORMAT=tree cargo test -p jsolve-checker
//! JSOLVE_LOG="jsolve_checker::overload=trace,jsolve_solver=debug" my-indexer
//! ```
//!
//! Nothing is installed unless `JSOLVE_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("JSOLVE_LOG_FORMAT").unwrap_or_default())
    }
}

/// `JSOLVE_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    match std::env::var("JSOLVE_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Returns `false` when logging was not requested or a subscriber is
/// already installed.
pub fn init_tracing() -> bool {
    if std::env::var_os("JSOLVE_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return false;
    }
    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree).try_init()
        }
        LogFormat::Json => {
            let json = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json).try_init()
        }
        LogFormat::Text => {
            let text = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text).try_init()
        }
    };
    installed.is_ok()
}
