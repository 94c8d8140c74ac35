//! Tracing setup for the `drex` binary.
//!
//! Directives come from `DREX_LOG`, then `RUST_LOG`, then the `-v` count of
//! the command line:
//!
//! - `-v`: provider decisions (`debug` for the drex crates)
//! - `-vv`: codec and index lookups too (`trace`)
//!
//! Output format is selected with `DREX_LOG_FORMAT` (`text`, `tree`, `json`).
//!
//! ```bash
//! # Why did this token not resolve?
//! DREX_LOG_FORMAT=tree drex -vv resolve '<token>'
//!
//! # Only the resolver, machine-readable
//! DREX_LOG=drex_types::resolver=trace DREX_LOG_FORMAT=json drex infer node
//! ```
//!
//! Nothing is installed when no directives apply.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Crates whose spans and events `-v` turns on.
const DREX_TARGETS: &[&str] = &["drex", "drex_index", "drex_types", "drex_ide"];

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `DREX_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Directives for a `-v` count: `warn` everywhere, the drex crates louder.
pub fn verbosity_directives(verbosity: u8) -> Option<String> {
    let level = match verbosity {
        0 => return None,
        1 => "debug",
        _ => "trace",
    };
    let mut directives = String::from("warn");
    for target in DREX_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    Some(directives)
}

/// `DREX_LOG` wins over `RUST_LOG`, which wins over the `-v` count.
pub fn select_directives(
    drex_log: Option<String>,
    rust_log: Option<String>,
    verbosity: u8,
) -> Option<String> {
    [drex_log, rust_log]
        .into_iter()
        .flatten()
        .find(|directives| !directives.trim().is_empty())
        .or_else(|| verbosity_directives(verbosity))
}

/// Install the global subscriber, writing to stderr.
///
/// Stdout carries command output (tokens, JSON), so logs never go there.
pub fn init_tracing(verbosity: u8) {
    let Some(directives) = select_directives(
        std::env::var("DREX_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
        verbosity,
    ) else {
        return;
    };

    let filter = EnvFilter::builder().parse_lossy(directives);
    let format = LogFormat::parse(&std::env::var("DREX_LOG_FORMAT").unwrap_or_default());
    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
