//! Tracing configuration for debugging resolution.
//!
//! Supports three output formats controlled by `TYBSCRI_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   phase and per nested node resolution
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Phase spans and diagnostics
//! TYBSCRI_LOG=debug TYBSCRI_LOG_FORMAT=tree cargo test -p tybscri
//!
//! # Every node resolution, narrowing and member lookup
//! TYBSCRI_LOG="tybscri_checker=trace,tybscri_solver=trace" TYBSCRI_LOG_FORMAT=tree cargo test
//! ```
//!
//! The subscriber is only initialised when `TYBSCRI_LOG` (or `RUST_LOG`) is
//! set, so hosts that never ask for logs pay nothing.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unrecognised names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("TYBSCRI_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `TYBSCRI_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("TYBSCRI_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TYBSCRI_LOG` nor `RUST_LOG` is set. Output
/// goes to stderr. Calling this after a global subscriber is already
/// installed is a no-op.
pub fn init_tracing() {
    let has_tybscri_log = std::env::var("TYBSCRI_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_tybscri_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish()
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
