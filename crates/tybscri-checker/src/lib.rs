//! Scope wiring and type resolution.
//!
//! This crate implements the first two phases of the resolver:
//! - `scope_setup` - phase 1, scopes and symbol declarations
//! - `resolve`, `calls`, `declarations`, `type_refs` - phase 2 by construct
//! - `state` - the per-node state table both phases write
//! - `driver` - runs the phases over a tree in order
//! - `error_reporter` - diagnostic emission

pub mod calls;
pub mod context;
pub mod declarations;
pub mod driver;
pub mod environment;
pub mod error_reporter;
pub mod options;
pub mod resolve;
pub mod scope_setup;
pub mod state;
pub mod type_refs;

pub use context::{CheckerContext, CheckerState};
pub use driver::{CheckResult, check_tree};
pub use environment::TypeEnvironment;
pub use options::CheckerOptions;
pub use state::{NodeBinding, NodeScopes, NodeState, NodeStateTable, ResolvedNode, SymbolTypes};

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;

#[cfg(test)]
#[path = "../tests/resolve_tests.rs"]
mod resolve_tests;

#[cfg(test)]
#[path = "../tests/narrowing_tests.rs"]
mod narrowing_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod state_tests;
