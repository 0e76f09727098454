//! Tybscri resolver.
//!
//! Resolves a parsed Tybscri expression against host-supplied names and
//! types in three phases (scope wiring, type resolution, generation) and
//! hands back diagnostics plus an executable form.
//!
//! The phases live in the workspace crates re-exported below; this crate
//! runs them in order and configures logging.

// Crate re-exports
pub use tybscri_binder as binder;
pub use tybscri_checker as checker;
pub use tybscri_common as common;
pub use tybscri_emitter as emitter;
pub use tybscri_solver as solver;
pub use tybscri_syntax as syntax;

pub use tybscri_binder::{ScopeId, Symbol, SymbolTable};
pub use tybscri_checker::{CheckResult, CheckerOptions, TypeEnvironment};
pub use tybscri_common::{Diagnostic, DiagnosticSeverity, SourceSpan};
pub use tybscri_emitter::{ExecKind, ExecNode, GenerateError, print_exec};
pub use tybscri_solver::Type;
pub use tybscri_syntax::{NodeArena, NodeIndex, TreeBuilder};

// Compiler facade - runs all three phases
pub mod compiler;
pub use compiler::{Compilation, Compiler, compile_expression};

// Tracing subscriber setup (TYBSCRI_LOG / TYBSCRI_LOG_FORMAT)
pub mod tracing_config;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
