//! Executable-form generation.
//!
//! Phase 3 of the resolver: turns a checked tree into an `ExecNode` tree for
//! an execution backend.
//! - `ir` - the executable form
//! - `generator` - the generation walk
//! - `printer` - text rendering for logs and tests

pub mod error;
pub mod generator;
pub mod ir;
pub mod printer;

pub use error::GenerateError;
pub use generator::{Generator, generate};
pub use ir::{ConstantValue, ExecKind, ExecNode, ExecParameter};
pub use printer::print_exec;

#[cfg(test)]
#[path = "../tests/generator_tests.rs"]
mod generator_tests;
