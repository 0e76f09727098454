//! Syntax tree storage for the Tybscri resolver.
//!
//! The tree is produced by an external parser. This crate only defines the
//! node variants, the arena they live in and a builder for constructing
//! trees without a parser.

pub mod arena;
pub mod builder;
pub mod node;

pub use arena::NodeArena;
pub use builder::TreeBuilder;
pub use node::{LambdaParameter, LiteralToken, Node, NodeIndex, NodeKind};

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod tests;
