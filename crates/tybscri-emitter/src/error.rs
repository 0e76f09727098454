//! Generation failures.
//!
//! Each variant means generation was asked for something phase 2 never
//! produced. They are driver bugs and are not reported as diagnostics.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("node {node} cannot be generated in state {state}")]
    PhaseOrder { node: u32, state: &'static str },
    #[error("{kind} node {node} has no {binding} binding")]
    MissingBinding {
        node: u32,
        kind: &'static str,
        binding: &'static str,
    },
    #[error("symbol {symbol} is not in the symbol table")]
    MissingSymbol { symbol: u32 },
    #[error("{kind} node {node} is not an expression")]
    NotAnExpression { node: u32, kind: &'static str },
}
