//! Scope and symbol model.
//!
//! Scopes form immutable parent chains; symbols are polymorphic over
//! source declarations, lambda parameters, host-supplied externals and
//! narrowed views of another symbol.

pub mod scopes;
pub mod symbols;
pub mod table;

pub use scopes::{ScopeArena, ScopeData, ScopeId};
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolKind};
pub use table::SymbolTable;

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
