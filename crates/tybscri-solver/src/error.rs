//! Fatal solver errors.
//!
//! These signal misuse of the type model API (a driver or host bug), never a
//! problem in the user's script. Script-level type errors are reported as
//! diagnostics by the checker.

use crate::def::DefId;
use crate::types::Name;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("type '{name}' expects {expected} type argument(s), got {actual}")]
    TypeArgumentArity {
        name: Name,
        expected: usize,
        actual: usize,
    },
    #[error("type '{name}' is not an unbound generic definition")]
    NotGeneric { name: String },
    #[error("definition {0:?} is not registered in this store")]
    UnknownDefinition(DefId),
}
