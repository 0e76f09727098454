//! Type model and relation solver.
//!
//! This crate implements the structural type lattice the resolver checks
//! against:
//!
//! - **Types**: literal, union, function and nominal (`Regular`) types, plus
//!   the `Unknown` recovery sentinel and the `Never` bottom type
//! - **Definitions**: `Regular` types reference a `DefinitionStore` entry so
//!   generic definitions can mention their own instantiations
//! - **Relations**: assignability and equivalence, with variance-aware
//!   comparison of generic instantiations
//! - **Members**: lookup through base chains and n-way intersection across
//!   union alternatives
//! - **Generics**: binding, substitution and call-site inference
//! - **Narrowing**: the type a binding has under an `is` guard
//!
//! Type values are immutable and cheap to clone.
pub mod def;
pub mod error;
pub mod factory;
pub mod format;
pub mod infer;
pub mod instantiate;
pub mod members;
pub mod narrowing;
pub mod relations;
pub mod type_table;
pub mod types;
pub mod well_known;

pub use def::{DefId, DefinitionStore, RegularDef};
pub use error::SolverError;
pub use factory::{common_supertype, create_union};
pub use format::{TypeFormatter, format_type};
pub use infer::TypeArgumentInference;
pub use instantiate::{
    TypeSubstitution, base_of, bind_type_parameters, free_type_parameters, instantiate_type,
    members_of,
};
pub use members::{MemberTable, find_members_by_name, intersect_member_tables, member_table};
pub use narrowing::narrow_to_asserted;
pub use relations::{AssignabilityChecker, are_equivalent, is_assignable};
pub use type_table::TypeTable;
pub use types::{
    FuncType, LiteralType, LiteralValue, MemberDef, Name, ParameterDef, RegularType, Type,
    TypeParameter, UnionType, Variance,
};
pub use well_known::WellKnownTypes;

#[cfg(test)]
#[path = "../tests/relations_tests.rs"]
mod relations_tests;

#[cfg(test)]
#[path = "../tests/generic_tests.rs"]
mod generic_tests;

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod members_tests;

#[cfg(test)]
#[path = "../tests/narrowing_tests.rs"]
mod narrowing_tests;
