//! Type-guard narrowing.
//!
//! Computes the type a const binding has inside a branch guarded by
//! `binding is Asserted`.

use crate::def::DefinitionStore;
use crate::factory::create_union;
use crate::relations::is_assignable;
use crate::types::Type;
use tracing::{Level, span, trace};

/// Narrow `declared` by the assertion that the value is an `asserted`.
///
/// - Already within the assertion: unchanged.
/// - Assertion more specific than the declaration: the asserted type.
/// - Union declaration: the alternatives compatible with the assertion,
///   each narrowed in turn.
/// - No overlap: `Never`.
pub fn narrow_to_asserted(db: &DefinitionStore, declared: &Type, asserted: &Type) -> Type {
    let _span = span!(Level::TRACE, "narrow_to_asserted").entered();

    if declared.is_unknown() {
        trace!("declared type unknown, taking asserted type");
        return asserted.clone();
    }
    if asserted.is_unknown() {
        return declared.clone();
    }
    if is_assignable(db, declared, asserted) {
        trace!("declared type already satisfies the guard");
        return declared.clone();
    }
    if is_assignable(db, asserted, declared) {
        trace!("guard is more specific than the declared type");
        return asserted.clone();
    }
    if let Some(members) = declared.union_members() {
        let narrowed: Vec<Type> = members
            .iter()
            .map(|member| narrow_to_asserted(db, member, asserted))
            .filter(|ty| !ty.is_never())
            .collect();
        trace!(survivors = narrowed.len(), "filtered union alternatives");
        return create_union(narrowed);
    }
    Type::Never
}
