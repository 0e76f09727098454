//! Constructors that normalize composite types.

use crate::def::DefinitionStore;
use crate::relations::is_assignable;
use crate::types::{Type, UnionType};
use std::sync::Arc;

/// Build a union from `members`.
///
/// Nested unions are flattened, `Never` members are dropped, structural
/// duplicates are removed (first occurrence wins), a single survivor is
/// returned as-is and an empty union is `Never`.
pub fn create_union(members: Vec<Type>) -> Type {
    fn push(ty: Type, flat: &mut Vec<Type>) {
        if !ty.is_never() && !flat.contains(&ty) {
            flat.push(ty);
        }
    }

    let mut flat: Vec<Type> = Vec::with_capacity(members.len());
    for member in members {
        match member {
            Type::Union(union) => {
                for inner in &union.members {
                    push(inner.clone(), &mut flat);
                }
            }
            other => push(other, &mut flat),
        }
    }
    match flat.len() {
        0 => Type::Never,
        1 => flat.swap_remove(0),
        _ => Type::Union(Arc::new(UnionType { members: flat })),
    }
}

/// Least general type both `a` and `b` are assignable to: whichever of the
/// two accepts the other, else their union.
pub fn common_supertype(db: &DefinitionStore, a: &Type, b: &Type) -> Type {
    if a.is_unknown() || b.is_unknown() {
        return Type::Unknown;
    }
    if is_assignable(db, a, b) {
        b.clone()
    } else if is_assignable(db, b, a) {
        a.clone()
    } else {
        create_union(vec![a.clone(), b.clone()])
    }
}
