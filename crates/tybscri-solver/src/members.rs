//! Member lookup.
//!
//! For a `Regular` type, members are searched on the type itself and then up
//! the base chain; the first level that declares the name wins. For a union,
//! each alternative's member table is computed independently and the tables
//! are reduced pairwise: a name survives only if every alternative declares
//! it exactly once with an equivalent type and the same const-ness. Names
//! that disagree are dropped, never merged.

use crate::def::DefinitionStore;
use crate::instantiate::{base_of, members_of};
use crate::relations::are_equivalent;
use crate::types::{MemberDef, Name, Type};
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;
use tybscri_common::limits::MAX_BASE_CHAIN_DEPTH;

/// Visible members of a type, keyed by name in declaration order. A name
/// maps to more than one definition when it is overloaded at its declaring
/// level.
pub type MemberTable = IndexMap<Name, SmallVec<[MemberDef; 1]>>;

/// All members named `name` that are visible on `ty`.
pub fn find_members_by_name(db: &DefinitionStore, ty: &Type, name: &str) -> Vec<MemberDef> {
    match ty {
        Type::Regular(_) => {
            let mut current = Some(ty.clone());
            let mut steps = 0;
            while let Some(Type::Regular(regular)) = current {
                let found: Vec<MemberDef> = members_of(db, &regular)
                    .into_iter()
                    .filter(|member| &*member.name == name)
                    .collect();
                if !found.is_empty() {
                    return found;
                }
                steps += 1;
                if steps > MAX_BASE_CHAIN_DEPTH {
                    break;
                }
                current = base_of(db, &regular);
            }
            Vec::new()
        }
        Type::Union(_) => member_table(db, ty)
            .swap_remove(name)
            .map(SmallVec::into_vec)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Every member visible on `ty`. Derived members shadow base members of the
/// same name.
pub fn member_table(db: &DefinitionStore, ty: &Type) -> MemberTable {
    match ty {
        Type::Regular(_) => {
            let mut table = MemberTable::new();
            let mut current = Some(ty.clone());
            let mut steps = 0;
            while let Some(Type::Regular(regular)) = current {
                let mut level = MemberTable::new();
                for member in members_of(db, &regular) {
                    if !table.contains_key(&member.name) {
                        level.entry(member.name.clone()).or_default().push(member);
                    }
                }
                table.extend(level);
                steps += 1;
                if steps > MAX_BASE_CHAIN_DEPTH {
                    break;
                }
                current = base_of(db, &regular);
            }
            table
        }
        Type::Union(union) => {
            let tables: Vec<MemberTable> = union
                .members
                .iter()
                .map(|member| member_table(db, member))
                .collect();
            intersect_member_tables(db, tables)
        }
        _ => MemberTable::new(),
    }
}

/// Reduce the tables of a union's alternatives to the members all of them
/// agree on.
pub fn intersect_member_tables(db: &DefinitionStore, tables: Vec<MemberTable>) -> MemberTable {
    let mut tables = tables.into_iter();
    let Some(first) = tables.next() else {
        return MemberTable::new();
    };
    let seed: MemberTable = first
        .into_iter()
        .filter(|(_, defs)| defs.len() == 1)
        .collect();

    tables.fold(seed, |mut acc, other| {
        acc.retain(|name, defs| {
            let keep = match other.get(name) {
                Some(other_defs) if other_defs.len() == 1 => {
                    members_agree(db, &defs[0], &other_defs[0])
                }
                _ => false,
            };
            if !keep {
                trace!(member = %name, "dropping member absent or disagreeing across union");
            }
            keep
        });
        acc
    })
}

fn members_agree(db: &DefinitionStore, a: &MemberDef, b: &MemberDef) -> bool {
    a.is_const == b.is_const && are_equivalent(db, &a.ty, &b.ty)
}
