//! Definition identifiers and storage for `Regular` types.
//!
//! A `Regular` type value is a lightweight reference (`DefId` + name + type
//! arguments). The definition it points at (base, members, type parameters)
//! lives here. Definitions are registered by the host before resolution
//! starts and are read-only afterwards, so a store can be shared between any
//! number of trees.
//!
//! Registration is two-step (`reserve`, then `define`) so that member types
//! can mention the definition being built:
//!
//! ```ignore
//! let list = store.reserve("List", vec![TypeParameter::new("T", Variance::Out)]);
//! let list_of_u = Type::Regular(Arc::new(RegularType { def: list, .. }));
//! store.define(list, None, vec![MemberDef::method("map", vec![u], func(.., list_of_u))]);
//! ```

use crate::types::{MemberDef, Name, RegularType, Type, TypeParameter};
use std::sync::Arc;
use tracing::trace;

/// Index of a definition in its `DefinitionStore`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefId(pub u32);

/// Stored data for a nominal type.
#[derive(Clone, Debug)]
pub struct RegularDef {
    pub name: Name,
    /// Single-inheritance base, expressed in terms of this definition's type
    /// parameters (e.g. `MutableList<T> : List<T>`).
    pub base: Option<Type>,
    pub members: Vec<MemberDef>,
    pub type_parameters: Option<Vec<TypeParameter>>,
}

impl RegularDef {
    pub fn is_generic(&self) -> bool {
        self.type_parameters.as_ref().is_some_and(|p| !p.is_empty())
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DefinitionStore {
    defs: Vec<RegularDef>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a definition with no base and no members yet.
    pub fn reserve(&mut self, name: &str, type_parameters: Vec<TypeParameter>) -> DefId {
        let id = DefId(self.defs.len() as u32);
        self.defs.push(RegularDef {
            name: Name::from(name),
            base: None,
            members: Vec::new(),
            type_parameters: if type_parameters.is_empty() {
                None
            } else {
                Some(type_parameters)
            },
        });
        trace!(def = id.0, name, "reserved definition");
        id
    }

    /// Fill in the base and members of a reserved definition.
    ///
    /// Each member's `owner` is set to the definition's name.
    pub fn define(&mut self, id: DefId, base: Option<Type>, members: Vec<MemberDef>) {
        let Some(def) = self.defs.get_mut(id.0 as usize) else {
            return;
        };
        let owner = def.name.clone();
        def.base = base;
        def.members = members
            .into_iter()
            .map(|member| MemberDef {
                owner: Some(owner.clone()),
                ..member
            })
            .collect();
    }

    /// Register a non-generic definition in one step and return its type.
    pub fn register(&mut self, name: &str, base: Option<Type>, members: Vec<MemberDef>) -> Type {
        let id = self.reserve(name, Vec::new());
        self.define(id, base, members);
        self.unbound(id)
    }

    pub fn get(&self, id: DefId) -> Option<&RegularDef> {
        self.defs.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// The definition's own type: the plain type for non-generic
    /// definitions, the unbound form for generic ones.
    pub fn unbound(&self, id: DefId) -> Type {
        let name = self
            .get(id)
            .map_or_else(|| Name::from("<invalid>"), |def| def.name.clone());
        Type::Regular(Arc::new(RegularType {
            def: id,
            name,
            type_arguments: None,
        }))
    }

    /// The definition instantiated with its own type parameters
    /// (`List<T>` inside the definition of `List`).
    pub fn self_instance(&self, id: DefId) -> Type {
        let Some(def) = self.get(id) else {
            return Type::Unknown;
        };
        let type_arguments = def
            .type_parameters
            .as_ref()
            .map(|params| params.iter().map(TypeParameter::to_type).collect());
        Type::Regular(Arc::new(RegularType {
            def: id,
            name: def.name.clone(),
            type_arguments,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Variance;

    #[test]
    fn test_define_sets_member_owner() {
        let mut store = DefinitionStore::new();
        let id = store.reserve("Point", Vec::new());
        store.define(id, None, vec![MemberDef::property("x", Type::Never)]);

        let def = store.get(id).expect("definition exists");
        assert_eq!(def.members[0].owner.as_deref(), Some("Point"));
        assert!(!def.is_generic());
    }

    #[test]
    fn test_self_instance_uses_own_parameters() {
        let mut store = DefinitionStore::new();
        let id = store.reserve("Box", vec![TypeParameter::new("T", Variance::Out)]);

        let Type::Regular(instance) = store.self_instance(id) else {
            panic!("expected a regular type");
        };
        let args = instance.type_arguments.as_ref().expect("bound");
        assert_eq!(args.len(), 1);
        assert!(matches!(&args[0], Type::TypeParameter(p) if &*p.name == "T"));

        let Type::Regular(unbound) = store.unbound(id) else {
            panic!("expected a regular type");
        };
        assert!(unbound.type_arguments.is_none());
    }
}
