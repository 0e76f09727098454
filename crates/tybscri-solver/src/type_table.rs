//! Host-supplied table of named types.
//!
//! Type references written in a script (`is` targets, annotations) are
//! resolved against this table, not against the value scope.

use crate::types::{Name, Type};
use crate::well_known::WellKnownTypes;
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: IndexMap<Name, Type>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the built-in type names.
    pub fn with_builtins(well_known: &WellKnownTypes) -> Self {
        let mut table = Self::new();
        table.insert("number", well_known.number.clone());
        table.insert("string", well_known.string.clone());
        table.insert("boolean", well_known.boolean.clone());
        table.insert("null", well_known.null.clone());
        table.insert("List", well_known.list.clone());
        table
    }

    /// Insert or replace a named type.
    pub fn insert(&mut self, name: &str, ty: Type) -> Option<Type> {
        self.entries.insert(Name::from(name), ty)
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
