//! Host-provided type environment shared by every tree checked against it.

use tybscri_solver::{DefinitionStore, TypeTable, WellKnownTypes};

/// Definitions, built-in types and the named-type table.
///
/// Hosts register their own definitions in `definitions` and expose them to
/// scripts through `types` before checking any tree. The environment is only
/// read during checking.
#[derive(Clone, Debug)]
pub struct TypeEnvironment {
    pub definitions: DefinitionStore,
    pub well_known: WellKnownTypes,
    pub types: TypeTable,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        let mut definitions = DefinitionStore::new();
        let well_known = WellKnownTypes::install(&mut definitions);
        let types = TypeTable::with_builtins(&well_known);
        Self {
            definitions,
            well_known,
            types,
        }
    }
}

impl Default for TypeEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
