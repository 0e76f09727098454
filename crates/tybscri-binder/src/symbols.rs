//! Symbols in their declared stage.
//!
//! A symbol records what a name refers to, never its resolved value type.
//! Value types of source-declared and narrowed symbols are computed by the
//! checker in phase 2 and kept in its own table.

use tybscri_solver::{Name, Type};
use tybscri_syntax::NodeIndex;

/// Unique identifier for a symbol in a `SymbolArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub enum SymbolKind {
    /// `const`/`let` declaration in the script.
    Source {
        declaration: NodeIndex,
        is_const: bool,
    },
    /// Parameter `index` of a lambda. The implicit parameter is index 0 of a
    /// lambda that declares none.
    Parameter { lambda: NodeIndex, index: usize },
    /// Supplied by the host with a fixed type.
    External { ty: Type, is_const: bool },
    /// `original` seen through the `is` guard at `guard`.
    Narrowed { original: SymbolId, guard: NodeIndex },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: Name,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn external(name: &str, ty: Type) -> Self {
        Self {
            name: Name::from(name),
            kind: SymbolKind::External { ty, is_const: true },
        }
    }

    pub fn mutable_external(name: &str, ty: Type) -> Self {
        Self {
            name: Name::from(name),
            kind: SymbolKind::External {
                ty,
                is_const: false,
            },
        }
    }

    /// Only const bindings can be narrowed or read through a narrowed symbol.
    pub const fn is_const(&self) -> bool {
        match self.kind {
            SymbolKind::Source { is_const, .. } | SymbolKind::External { is_const, .. } => is_const,
            SymbolKind::Parameter { .. } | SymbolKind::Narrowed { .. } => true,
        }
    }

    pub const fn is_narrowed(&self) -> bool {
        matches!(self.kind, SymbolKind::Narrowed { .. })
    }
}

/// Arena for symbol storage.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }
}
