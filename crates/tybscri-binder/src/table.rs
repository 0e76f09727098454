//! Combined scope and symbol storage for one syntax tree.
//!
//! The host creates a table, declares its external names in a root scope
//! and hands both to the checker, which adds the scopes and symbols the
//! script introduces. A table must not be shared between trees.

use crate::scopes::{ScopeArena, ScopeData, ScopeId};
use crate::symbols::{Symbol, SymbolArena, SymbolId, SymbolKind};
use tracing::trace;
use tybscri_solver::Type;

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    pub scopes: ScopeArena,
    pub symbols: SymbolArena,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.alloc(symbol)
    }

    pub fn add_scope(&mut self, parent: Option<ScopeId>, symbols: Vec<SymbolId>) -> ScopeId {
        let id = self.scopes.alloc(parent, symbols);
        trace!(scope = id.0, parent = ?parent.map(|p| p.0), "allocated scope");
        id
    }

    /// Root scope holding const externals for every `(name, type)` pair.
    pub fn external_scope<'n>(
        &mut self,
        externals: impl IntoIterator<Item = (&'n str, Type)>,
    ) -> ScopeId {
        let symbols = externals
            .into_iter()
            .map(|(name, ty)| self.add_symbol(Symbol::external(name, ty)))
            .collect();
        self.add_scope(None, symbols)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&ScopeData> {
        self.scopes.get(id)
    }

    /// Resolve `name` starting at `scope`: local symbols first, then each
    /// parent in turn.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        for (scope_id, data) in self.scopes.chain(scope) {
            let found = data
                .symbols
                .iter()
                .copied()
                .find(|&id| self.symbols.get(id).is_some_and(|s| &*s.name == name));
            if let Some(id) = found {
                trace!(name, scope = scope_id.0, symbol = id.0, "resolved name");
                return Some(id);
            }
        }
        None
    }

    pub fn is_const(&self, id: SymbolId) -> bool {
        self.symbol(id).is_some_and(Symbol::is_const)
    }

    /// The symbol a chain of narrowings ultimately refers to.
    pub fn unnarrowed(&self, mut id: SymbolId) -> SymbolId {
        while let Some(Symbol {
            kind: SymbolKind::Narrowed { original, .. },
            ..
        }) = self.symbol(id)
        {
            id = *original;
        }
        id
    }
}
