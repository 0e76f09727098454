//! Lexical scopes.
//!
//! A scope is an immutable link in a parent chain. Adding bindings means
//! allocating a new child scope; existing scopes are never modified, which
//! is what keeps a narrowed symbol invisible outside its branch.

use crate::symbols::SymbolId;
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeData {
    pub parent: Option<ScopeId>,
    /// Local bindings in declaration order; the first match wins.
    pub symbols: SmallVec<[SymbolId; 4]>,
}

#[derive(Clone, Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<ScopeData>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, parent: Option<ScopeId>, symbols: Vec<SymbolId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            parent,
            symbols: SmallVec::from_vec(symbols),
        });
        id
    }

    pub fn get(&self, id: ScopeId) -> Option<&ScopeData> {
        self.scopes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// `id` followed by its ancestors, innermost first.
    pub fn chain(&self, id: ScopeId) -> impl Iterator<Item = (ScopeId, &ScopeData)> {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = next?;
            let data = self.get(current)?;
            next = data.parent;
            Some((current, data))
        })
    }
}
