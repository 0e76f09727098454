//! Per-node resolution state.
//!
//! Each node moves through `Unresolved -> ScopesAssigned -> TypeResolved ->
//! Generated` and never back. The fields a phase needs are only reachable
//! through the state that proves the previous phase ran.

use rustc_hash::FxHashMap;
use tracing::trace;
use tybscri_binder::{ScopeId, SymbolId};
use tybscri_solver::{MemberDef, Type};
use tybscri_syntax::NodeIndex;

/// Resolved value types of source-declared, parameter and narrowed symbols.
pub type SymbolTypes = FxHashMap<SymbolId, Type>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeScopes {
    /// Scope the node resolves names in.
    pub scope: ScopeId,
    /// Scope the node introduced for (some of) its children, if any.
    pub inner: Option<ScopeId>,
}

/// Node-specific facts recorded in phase 2 for generation.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeBinding {
    None,
    /// Identifier reference.
    Symbol(SymbolId),
    /// The unique member a member access resolved to.
    Member(MemberDef),
    /// Callee signature after type argument inference.
    Call { signature: Type },
    /// Symbols of the lambda's parameters, in order.
    Lambda { parameters: Vec<SymbolId> },
    TypeTest { asserted: Type },
    Declaration { symbol: SymbolId },
    Assignment { symbol: SymbolId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedNode {
    pub scopes: NodeScopes,
    pub ty: Type,
    pub binding: NodeBinding,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeState {
    #[default]
    Unresolved,
    ScopesAssigned(NodeScopes),
    TypeResolved(ResolvedNode),
    Generated(ResolvedNode),
}

impl NodeState {
    pub const fn phase_name(&self) -> &'static str {
        match self {
            NodeState::Unresolved => "Unresolved",
            NodeState::ScopesAssigned(_) => "ScopesAssigned",
            NodeState::TypeResolved(_) => "TypeResolved",
            NodeState::Generated(_) => "Generated",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeStateTable {
    states: Vec<NodeState>,
}

impl NodeStateTable {
    pub fn new(node_count: usize) -> Self {
        Self {
            states: vec![NodeState::Unresolved; node_count],
        }
    }

    pub fn get(&self, index: NodeIndex) -> Option<&NodeState> {
        self.states.get(index.0 as usize)
    }

    pub fn phase_name(&self, index: NodeIndex) -> &'static str {
        self.get(index).map_or("Missing", NodeState::phase_name)
    }

    /// `Unresolved -> ScopesAssigned`. Returns false if the node already
    /// left `Unresolved`.
    pub fn assign_scopes(&mut self, index: NodeIndex, scopes: NodeScopes) -> bool {
        match self.states.get_mut(index.0 as usize) {
            Some(state @ NodeState::Unresolved) => {
                *state = NodeState::ScopesAssigned(scopes);
                true
            }
            _ => {
                trace!(node = index.0, "scopes already assigned");
                false
            }
        }
    }

    /// `ScopesAssigned -> TypeResolved`.
    pub fn record_resolution(&mut self, index: NodeIndex, ty: Type, binding: NodeBinding) -> bool {
        match self.states.get_mut(index.0 as usize) {
            Some(state @ NodeState::ScopesAssigned(_)) => {
                let NodeState::ScopesAssigned(scopes) = *state else {
                    return false;
                };
                *state = NodeState::TypeResolved(ResolvedNode { scopes, ty, binding });
                true
            }
            _ => false,
        }
    }

    /// `TypeResolved -> Generated`.
    pub fn mark_generated(&mut self, index: NodeIndex) -> bool {
        match self.states.get_mut(index.0 as usize) {
            Some(state @ NodeState::TypeResolved(_)) => {
                let previous = std::mem::take(state);
                if let NodeState::TypeResolved(resolved) = previous {
                    *state = NodeState::Generated(resolved);
                }
                true
            }
            _ => false,
        }
    }

    pub fn scopes(&self, index: NodeIndex) -> Option<NodeScopes> {
        match self.get(index)? {
            NodeState::Unresolved => None,
            NodeState::ScopesAssigned(scopes) => Some(*scopes),
            NodeState::TypeResolved(resolved) | NodeState::Generated(resolved) => {
                Some(resolved.scopes)
            }
        }
    }

    /// Phase-2 result, once recorded.
    pub fn resolved(&self, index: NodeIndex) -> Option<&ResolvedNode> {
        match self.get(index)? {
            NodeState::TypeResolved(resolved) | NodeState::Generated(resolved) => Some(resolved),
            _ => None,
        }
    }

    pub fn resolved_type(&self, index: NodeIndex) -> Option<&Type> {
        self.resolved(index).map(|resolved| &resolved.ty)
    }

    pub fn is_generated(&self, index: NodeIndex) -> bool {
        matches!(self.get(index), Some(NodeState::Generated(_)))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
