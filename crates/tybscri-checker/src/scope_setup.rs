//! Phase 1: scope wiring.
//!
//! Records for every node the scope it resolves names in and allocates a
//! child scope wherever a construct introduces bindings: lambda parameters,
//! block declarations, and the narrowed symbols of a guarded branch. No
//! types are computed here.

use crate::context::CheckerState;
use crate::state::NodeScopes;
use tracing::trace;
use tybscri_binder::{ScopeId, Symbol, SymbolId, SymbolKind};
use tybscri_solver::Name;
use tybscri_syntax::{NodeIndex, NodeKind};

impl<'a> CheckerState<'a> {
    /// Wire scopes for the subtree rooted at `root`.
    pub fn setup_scopes(&mut self, root: NodeIndex, scope: ScopeId) {
        let arena = self.ctx.arena;
        let mut stack = vec![(root, scope)];
        while let Some((idx, scope)) = stack.pop() {
            let Some(node) = arena.get(idx) else {
                continue;
            };
            let (inner, children) = self.scopes_for_children(idx, &node.kind, scope);
            if !self.ctx.nodes.assign_scopes(idx, NodeScopes { scope, inner }) {
                continue;
            }
            stack.extend(children.into_iter().rev());
        }
    }

    /// The scope the node introduces (if any) and the scope each child is
    /// set up in.
    fn scopes_for_children(
        &mut self,
        idx: NodeIndex,
        kind: &NodeKind,
        scope: ScopeId,
    ) -> (Option<ScopeId>, Vec<(NodeIndex, ScopeId)>) {
        match kind {
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let narrowed = self.truth_symbols(*condition, scope);
                let then_scope = self.narrowed_scope(scope, &narrowed);
                let mut children = vec![(*condition, scope), (*then_branch, then_scope)];
                children.extend(else_branch.map(|e| (e, scope)));
                let inner = (then_scope != scope).then_some(then_scope);
                (inner, children)
            }
            NodeKind::And { left, right } => {
                self.truth_symbols(idx, scope);
                let right_scope = self
                    .ctx
                    .conjunction_scopes
                    .get(&idx)
                    .copied()
                    .unwrap_or(scope);
                let inner = (right_scope != scope).then_some(right_scope);
                (inner, vec![(*left, scope), (*right, right_scope)])
            }
            NodeKind::Lambda { parameters, body } => {
                let symbols: Vec<SymbolId> = if parameters.is_empty() {
                    let name = Name::from(self.ctx.options.implicit_lambda_parameter.as_str());
                    vec![self.ctx.symbols.add_symbol(Symbol {
                        name,
                        kind: SymbolKind::Parameter {
                            lambda: idx,
                            index: 0,
                        },
                    })]
                } else {
                    parameters
                        .iter()
                        .enumerate()
                        .map(|(index, param)| {
                            self.ctx.symbols.add_symbol(Symbol {
                                name: Name::from(param.name.as_str()),
                                kind: SymbolKind::Parameter { lambda: idx, index },
                            })
                        })
                        .collect()
                };
                let lambda_scope = self.ctx.symbols.add_scope(Some(scope), symbols);
                let mut children: Vec<(NodeIndex, ScopeId)> = parameters
                    .iter()
                    .filter_map(|p| p.annotation)
                    .map(|annotation| (annotation, scope))
                    .collect();
                children.push((*body, lambda_scope));
                (Some(lambda_scope), children)
            }
            NodeKind::Block { statements } => {
                let arena = self.ctx.arena;
                let mut symbols = Vec::new();
                for &statement in statements {
                    if let Some(NodeKind::Declaration { name, is_const, .. }) =
                        arena.kind(statement)
                    {
                        let symbol = self.declare(statement, name, *is_const);
                        symbols.push(symbol);
                    }
                }
                let block_scope = self.ctx.symbols.add_scope(Some(scope), symbols);
                let children = statements.iter().map(|&s| (s, block_scope)).collect();
                (Some(block_scope), children)
            }
            NodeKind::Declaration { name, is_const, .. } => {
                if !self.ctx.declared_symbols.contains_key(&idx) {
                    // Not directly inside a block: the binding is not visible
                    // to any other node.
                    self.declare(idx, name, *is_const);
                }
                let children = self.ctx.arena.children(idx);
                (None, children.into_iter().map(|c| (c, scope)).collect())
            }
            _ => {
                let children = self.ctx.arena.children(idx);
                (None, children.into_iter().map(|c| (c, scope)).collect())
            }
        }
    }

    fn declare(&mut self, declaration: NodeIndex, name: &str, is_const: bool) -> SymbolId {
        let symbol = self.ctx.symbols.add_symbol(Symbol {
            name: Name::from(name),
            kind: SymbolKind::Source {
                declaration,
                is_const,
            },
        });
        self.ctx.declared_symbols.insert(declaration, symbol);
        symbol
    }

    /// Child scope holding `narrowed`, or `scope` itself when there is
    /// nothing to add. Later narrowings shadow earlier ones.
    fn narrowed_scope(&mut self, scope: ScopeId, narrowed: &[SymbolId]) -> ScopeId {
        if narrowed.is_empty() {
            return scope;
        }
        let symbols = narrowed.iter().rev().copied().collect();
        self.ctx.symbols.add_scope(Some(scope), symbols)
    }

    /// Narrowed symbols that hold while `condition` is true.
    ///
    /// `x is T` narrows `x` when it refers to a const binding; `a and b`
    /// exposes the narrowings of both sides, with `b` already set up in a
    /// scope that sees the narrowings of `a`. Results are memoized so each
    /// guard allocates its symbols once.
    pub(crate) fn truth_symbols(&mut self, condition: NodeIndex, scope: ScopeId) -> Vec<SymbolId> {
        if let Some(known) = self.ctx.truth_symbols.get(&condition) {
            return known.clone();
        }
        let arena = self.ctx.arena;
        let symbols = match arena.kind(condition) {
            Some(NodeKind::Is { operand, .. }) => {
                let Some(name) = arena.identifier_name(*operand) else {
                    return Vec::new();
                };
                match self.ctx.symbols.resolve(scope, name) {
                    Some(original) if self.ctx.symbols.is_const(original) => {
                        let narrowed = self.ctx.symbols.add_symbol(Symbol {
                            name: Name::from(name),
                            kind: SymbolKind::Narrowed {
                                original,
                                guard: condition,
                            },
                        });
                        trace!(
                            name,
                            guard = condition.0,
                            symbol = narrowed.0,
                            "declared narrowed symbol"
                        );
                        vec![narrowed]
                    }
                    _ => Vec::new(),
                }
            }
            Some(NodeKind::And { left, right }) => {
                let mut symbols = self.truth_symbols(*left, scope);
                let right_scope = self.narrowed_scope(scope, &symbols);
                self.ctx.conjunction_scopes.insert(condition, right_scope);
                symbols.extend(self.truth_symbols(*right, right_scope));
                symbols
            }
            _ => return Vec::new(),
        };
        self.ctx.truth_symbols.insert(condition, symbols.clone());
        symbols
    }
}
