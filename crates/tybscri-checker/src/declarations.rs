//! Blocks, declarations, assignments and symbol value types.

use crate::context::CheckerState;
use crate::resolve::widen_literals;
use crate::state::NodeBinding;
use tracing::{Level, span, trace};
use tybscri_binder::{SymbolId, SymbolKind};
use tybscri_solver::{Type, format_type, narrow_to_asserted};
use tybscri_syntax::{NodeIndex, NodeKind};

impl<'a> CheckerState<'a> {
    /// Value type of `symbol`, resolving whatever it depends on first.
    ///
    /// `use_site` is the reference being resolved; cycles and uninferable
    /// parameters are reported there.
    pub(crate) fn symbol_type(&mut self, symbol: SymbolId, use_site: NodeIndex) -> Type {
        if let Some(ty) = self.ctx.symbol_types.get(&symbol) {
            return ty.clone();
        }
        let Some(data) = self.ctx.symbols.symbol(symbol).cloned() else {
            return Type::Unknown;
        };

        match data.kind {
            SymbolKind::External { ty, .. } => ty,
            SymbolKind::Source { declaration, .. } => {
                if self.ctx.in_progress.contains(&declaration) {
                    self.error_circular_reference(use_site, &data.name);
                    return Type::Unknown;
                }
                trace!(name = %data.name, declaration = declaration.0, "resolving declaration on demand");
                self.resolve_node(declaration, None);
                self.ctx
                    .symbol_types
                    .get(&symbol)
                    .cloned()
                    .unwrap_or(Type::Unknown)
            }
            SymbolKind::Parameter { .. } => {
                // The enclosing lambda records parameter types before its
                // body is resolved; reaching here means none could be given.
                let span = self.ctx.arena.span(use_site);
                self.error_cannot_infer_parameter(span, &data.name);
                self.ctx.symbol_types.insert(symbol, Type::Unknown);
                Type::Unknown
            }
            SymbolKind::Narrowed { original, guard } => {
                let _span = span!(Level::TRACE, "narrowed_symbol", name = %data.name).entered();
                let declared = self.symbol_type(original, use_site);
                let asserted = self.guard_type(guard);
                let narrowed = narrow_to_asserted(&self.ctx.env.definitions, &declared, &asserted);
                trace!(
                    declared = %format_type(&declared),
                    asserted = %format_type(&asserted),
                    narrowed = %format_type(&narrowed),
                    "narrowed symbol type"
                );
                self.ctx.symbol_types.insert(symbol, narrowed.clone());
                narrowed
            }
        }
    }

    /// Type asserted by the `is` node `guard`.
    fn guard_type(&mut self, guard: NodeIndex) -> Type {
        let arena = self.ctx.arena;
        match arena.kind(guard) {
            Some(NodeKind::Is { target, .. }) => self.resolve_node(*target, None),
            _ => Type::Unknown,
        }
    }

    /// A block evaluates to its final expression statement, or `null`.
    pub(crate) fn resolve_block(&mut self, statements: &[NodeIndex], expected: Option<&Type>) -> Type {
        let null = self.ctx.env.well_known.null.clone();
        let mut ty = null.clone();
        for (i, &statement) in statements.iter().enumerate() {
            let is_last = i + 1 == statements.len();
            let statement_ty = self.resolve_node(statement, if is_last { expected } else { None });
            if is_last {
                ty = match self.ctx.arena.kind(statement) {
                    Some(NodeKind::Declaration { .. } | NodeKind::Assignment { .. }) => null.clone(),
                    _ => statement_ty,
                };
            }
        }
        ty
    }

    /// `const`/`let` declaration. The declared type is the annotation, else
    /// the initializer's type; `let` bindings widen literal initializers so
    /// they can be reassigned.
    pub(crate) fn resolve_declaration(
        &mut self,
        idx: NodeIndex,
        is_const: bool,
        annotation: Option<NodeIndex>,
        initializer: NodeIndex,
    ) -> (Type, NodeBinding) {
        self.ctx.in_progress.insert(idx);

        let annotated = annotation.map(|annotation| self.resolve_node(annotation, None));
        let initializer_ty = self.resolve_node(initializer, annotated.as_ref());
        if let Some(annotated) = &annotated {
            self.check_assignable(initializer, &initializer_ty, annotated);
        }
        let declared = match annotated {
            Some(annotated) => annotated,
            None if is_const => initializer_ty,
            None => widen_literals(&initializer_ty),
        };

        self.ctx.in_progress.remove(&idx);

        let null = self.ctx.env.well_known.null.clone();
        match self.ctx.declared_symbols.get(&idx).copied() {
            Some(symbol) => {
                self.ctx.symbol_types.insert(symbol, declared);
                (null, NodeBinding::Declaration { symbol })
            }
            None => (null, NodeBinding::None),
        }
    }

    /// `target = value`, where `target` names a reassignable binding.
    pub(crate) fn resolve_assignment(
        &mut self,
        idx: NodeIndex,
        target: NodeIndex,
        value: NodeIndex,
    ) -> (Type, NodeBinding) {
        if !matches!(self.ctx.arena.kind(target), Some(NodeKind::Identifier { .. })) {
            self.resolve_node(target, None);
            self.resolve_node(value, None);
            self.error_invalid_assignment_target(target);
            return (Type::Unknown, NodeBinding::None);
        }

        let target_ty = self.resolve_node(target, None);
        let Some(symbol) = self.bound_symbol(target) else {
            self.resolve_node(value, None);
            return (Type::Unknown, NodeBinding::None);
        };

        if self.ctx.symbols.is_const(symbol) {
            let name = self
                .ctx
                .symbols
                .symbol(symbol)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            self.error_cannot_assign_to_const(target, &name);
            self.resolve_node(value, Some(&target_ty));
            return (Type::Unknown, NodeBinding::None);
        }

        let value_ty = self.resolve_node(value, Some(&target_ty));
        self.check_assignable(value, &value_ty, &target_ty);
        trace!(node = idx.0, symbol = symbol.0, "resolved assignment");
        (
            self.ctx.env.well_known.null.clone(),
            NodeBinding::Assignment { symbol },
        )
    }
}
