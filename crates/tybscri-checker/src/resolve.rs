//! Phase 2: type resolution dispatch and simple expressions.
//!
//! `resolve_node` is the single entry point. It resolves a node at most once
//! (later calls return the recorded type), so forward references can pull a
//! declaration in before the walk reaches it. Expected types flow down
//! through the `expected` argument.

use crate::context::CheckerState;
use crate::state::NodeBinding;
use tracing::{trace, warn};
use tybscri_solver::{
    LiteralValue, Name, Type, common_supertype, create_union, format_type, is_assignable,
};
use tybscri_syntax::{LiteralToken, NodeIndex, NodeKind};

impl<'a> CheckerState<'a> {
    /// Resolve `idx` (once) and return its type.
    pub fn resolve_node(&mut self, idx: NodeIndex, expected: Option<&Type>) -> Type {
        if let Some(ty) = self.ctx.nodes.resolved_type(idx) {
            return ty.clone();
        }
        let Some(scopes) = self.ctx.nodes.scopes(idx) else {
            warn!(
                node = idx.0,
                state = self.ctx.nodes.phase_name(idx),
                "resolving a node without scopes"
            );
            return Type::Unknown;
        };
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return Type::Unknown;
        };

        if self.ctx.depth >= self.ctx.options.max_resolution_depth {
            self.error_expression_too_deep(idx);
            self.ctx
                .nodes
                .record_resolution(idx, Type::Unknown, NodeBinding::None);
            return Type::Unknown;
        }
        self.ctx.depth += 1;

        let (ty, binding) = match &node.kind {
            NodeKind::Identifier { name } => self.resolve_identifier(idx, scopes.scope, name),
            NodeKind::Literal(token) => (self.literal_type(token), NodeBinding::None),
            NodeKind::Collection { elements } => (
                self.resolve_collection(elements, expected),
                NodeBinding::None,
            ),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => (
                self.resolve_if(*condition, *then_branch, *else_branch, expected),
                NodeBinding::None,
            ),
            NodeKind::Invocation {
                callee,
                arguments,
                trailing_lambda,
            } => self.resolve_invocation(idx, *callee, arguments, *trailing_lambda),
            NodeKind::MemberAccess { object, member } => {
                self.resolve_member_access(idx, *object, member)
            }
            NodeKind::Lambda { parameters, body } => {
                self.resolve_lambda(scopes.inner, parameters, *body, expected)
            }
            NodeKind::Is { operand, target } => self.resolve_is(*operand, *target),
            NodeKind::And { left, right } => {
                (self.resolve_and(*left, *right), NodeBinding::None)
            }
            NodeKind::Block { statements } => {
                (self.resolve_block(statements, expected), NodeBinding::None)
            }
            NodeKind::Declaration {
                is_const,
                annotation,
                initializer,
                ..
            } => self.resolve_declaration(idx, *is_const, *annotation, *initializer),
            NodeKind::Assignment { target, value } => {
                self.resolve_assignment(idx, *target, *value)
            }
            NodeKind::TypeRef {
                name,
                type_arguments,
            } => (
                self.resolve_type_ref(idx, name, type_arguments),
                NodeBinding::None,
            ),
        };

        self.ctx.depth -= 1;
        trace!(
            node = idx.0,
            kind = node.kind_name(),
            ty = %format_type(&ty),
            "resolved node"
        );
        self.ctx.nodes.record_resolution(idx, ty.clone(), binding);
        ty
    }

    fn resolve_identifier(
        &mut self,
        idx: NodeIndex,
        scope: tybscri_binder::ScopeId,
        name: &str,
    ) -> (Type, NodeBinding) {
        let Some(symbol) = self.ctx.symbols.resolve(scope, name) else {
            self.error_cannot_find_name(idx, name);
            return (Type::Unknown, NodeBinding::None);
        };
        let ty = self.symbol_type(symbol, idx);
        (ty, NodeBinding::Symbol(symbol))
    }

    fn literal_type(&self, token: &LiteralToken) -> Type {
        let well_known = &self.ctx.env.well_known;
        match token {
            LiteralToken::Number(n) => well_known.literal(LiteralValue::Number(*n)),
            LiteralToken::String(s) => well_known.literal(LiteralValue::String(Name::from(s.as_str()))),
            LiteralToken::Boolean(b) => well_known.literal(LiteralValue::Boolean(*b)),
            LiteralToken::Null => well_known.null.clone(),
        }
    }

    /// `[a, b, c]` is a list of the union of its element types.
    fn resolve_collection(&mut self, elements: &[NodeIndex], expected: Option<&Type>) -> Type {
        let env = self.ctx.env;
        let element_expected = expected.and_then(|ty| env.well_known.list_element(ty));
        let types: Vec<Type> = elements
            .iter()
            .map(|&element| self.resolve_node(element, element_expected.as_ref()))
            .collect();
        let element = if types.iter().any(Type::is_unknown) {
            Type::Unknown
        } else {
            create_union(types)
        };
        env.well_known.list_of(element)
    }

    fn resolve_if(
        &mut self,
        condition: NodeIndex,
        then_branch: NodeIndex,
        else_branch: Option<NodeIndex>,
        expected: Option<&Type>,
    ) -> Type {
        let env = self.ctx.env;
        self.resolve_condition(condition);
        let then_ty = self.resolve_node(then_branch, expected);
        match else_branch {
            Some(else_branch) => {
                let else_ty = self.resolve_node(else_branch, expected);
                common_supertype(&env.definitions, &then_ty, &else_ty)
            }
            None if then_ty.is_unknown() => Type::Unknown,
            None => create_union(vec![then_ty, env.well_known.null.clone()]),
        }
    }

    /// Resolve a boolean-valued operand and report it if it is not boolean.
    pub(crate) fn resolve_condition(&mut self, condition: NodeIndex) -> Type {
        let env = self.ctx.env;
        let boolean = &env.well_known.boolean;
        let ty = self.resolve_node(condition, Some(boolean));
        if !ty.is_unknown() && !is_assignable(&env.definitions, &ty, boolean) {
            self.error_condition_not_boolean(condition, &ty);
        }
        ty
    }

    fn resolve_and(&mut self, left: NodeIndex, right: NodeIndex) -> Type {
        self.resolve_condition(left);
        self.resolve_condition(right);
        self.ctx.env.well_known.boolean.clone()
    }

    /// `operand is Target`. The narrowed symbols themselves were declared in
    /// phase 1; here the target is resolved and guards on reassignable
    /// bindings are reported.
    fn resolve_is(&mut self, operand: NodeIndex, target: NodeIndex) -> (Type, NodeBinding) {
        self.resolve_node(operand, None);
        let asserted = self.resolve_node(target, None);

        if self.ctx.options.report_non_narrowable_guards
            && let Some(symbol) = self.bound_symbol(operand)
            && !self.ctx.symbols.is_const(symbol)
        {
            let name = self
                .ctx
                .symbols
                .symbol(symbol)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            self.error_non_narrowable_guard(operand, &name);
        }

        (
            self.ctx.env.well_known.boolean.clone(),
            NodeBinding::TypeTest { asserted },
        )
    }

    /// Symbol an already-resolved identifier refers to.
    pub(crate) fn bound_symbol(&self, idx: NodeIndex) -> Option<tybscri_binder::SymbolId> {
        match self.ctx.nodes.resolved(idx)?.binding {
            NodeBinding::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Report `source` not assignable to `target` at `idx`.
    pub(crate) fn check_assignable(&mut self, idx: NodeIndex, source: &Type, target: &Type) -> bool {
        if source.contains_unknown() || target.contains_unknown() {
            return true;
        }
        let assignable = is_assignable(&self.ctx.env.definitions, source, target);
        if !assignable {
            self.error_type_not_assignable(idx, source, target);
        }
        assignable
    }
}

/// Replace literal types by their backing types, through unions.
pub(crate) fn widen_literals(ty: &Type) -> Type {
    match ty {
        Type::Literal(literal) => literal.backing.clone(),
        Type::Union(union) => create_union(union.members.iter().map(widen_literals).collect()),
        _ => ty.clone(),
    }
}
