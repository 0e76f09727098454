//! Invocations, member access and lambdas.

use crate::context::CheckerState;
use crate::resolve::widen_literals;
use crate::state::NodeBinding;
use tracing::{Level, debug, span, trace};
use tybscri_binder::{ScopeId, SymbolId};
use tybscri_solver::{
    FuncType, ParameterDef, Type, TypeArgumentInference, find_members_by_name, format_type,
    free_type_parameters, instantiate_type, is_assignable,
};
use tybscri_syntax::{LambdaParameter, NodeIndex, NodeKind};

impl<'a> CheckerState<'a> {
    /// `callee(arguments) { trailing }`.
    ///
    /// Arguments are resolved against the callee's parameter types. Type
    /// parameters still free in the signature (a generic method's own
    /// parameters) are inferred from the arguments; lambda arguments are
    /// resolved last so they see what the other arguments inferred.
    pub(crate) fn resolve_invocation(
        &mut self,
        idx: NodeIndex,
        callee: NodeIndex,
        arguments: &[NodeIndex],
        trailing_lambda: Option<NodeIndex>,
    ) -> (Type, NodeBinding) {
        let _span = span!(Level::TRACE, "resolve_invocation", node = idx.0).entered();
        let env = self.ctx.env;
        let arena = self.ctx.arena;

        let mut all_arguments: Vec<NodeIndex> = arguments.to_vec();
        all_arguments.extend(trailing_lambda);

        let callee_ty = self.resolve_node(callee, None);
        let Some(func) = callee_ty.as_func().cloned() else {
            if !callee_ty.is_unknown() {
                self.error_not_invocable(callee, &callee_ty);
            }
            for &argument in &all_arguments {
                self.resolve_node(argument, None);
            }
            return (Type::Unknown, NodeBinding::None);
        };

        if func.parameters.len() != all_arguments.len() {
            self.error_argument_count(idx, func.parameters.len(), all_arguments.len());
            for (i, &argument) in all_arguments.iter().enumerate() {
                let expected = func.parameters.get(i).map(|p| p.ty.clone());
                self.resolve_node(argument, expected.as_ref());
            }
            return (Type::Unknown, NodeBinding::None);
        }

        let mut inference =
            TypeArgumentInference::new(&env.definitions, free_type_parameters(&callee_ty));
        let mut order: Vec<usize> = (0..all_arguments.len()).collect();
        order.sort_by_key(|&i| matches!(arena.kind(all_arguments[i]), Some(NodeKind::Lambda { .. })));

        let mut argument_types = vec![Type::Unknown; all_arguments.len()];
        for i in order {
            let parameter = &func.parameters[i].ty;
            let expected = instantiate_type(parameter, inference.bindings());
            let argument_ty = self.resolve_node(all_arguments[i], Some(&expected));
            inference.infer(parameter, &argument_ty);
            argument_types[i] = argument_ty;
        }

        let substitution = inference.finish();
        if !substitution.is_empty() {
            debug!(
                node = idx.0,
                inferred = substitution.len(),
                "inferred call type arguments"
            );
        }
        let signature = instantiate_type(&callee_ty, &substitution);
        let Some(instantiated) = signature.as_func() else {
            return (Type::Unknown, NodeBinding::None);
        };

        for ((argument, argument_ty), parameter) in all_arguments
            .iter()
            .zip(&argument_types)
            .zip(&instantiated.parameters)
        {
            if argument_ty.contains_unknown() || parameter.ty.contains_unknown() {
                continue;
            }
            if !is_assignable(&env.definitions, argument_ty, &parameter.ty) {
                self.error_argument_not_assignable(*argument, argument_ty, &parameter.ty);
            }
        }

        let return_type = instantiated.return_type.clone();
        (return_type, NodeBinding::Call { signature })
    }

    /// `object.member`: the unique member found on the object's type.
    /// Literal receivers are looked up on their backing type.
    pub(crate) fn resolve_member_access(
        &mut self,
        idx: NodeIndex,
        object: NodeIndex,
        member: &str,
    ) -> (Type, NodeBinding) {
        let env = self.ctx.env;
        let object_ty = self.resolve_node(object, None);
        if object_ty.is_unknown() {
            return (Type::Unknown, NodeBinding::None);
        }

        let lookup_ty = widen_literals(&object_ty);
        let mut members = find_members_by_name(&env.definitions, &lookup_ty, member);
        match members.len() {
            0 => {
                self.error_member_not_found(idx, member, &object_ty);
                (Type::Unknown, NodeBinding::None)
            }
            1 => {
                let found = members.remove(0);
                trace!(
                    member,
                    owner = found.owner.as_deref().unwrap_or("<union>"),
                    ty = %format_type(&found.ty),
                    "resolved member"
                );
                (found.ty.clone(), NodeBinding::Member(found))
            }
            count => {
                debug!(member, count, "ambiguous member access");
                self.error_member_ambiguous(idx, member, &object_ty);
                (Type::Unknown, NodeBinding::None)
            }
        }
    }

    /// A lambda takes its parameter types from annotations, else from the
    /// expected function type. With no declared parameters it binds the
    /// implicit parameter when the expected type has at least one.
    pub(crate) fn resolve_lambda(
        &mut self,
        lambda_scope: Option<ScopeId>,
        parameters: &[LambdaParameter],
        body: NodeIndex,
        expected: Option<&Type>,
    ) -> (Type, NodeBinding) {
        let expected_func: Option<FuncType> = expected.and_then(Type::as_func).cloned();
        let symbols: Vec<SymbolId> = lambda_scope
            .and_then(|scope| self.ctx.symbols.scope(scope))
            .map(|data| data.symbols.to_vec())
            .unwrap_or_default();

        let mut resolved_parameters = Vec::new();
        let mut bound = Vec::new();

        if parameters.is_empty() {
            let implicit = symbols.first().copied();
            let first_expected = expected_func
                .as_ref()
                .and_then(|func| func.parameters.first());
            if let (Some(symbol), Some(param)) = (implicit, first_expected) {
                self.ctx.symbol_types.insert(symbol, param.ty.clone());
                resolved_parameters.push(ParameterDef::new(
                    &self.ctx.options.implicit_lambda_parameter,
                    param.ty.clone(),
                ));
                bound.push(symbol);
            }
        } else {
            for (i, (param, symbol)) in parameters.iter().zip(symbols).enumerate() {
                let expected_param = expected_func
                    .as_ref()
                    .and_then(|func| func.parameters.get(i))
                    .map(|p| p.ty.clone());
                let ty = match (param.annotation, expected_param) {
                    (Some(annotation), _) => self.resolve_node(annotation, None),
                    (None, Some(ty)) => ty,
                    (None, None) => {
                        self.error_cannot_infer_parameter(param.span, &param.name);
                        Type::Unknown
                    }
                };
                self.ctx.symbol_types.insert(symbol, ty.clone());
                resolved_parameters.push(ParameterDef::new(&param.name, ty));
                bound.push(symbol);
            }
        }

        let body_expected = expected_func
            .map(|func| func.return_type)
            .filter(|ret| !ret.is_unknown() && free_type_parameters(ret).is_empty());
        let body_ty = self.resolve_node(body, body_expected.as_ref());

        (
            Type::func(resolved_parameters, body_ty),
            NodeBinding::Lambda { parameters: bound },
        )
    }
}
