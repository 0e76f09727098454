//! Type references (`is` targets and annotations).

use crate::context::CheckerState;
use tracing::debug;
use tybscri_solver::{RegularDef, Type, bind_type_parameters};
use tybscri_syntax::NodeIndex;

impl<'a> CheckerState<'a> {
    /// Look `name` up in the type table and bind its type arguments.
    ///
    /// Arity is checked here so that a wrong type argument count in the
    /// script is a diagnostic, never a solver error.
    pub(crate) fn resolve_type_ref(
        &mut self,
        idx: NodeIndex,
        name: &str,
        type_arguments: &[NodeIndex],
    ) -> Type {
        let env = self.ctx.env;
        let arguments: Vec<Type> = type_arguments
            .iter()
            .map(|&argument| self.resolve_node(argument, None))
            .collect();

        let Some(ty) = env.types.get(name).cloned() else {
            self.error_cannot_find_type(idx, name);
            return Type::Unknown;
        };

        let arity = match ty.as_regular() {
            Some(regular) if regular.type_arguments.is_none() => env
                .definitions
                .get(regular.def)
                .map_or(0, RegularDef::arity),
            _ => 0,
        };

        if arity == 0 {
            if !arguments.is_empty() {
                self.error_type_argument_count(idx, name, 0, arguments.len());
                return Type::Unknown;
            }
            return ty;
        }
        if arguments.is_empty() {
            self.error_generic_requires_arguments(idx, name, arity);
            return Type::Unknown;
        }
        if arguments.len() != arity {
            self.error_type_argument_count(idx, name, arity, arguments.len());
            return Type::Unknown;
        }

        match bind_type_parameters(&env.definitions, &ty, arguments) {
            Ok(bound) => bound,
            Err(err) => {
                debug!(%err, name, "type reference binding failed");
                Type::Unknown
            }
        }
    }
}
