//! Type argument inference for generic calls.
//!
//! A callee signature may still contain type parameters after its receiver
//! has been instantiated (a generic method's own parameters). Each argument
//! type is walked in parallel with its parameter type and every free
//! parameter met on the way is bound to the corresponding argument part.

use crate::def::DefinitionStore;
use crate::factory::common_supertype;
use crate::instantiate::{TypeSubstitution, base_of};
use crate::types::{Name, Type};
use tracing::trace;
use tybscri_common::limits::{MAX_BASE_CHAIN_DEPTH, MAX_TYPE_RELATION_DEPTH};

pub struct TypeArgumentInference<'a> {
    db: &'a DefinitionStore,
    free: Vec<Name>,
    bindings: TypeSubstitution,
}

impl<'a> TypeArgumentInference<'a> {
    pub fn new(db: &'a DefinitionStore, free: Vec<Name>) -> Self {
        Self {
            db,
            free,
            bindings: TypeSubstitution::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Inferred so far.
    pub fn bindings(&self) -> &TypeSubstitution {
        &self.bindings
    }

    /// Bindings for every free parameter, with `Unknown` for the ones no
    /// argument constrained.
    pub fn finish(mut self) -> TypeSubstitution {
        for name in &self.free {
            if !self.bindings.contains(name) {
                trace!(parameter = %name, "no inference candidate");
                self.bindings.insert(name.clone(), Type::Unknown);
            }
        }
        self.bindings
    }

    pub fn infer(&mut self, parameter: &Type, argument: &Type) {
        self.infer_at(parameter, argument, 0);
    }

    fn infer_at(&mut self, parameter: &Type, argument: &Type, depth: u32) {
        if depth > MAX_TYPE_RELATION_DEPTH || argument.is_unknown() {
            return;
        }
        match (parameter, argument) {
            (Type::TypeParameter(param), _) if self.free.contains(&param.name) => {
                let inferred = match self.bindings.get(&param.name) {
                    Some(existing) => common_supertype(self.db, existing, argument),
                    None => argument.clone(),
                };
                trace!(parameter = %param.name, "inferred type argument");
                self.bindings.insert(param.name.clone(), inferred);
            }
            (Type::Func(param_func), Type::Func(arg_func)) => {
                for (p, a) in param_func.parameters.iter().zip(&arg_func.parameters) {
                    self.infer_at(&p.ty, &a.ty, depth + 1);
                }
                self.infer_at(&param_func.return_type, &arg_func.return_type, depth + 1);
            }
            (Type::Regular(param_regular), Type::Regular(_)) => {
                let Some(param_args) = &param_regular.type_arguments else {
                    return;
                };
                // Find the argument's ancestor that matches the parameter's
                // definition, then pair type arguments positionally.
                let mut current = Some(argument.clone());
                let mut steps = 0;
                while let Some(Type::Regular(candidate)) = current {
                    if candidate.name == param_regular.name {
                        if let Some(arg_args) = &candidate.type_arguments {
                            for (p, a) in param_args.iter().zip(arg_args) {
                                self.infer_at(p, a, depth + 1);
                            }
                        }
                        return;
                    }
                    steps += 1;
                    if steps > MAX_BASE_CHAIN_DEPTH {
                        return;
                    }
                    current = base_of(self.db, &candidate);
                }
            }
            _ => {}
        }
    }
}
