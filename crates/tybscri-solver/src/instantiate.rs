//! Generic instantiation.
//!
//! Binding a generic definition never touches the definition: it produces a
//! new `Regular` value carrying the type arguments. Members and base of a
//! bound instantiation are substituted when they are queried
//! ([`members_of`], [`base_of`]), which keeps self-referential generics
//! finite.

use crate::def::DefinitionStore;
use crate::error::SolverError;
use crate::factory::create_union;
use crate::format::format_type;
use crate::types::{
    FuncType, LiteralType, MemberDef, Name, ParameterDef, RegularType, Type, TypeParameter,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

/// Mapping from type parameter name to the type that replaces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSubstitution {
    map: FxHashMap<Name, Type>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair parameters with arguments by position. Extra entries on either
    /// side are ignored.
    pub fn from_pairs(params: &[TypeParameter], args: &[Type]) -> Self {
        let map = params
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.name.clone(), arg.clone()))
            .collect();
        Self { map }
    }

    pub fn insert(&mut self, name: Name, ty: Type) {
        self.map.insert(name, ty);
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Copy without the given names (they are shadowed by a nested
    /// declaration such as a generic method's own parameters).
    pub fn without(&self, shadowed: &[TypeParameter]) -> Self {
        let mut map = self.map.clone();
        for param in shadowed {
            map.remove(&param.name);
        }
        Self { map }
    }
}

/// Structurally replace type parameters in `ty`.
pub fn instantiate_type(ty: &Type, subst: &TypeSubstitution) -> Type {
    if subst.is_empty() {
        return ty.clone();
    }
    match ty {
        Type::Unknown | Type::Never => ty.clone(),
        Type::TypeParameter(param) => subst.get(&param.name).cloned().unwrap_or_else(|| ty.clone()),
        Type::Literal(literal) => Type::Literal(Arc::new(LiteralType {
            value: literal.value.clone(),
            backing: instantiate_type(&literal.backing, subst),
        })),
        Type::Union(union) => create_union(
            union
                .members
                .iter()
                .map(|member| instantiate_type(member, subst))
                .collect(),
        ),
        Type::Func(func) => Type::Func(Arc::new(FuncType {
            parameters: func
                .parameters
                .iter()
                .map(|param| ParameterDef {
                    name: param.name.clone(),
                    ty: instantiate_type(&param.ty, subst),
                })
                .collect(),
            return_type: instantiate_type(&func.return_type, subst),
        })),
        Type::Regular(regular) => match &regular.type_arguments {
            None => ty.clone(),
            Some(args) => Type::Regular(Arc::new(RegularType {
                def: regular.def,
                name: regular.name.clone(),
                type_arguments: Some(args.iter().map(|arg| instantiate_type(arg, subst)).collect()),
            })),
        },
    }
}

fn instantiate_member(member: &MemberDef, subst: &TypeSubstitution) -> MemberDef {
    let ty = match &member.type_parameters {
        Some(own) => instantiate_type(&member.ty, &subst.without(own)),
        None => instantiate_type(&member.ty, subst),
    };
    MemberDef {
        ty,
        ..member.clone()
    }
}

/// Bind an unbound generic definition to concrete type arguments.
///
/// Two calls with the same arguments produce two independent but
/// structurally equal values.
pub fn bind_type_parameters(
    db: &DefinitionStore,
    generic: &Type,
    arguments: Vec<Type>,
) -> Result<Type, SolverError> {
    let Type::Regular(regular) = generic else {
        return Err(SolverError::NotGeneric {
            name: format_type(generic),
        });
    };
    let def = db
        .get(regular.def)
        .ok_or(SolverError::UnknownDefinition(regular.def))?;
    if !def.is_generic() || regular.type_arguments.is_some() {
        return Err(SolverError::NotGeneric {
            name: regular.name.to_string(),
        });
    }
    if def.arity() != arguments.len() {
        return Err(SolverError::TypeArgumentArity {
            name: def.name.clone(),
            expected: def.arity(),
            actual: arguments.len(),
        });
    }
    trace!(name = %def.name, arity = arguments.len(), "binding generic definition");
    Ok(Type::Regular(Arc::new(RegularType {
        def: regular.def,
        name: regular.name.clone(),
        type_arguments: Some(arguments),
    })))
}

/// Substitution mapping a bound instantiation's definition parameters to its
/// arguments. Empty for non-generic and unbound references.
pub fn substitution_for(db: &DefinitionStore, regular: &RegularType) -> TypeSubstitution {
    match (
        db.get(regular.def).and_then(|def| def.type_parameters.as_deref()),
        regular.type_arguments.as_deref(),
    ) {
        (Some(params), Some(args)) => TypeSubstitution::from_pairs(params, args),
        _ => TypeSubstitution::new(),
    }
}

/// Own members of `regular`, with the instantiation's arguments substituted.
pub fn members_of(db: &DefinitionStore, regular: &RegularType) -> Vec<MemberDef> {
    let Some(def) = db.get(regular.def) else {
        return Vec::new();
    };
    let subst = substitution_for(db, regular);
    def.members
        .iter()
        .map(|member| instantiate_member(member, &subst))
        .collect()
}

/// Base type of `regular`, with the instantiation's arguments substituted.
pub fn base_of(db: &DefinitionStore, regular: &RegularType) -> Option<Type> {
    let def = db.get(regular.def)?;
    let base = def.base.as_ref()?;
    Some(instantiate_type(base, &substitution_for(db, regular)))
}

/// Names of the type parameters occurring in `ty`, in first-seen order.
pub fn free_type_parameters(ty: &Type) -> Vec<Name> {
    fn collect(ty: &Type, out: &mut Vec<Name>) {
        match ty {
            Type::Unknown | Type::Never => {}
            Type::TypeParameter(param) => {
                if !out.contains(&param.name) {
                    out.push(param.name.clone());
                }
            }
            Type::Literal(literal) => collect(&literal.backing, out),
            Type::Union(union) => union.members.iter().for_each(|m| collect(m, out)),
            Type::Func(func) => {
                func.parameters.iter().for_each(|p| collect(&p.ty, out));
                collect(&func.return_type, out);
            }
            Type::Regular(regular) => {
                if let Some(args) = &regular.type_arguments {
                    args.iter().for_each(|arg| collect(arg, out));
                }
            }
        }
    }
    let mut out = Vec::new();
    collect(ty, &mut out);
    out
}
