//! Built-in types every script can rely on.

use crate::def::{DefId, DefinitionStore};
use crate::types::{
    LiteralValue, MemberDef, Name, ParameterDef, RegularType, Type, TypeParameter, Variance,
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct WellKnownTypes {
    pub number: Type,
    pub string: Type,
    pub boolean: Type,
    pub null: Type,
    pub true_type: Type,
    pub false_type: Type,
    /// Unbound `List<out T>`.
    pub list: Type,
    list_def: DefId,
}

impl WellKnownTypes {
    /// Register the built-in definitions in `store`.
    pub fn install(store: &mut DefinitionStore) -> Self {
        let number = store.register("number", None, Vec::new());
        let boolean = store.register("boolean", None, Vec::new());
        let null = store.register("null", None, Vec::new());
        let string = store.register(
            "string",
            None,
            vec![MemberDef::property("length", number.clone())],
        );

        let t = TypeParameter::new("T", Variance::Out);
        let u = TypeParameter::new("U", Variance::Invariant);
        let list_def = store.reserve("List", vec![t.clone()]);
        let list_of = |element: Type| {
            Type::Regular(Arc::new(RegularType {
                def: list_def,
                name: Name::from("List"),
                type_arguments: Some(vec![element]),
            }))
        };
        let item = |ty: Type, ret: Type| Type::func(vec![ParameterDef::new("item", ty)], ret);

        let members = vec![
            MemberDef::property("length", number.clone()),
            MemberDef::method(
                "get",
                Vec::new(),
                Type::func(vec![ParameterDef::new("index", number.clone())], t.to_type()),
            ),
            MemberDef::method(
                "map",
                vec![u.clone()],
                Type::func(
                    vec![ParameterDef::new(
                        "transform",
                        item(t.to_type(), u.to_type()),
                    )],
                    list_of(u.to_type()),
                ),
            ),
            MemberDef::method(
                "filter",
                Vec::new(),
                Type::func(
                    vec![ParameterDef::new(
                        "predicate",
                        item(t.to_type(), boolean.clone()),
                    )],
                    list_of(t.to_type()),
                ),
            ),
        ];
        store.define(list_def, None, members);

        Self {
            true_type: Type::literal(LiteralValue::Boolean(true), boolean.clone()),
            false_type: Type::literal(LiteralValue::Boolean(false), boolean.clone()),
            list: store.unbound(list_def),
            number,
            string,
            boolean,
            null,
            list_def,
        }
    }

    /// Literal type for `value`, backed by its widened built-in type.
    pub fn literal(&self, value: LiteralValue) -> Type {
        let backing = match &value {
            LiteralValue::Number(_) => self.number.clone(),
            LiteralValue::String(_) => self.string.clone(),
            LiteralValue::Boolean(_) => self.boolean.clone(),
        };
        Type::literal(value, backing)
    }

    /// `List<element>`.
    pub fn list_of(&self, element: Type) -> Type {
        Type::Regular(Arc::new(RegularType {
            def: self.list_def,
            name: Name::from("List"),
            type_arguments: Some(vec![element]),
        }))
    }

    /// Element type if `ty` is a bound list.
    pub fn list_element(&self, ty: &Type) -> Option<Type> {
        let regular = ty.as_regular()?;
        if regular.def != self.list_def {
            return None;
        }
        regular.type_arguments.as_ref()?.first().cloned()
    }
}
