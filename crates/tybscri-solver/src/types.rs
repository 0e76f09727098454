//! Type representation.
//!
//! Types are immutable values. Composite variants are reference counted so
//! that cloning a type (which happens constantly during resolution) never
//! copies structure, and so that type values can be shared across threads
//! for reads.
//!
//! `Regular` types do not embed their members: they reference a definition
//! in the [`DefinitionStore`](crate::def::DefinitionStore) by [`DefId`] and
//! carry their own type arguments. This is what lets a generic definition
//! mention its own instantiations (`List<T>.map` returns `List<U>`).

use crate::def::DefId;
use std::fmt;
use std::sync::Arc;

/// Shared, immutable identifier text.
pub type Name = Arc<str>;

#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    /// Not yet resolved, or recovered from an error.
    Unknown,
    /// Bottom type.
    Never,
    Literal(Arc<LiteralType>),
    Union(Arc<UnionType>),
    Func(Arc<FuncType>),
    Regular(Arc<RegularType>),
    TypeParameter(Arc<TypeParameter>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(Name),
    Boolean(bool),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::String(s) => write!(f, "\"{s}\""),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A single constant value paired with its widened type.
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralType {
    pub value: LiteralValue,
    pub backing: Type,
}

/// Ordered set of alternatives. Build through
/// [`create_union`](crate::factory::create_union) so members stay flat and
/// free of duplicates.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub members: Vec<Type>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDef {
    /// Documentation only; parameters match by position.
    pub name: Name,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncType {
    pub parameters: Vec<ParameterDef>,
    pub return_type: Type,
}

/// Nominal type reference.
///
/// `type_arguments` is `None` both for non-generic definitions and for the
/// unbound form of a generic definition; a bound instantiation always has
/// `Some` with the definition's arity.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularType {
    pub def: DefId,
    pub name: Name,
    pub type_arguments: Option<Vec<Type>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    /// Contravariant (`in T`).
    In,
    /// Covariant (`out T`).
    Out,
    #[default]
    Invariant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameter {
    pub name: Name,
    pub variance: Variance,
}

/// A property or callable member of a `Regular` type.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDef {
    pub name: Name,
    pub ty: Type,
    /// Const members are the only ones whose reads can be narrowed.
    pub is_const: bool,
    /// Own type parameters of a generic method (`map<U>`).
    pub type_parameters: Option<Vec<TypeParameter>>,
    /// Name of the definition that declares this member. Filled in by the
    /// definition store.
    pub owner: Option<Name>,
}

impl MemberDef {
    pub fn property(name: &str, ty: Type) -> Self {
        Self {
            name: Name::from(name),
            ty,
            is_const: true,
            type_parameters: None,
            owner: None,
        }
    }

    pub fn mutable_property(name: &str, ty: Type) -> Self {
        Self {
            is_const: false,
            ..Self::property(name, ty)
        }
    }

    pub fn method(name: &str, type_parameters: Vec<TypeParameter>, ty: Type) -> Self {
        Self {
            type_parameters: if type_parameters.is_empty() {
                None
            } else {
                Some(type_parameters)
            },
            ..Self::property(name, ty)
        }
    }
}

impl Type {
    pub fn literal(value: LiteralValue, backing: Type) -> Self {
        Type::Literal(Arc::new(LiteralType { value, backing }))
    }

    pub fn func(parameters: Vec<ParameterDef>, return_type: Type) -> Self {
        Type::Func(Arc::new(FuncType {
            parameters,
            return_type,
        }))
    }

    pub fn type_parameter(name: &str, variance: Variance) -> Self {
        Type::TypeParameter(Arc::new(TypeParameter {
            name: Name::from(name),
            variance,
        }))
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub const fn is_never(&self) -> bool {
        matches!(self, Type::Never)
    }

    pub fn as_func(&self) -> Option<&FuncType> {
        match self {
            Type::Func(func) => Some(func.as_ref()),
            _ => None,
        }
    }

    pub fn as_regular(&self) -> Option<&RegularType> {
        match self {
            Type::Regular(regular) => Some(regular.as_ref()),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralType> {
        match self {
            Type::Literal(literal) => Some(literal.as_ref()),
            _ => None,
        }
    }

    pub fn union_members(&self) -> Option<&[Type]> {
        match self {
            Type::Union(union) => Some(union.members.as_slice()),
            _ => None,
        }
    }

    /// True if `Unknown` appears anywhere inside this type.
    pub fn contains_unknown(&self) -> bool {
        match self {
            Type::Unknown => true,
            Type::Never | Type::TypeParameter(_) => false,
            Type::Literal(literal) => literal.backing.contains_unknown(),
            Type::Union(union) => union.members.iter().any(Type::contains_unknown),
            Type::Func(func) => {
                func.return_type.contains_unknown()
                    || func.parameters.iter().any(|p| p.ty.contains_unknown())
            }
            Type::Regular(regular) => regular
                .type_arguments
                .as_deref()
                .is_some_and(|args| args.iter().any(Type::contains_unknown)),
        }
    }
}

impl ParameterDef {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: Name::from(name),
            ty,
        }
    }
}

impl TypeParameter {
    pub fn new(name: &str, variance: Variance) -> Self {
        Self {
            name: Name::from(name),
            variance,
        }
    }

    pub fn to_type(&self) -> Type {
        Type::TypeParameter(Arc::new(self.clone()))
    }
}
