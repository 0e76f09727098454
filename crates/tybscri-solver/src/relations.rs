//! Assignability between types.
//!
//! The relation is decided by case analysis on the target, after two
//! source-side rules that apply to every target:
//!
//! - `Never` is assignable to everything.
//! - A union source is assignable iff *every* alternative is, since the
//!   consumer cannot know which alternative arrived.
//!
//! A union *target* then only needs one alternative to accept the source.
//! `Unknown` is only related to itself, so an unresolved expression never
//! silently satisfies a check; callers skip reporting when either side is
//! `Unknown` to avoid cascading errors.

use crate::def::DefinitionStore;
use crate::instantiate::base_of;
use crate::types::{FuncType, RegularType, Type, Variance};
use tracing::trace;
use tybscri_common::limits::{MAX_BASE_CHAIN_DEPTH, MAX_TYPE_RELATION_DEPTH};

/// Returns true if a value of type `from` may be used where `to` is expected.
pub fn is_assignable(db: &DefinitionStore, from: &Type, to: &Type) -> bool {
    AssignabilityChecker::new(db).check(from, to)
}

/// Structural equivalence: assignable in both directions.
pub fn are_equivalent(db: &DefinitionStore, a: &Type, b: &Type) -> bool {
    let mut checker = AssignabilityChecker::new(db);
    checker.check(a, b) && checker.check(b, a)
}

pub struct AssignabilityChecker<'a> {
    db: &'a DefinitionStore,
    depth: u32,
}

impl<'a> AssignabilityChecker<'a> {
    pub fn new(db: &'a DefinitionStore) -> Self {
        Self { db, depth: 0 }
    }

    pub fn check(&mut self, from: &Type, to: &Type) -> bool {
        if self.depth >= MAX_TYPE_RELATION_DEPTH {
            trace!(depth = self.depth, "relation depth exceeded");
            return false;
        }
        self.depth += 1;
        let result = self.check_inner(from, to);
        self.depth -= 1;
        result
    }

    fn check_inner(&mut self, from: &Type, to: &Type) -> bool {
        match (from, to) {
            (Type::Never, _) => return true,
            (_, Type::Never) => return false,
            (Type::Unknown, Type::Unknown) => return true,
            (Type::Unknown, _) | (_, Type::Unknown) => return false,
            (Type::Union(union), _) => {
                return union.members.iter().all(|member| self.check(member, to));
            }
            _ => {}
        }

        match to {
            Type::Union(union) => union.members.iter().any(|member| self.check(from, member)),
            Type::Regular(target) => match from {
                Type::Regular(source) => self.check_regular(source, target),
                Type::Literal(literal) => self.check(&literal.backing, to),
                _ => false,
            },
            Type::Func(target) => match from {
                Type::Func(source) => self.check_func(source, target),
                _ => false,
            },
            Type::Literal(target) => match from {
                Type::Literal(source) => source.value == target.value,
                _ => false,
            },
            Type::TypeParameter(target) => match from {
                Type::TypeParameter(source) => source.name == target.name,
                _ => false,
            },
            // Handled above.
            Type::Unknown | Type::Never => false,
        }
    }

    /// Covariant return, contravariant parameters. `to` may declare extra
    /// parameters the source ignores.
    fn check_func(&mut self, from: &FuncType, to: &FuncType) -> bool {
        self.check(&from.return_type, &to.return_type)
            && to.parameters.len() >= from.parameters.len()
            && from
                .parameters
                .iter()
                .zip(&to.parameters)
                .all(|(source_param, target_param)| self.check(&target_param.ty, &source_param.ty))
    }

    /// Walk the source's base chain looking for the target by name, then
    /// compare type arguments by declared variance.
    fn check_regular(&mut self, from: &RegularType, to: &RegularType) -> bool {
        let mut current = Some(Type::Regular(std::sync::Arc::new(from.clone())));
        let mut steps = 0;
        while let Some(Type::Regular(candidate)) = current {
            if candidate.name == to.name {
                return self.check_type_arguments(&candidate, to);
            }
            steps += 1;
            if steps > MAX_BASE_CHAIN_DEPTH {
                trace!(name = %from.name, "base chain too deep");
                return false;
            }
            current = base_of(self.db, &candidate);
        }
        false
    }

    fn check_type_arguments(&mut self, from: &RegularType, to: &RegularType) -> bool {
        let (source_args, target_args) = match (&from.type_arguments, &to.type_arguments) {
            (_, None) => return true,
            (None, Some(_)) => return false,
            (Some(source), Some(target)) => (source, target),
        };
        if source_args.len() != target_args.len() {
            return false;
        }
        let variances: Vec<Variance> = self
            .db
            .get(to.def)
            .and_then(|def| def.type_parameters.as_ref())
            .map(|params| params.iter().map(|p| p.variance).collect())
            .unwrap_or_default();

        source_args.iter().zip(target_args).enumerate().all(|(i, (source, target))| {
            match variances.get(i).copied().unwrap_or_default() {
                Variance::Out => self.check(source, target),
                Variance::In => self.check(target, source),
                Variance::Invariant => self.check(source, target) && self.check(target, source),
            }
        })
    }
}
