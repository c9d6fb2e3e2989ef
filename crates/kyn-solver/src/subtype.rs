//! Subtype queries.
//!
//! The checker consults this as an oracle: `is_subtype_of(ctx, sub, sup)`.
//! The context carries two leniency flags controlling whether error and stub
//! types compare equal to anything; semantic checkers that must not silently
//! accept erroneous signatures disable both.

use crate::def::{ClassStore, DefId, Variance};
use crate::instantiate::{TypeSubstitution, substitute_type};
use crate::intern::TypeInterner;
use crate::types::{IntrinsicKind, TypeData, TypeId};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Per-check subtyping context.
#[derive(Copy, Clone, Debug)]
pub struct SubtypeContext {
    pub error_types_equal_anything: bool,
    pub stub_types_equal_anything: bool,
}

impl SubtypeContext {
    pub const fn new(error_types_equal_anything: bool, stub_types_equal_anything: bool) -> Self {
        Self {
            error_types_equal_anything,
            stub_types_equal_anything,
        }
    }

    /// Both leniency flags disabled: erroneous or still-unresolved types
    /// produce hard subtype failures.
    pub const fn strict() -> Self {
        Self::new(false, false)
    }
}

/// For a flexible type, its upper (more permissive) bound; any other type is
/// its own upper bound.
pub fn upper_bound_if_flexible(interner: &TypeInterner, ty: TypeId) -> TypeId {
    match interner.lookup(ty) {
        TypeData::Flexible { upper, .. } => upper,
        _ => ty,
    }
}

/// Nominal subtype checker over a `ClassStore`.
pub struct SubtypeChecker<'a> {
    types: &'a TypeInterner,
    classes: &'a ClassStore,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(types: &'a TypeInterner, classes: &'a ClassStore) -> Self {
        Self { types, classes }
    }

    pub fn is_subtype_of(&self, ctx: &SubtypeContext, sub: TypeId, sup: TypeId) -> bool {
        let mut visited = FxHashSet::default();
        let result = self.check(ctx, sub, sup, &mut visited);
        trace!(?sub, ?sup, result, "subtype query");
        result
    }

    fn check(
        &self,
        ctx: &SubtypeContext,
        sub: TypeId,
        sup: TypeId,
        visited: &mut FxHashSet<(TypeId, TypeId)>,
    ) -> bool {
        let sub_data = self.types.lookup(sub);
        let sup_data = self.types.lookup(sup);

        // Error and stub types decide before reflexivity: with the flag off,
        // even `Error <: Error` is a hard failure.
        if sub_data.is_error() || sup_data.is_error() {
            return ctx.error_types_equal_anything;
        }
        if sub_data.is_stub() || sup_data.is_stub() {
            return ctx.stub_types_equal_anything;
        }

        if sub == sup {
            return true;
        }

        // Recursive hierarchies: a pair already on the stack does not prove
        // itself. The pair leaves the stack once explored, so an unrelated
        // re-query of the same pair (two arguments of the same generic, say)
        // is answered on its own merits.
        if !visited.insert((sub, sup)) {
            return false;
        }
        let result = self.check_unrolled(ctx, sub_data, sup_data, sub, sup, visited);
        visited.remove(&(sub, sup));
        result
    }

    fn check_unrolled(
        &self,
        ctx: &SubtypeContext,
        sub_data: TypeData,
        sup_data: TypeData,
        sub: TypeId,
        sup: TypeId,
        visited: &mut FxHashSet<(TypeId, TypeId)>,
    ) -> bool {
        // Flexible bounds: a flexible subtype is as good as its lower bound,
        // a flexible supertype as permissive as its upper bound.
        if let TypeData::Flexible { lower, .. } = sub_data {
            return self.check(ctx, lower, sup, visited);
        }
        if let TypeData::Flexible { upper, .. } = sup_data {
            return self.check(ctx, sub, upper, visited);
        }

        if sub_data.is_nullable() && !sup_data.is_nullable() {
            return false;
        }

        if matches!(
            sub_data,
            TypeData::Intrinsic {
                kind: IntrinsicKind::Nothing,
                ..
            }
        ) {
            return true;
        }
        if matches!(
            sup_data,
            TypeData::Intrinsic {
                kind: IntrinsicKind::Any,
                ..
            }
        ) {
            return true;
        }

        match (sub_data, sup_data) {
            (TypeData::Intrinsic { kind: a, .. }, TypeData::Intrinsic { kind: b, .. }) => a == b,
            (TypeData::TypeParam { param: a, .. }, TypeData::TypeParam { param: b, .. }) => a == b,
            (
                TypeData::Class {
                    def: sub_def,
                    args: sub_args,
                    ..
                },
                TypeData::Class {
                    def: sup_def,
                    args: sup_args,
                    ..
                },
            ) => {
                if sub_def == sup_def {
                    self.check_args(ctx, sub_def, &sub_args, &sup_args, visited)
                } else {
                    self.check_via_supertypes(ctx, sub_def, &sub_args, sup, visited)
                }
            }
            _ => false,
        }
    }

    /// Same-constructor comparison: arguments compare per the declared
    /// variance of each class type parameter.
    fn check_args(
        &self,
        ctx: &SubtypeContext,
        def: DefId,
        sub_args: &[TypeId],
        sup_args: &[TypeId],
        visited: &mut FxHashSet<(TypeId, TypeId)>,
    ) -> bool {
        if sub_args.len() != sup_args.len() {
            return false;
        }
        let Some(params) = self.classes.get_type_params(def) else {
            return false;
        };
        if params.len() != sub_args.len() {
            return false;
        }

        params
            .iter()
            .zip(sub_args.iter().zip(sup_args.iter()))
            .all(|(param, (&s, &t))| match param.variance {
                Variance::Covariant => self.check(ctx, s, t, visited),
                Variance::Contravariant => self.check(ctx, t, s, visited),
                Variance::Invariant => {
                    self.check(ctx, s, t, visited) && self.check(ctx, t, s, visited)
                }
            })
    }

    /// Different constructors: instantiate each immediate supertype of the
    /// subtype's class with its arguments and recurse.
    fn check_via_supertypes(
        &self,
        ctx: &SubtypeContext,
        sub_def: DefId,
        sub_args: &[TypeId],
        sup: TypeId,
        visited: &mut FxHashSet<(TypeId, TypeId)>,
    ) -> bool {
        let Some(definition) = self.classes.get(sub_def) else {
            return false;
        };

        let subst = TypeSubstitution::from_pairs(
            definition
                .type_params
                .iter()
                .map(|p| p.id)
                .zip(sub_args.iter().copied()),
        );

        definition.supertypes.iter().any(|&supertype| {
            let instantiated = substitute_type(self.types, supertype, &subst);
            self.check(ctx, instantiated, sup, visited)
        })
    }
}

/// Convenience free function over a fresh checker.
pub fn is_subtype_of(
    types: &TypeInterner,
    classes: &ClassStore,
    ctx: &SubtypeContext,
    sub: TypeId,
    sup: TypeId,
) -> bool {
    SubtypeChecker::new(types, classes).is_subtype_of(ctx, sub, sup)
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
