//! Type-parameter substitution.
//!
//! A `TypeSubstitution` maps type-parameter identities to replacement types;
//! `substitute_type` rewrites a type expression structurally, replacing every
//! occurrence of a mapped parameter. Substitution never fails: unmapped
//! parameters are left as-is, because partial maps are expected when an
//! override and a base declaration expose different parameter counts.

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId, TypeParamId};
use rustc_hash::FxHashMap;

/// Mapping from type-parameter identities to replacement types.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<TypeParamId, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn insert(&mut self, param: TypeParamId, replacement: TypeId) {
        self.map.insert(param, replacement);
    }

    pub fn get(&self, param: TypeParamId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (TypeParamId, TypeId)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }
}

/// Rewrite `ty`, replacing every mapped type-parameter reference.
///
/// An empty map is an identity fast path; most declarations are non-generic.
/// A nullable parameter reference (`T?`) makes its replacement nullable.
pub fn substitute_type(interner: &TypeInterner, ty: TypeId, subst: &TypeSubstitution) -> TypeId {
    if subst.is_empty() {
        return ty;
    }

    match interner.lookup(ty) {
        TypeData::TypeParam { param, nullable } => match subst.get(param) {
            Some(replacement) if nullable => interner.with_nullability(replacement, true),
            Some(replacement) => replacement,
            None => ty,
        },
        TypeData::Class { def, args, nullable } => {
            let new_args: Vec<TypeId> = args
                .iter()
                .map(|&arg| substitute_type(interner, arg, subst))
                .collect();
            if new_args == args {
                ty
            } else {
                interner.class(def, new_args, nullable)
            }
        }
        TypeData::Flexible { lower, upper } => {
            let new_lower = substitute_type(interner, lower, subst);
            let new_upper = substitute_type(interner, upper, subst);
            if new_lower == lower && new_upper == upper {
                ty
            } else {
                interner.flexible(new_lower, new_upper)
            }
        }
        TypeData::Intrinsic { .. } => ty,
    }
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
