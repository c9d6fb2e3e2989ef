//! Definition identifiers and storage for the solver.
//!
//! `DefId` identifies a class definition; `ClassStore` holds the nominal
//! facts the subtype checker needs (declared type parameters with variance,
//! and instantiated supertype references). `TypeParamRegistry` hands out the
//! stable identities that substitution maps key on.

use crate::types::{TypeId, TypeParamId};
use dashmap::DashMap;
use kyn_common::Atom;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Identifier of a class definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

/// Declaration-site variance of a class type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variance {
    Invariant,
    /// `out T`: arguments compare covariantly.
    Covariant,
    /// `in T`: arguments compare contravariantly.
    Contravariant,
}

/// A class-level type parameter with its declaration-site variance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTypeParam {
    pub id: TypeParamId,
    pub name: Atom,
    pub variance: Variance,
}

/// Nominal facts about a class definition.
#[derive(Clone, Debug)]
pub struct ClassDefinition {
    pub name: Atom,
    pub type_params: Vec<ClassTypeParam>,
    /// Immediate supertype references, expressed in this class's own
    /// type-parameter space (e.g. `B<U>` declares `supertypes = [A<U>]`).
    pub supertypes: Vec<TypeId>,
}

/// Thread-safe storage for class definitions.
pub struct ClassStore {
    definitions: DashMap<DefId, ClassDefinition>,
    next_id: AtomicU32,
}

impl Default for ClassStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassStore {
    pub fn new() -> Self {
        Self {
            definitions: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    /// Reserve a `DefId` without defining it yet.
    ///
    /// Needed when a class's supertype references mention the class's own
    /// `DefId` indirectly (mutual recursion between definitions).
    pub fn reserve(&self) -> DefId {
        let id = DefId(self.next_id.fetch_add(1, Ordering::SeqCst));
        trace!(def_id = id.0, "ClassStore::reserve");
        id
    }

    /// Define a previously reserved `DefId`.
    pub fn define(&self, id: DefId, definition: ClassDefinition) {
        trace!(def_id = id.0, "ClassStore::define");
        self.definitions.insert(id, definition);
    }

    /// Register a new definition and return its `DefId`.
    pub fn register(&self, definition: ClassDefinition) -> DefId {
        let id = self.reserve();
        self.definitions.insert(id, definition);
        id
    }

    pub fn get(&self, id: DefId) -> Option<ClassDefinition> {
        self.definitions.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.definitions.contains_key(&id)
    }

    pub fn get_name(&self, id: DefId) -> Option<Atom> {
        self.definitions.get(&id).map(|r| r.name)
    }

    pub fn get_type_params(&self, id: DefId) -> Option<Vec<ClassTypeParam>> {
        self.definitions.get(&id).map(|r| r.type_params.clone())
    }

    pub fn get_supertypes(&self, id: DefId) -> Option<Vec<TypeId>> {
        self.definitions.get(&id).map(|r| r.supertypes.clone())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Allocator for type-parameter identities.
///
/// Every declared type parameter gets a fresh `TypeParamId` at
/// declaration-build time; the registry also remembers the display name for
/// diagnostics.
pub struct TypeParamRegistry {
    names: DashMap<TypeParamId, Atom>,
    next_id: AtomicU32,
}

impl Default for TypeParamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeParamRegistry {
    pub fn new() -> Self {
        Self {
            names: DashMap::new(),
            next_id: AtomicU32::new(0),
        }
    }

    pub fn allocate(&self, name: Atom) -> TypeParamId {
        let id = TypeParamId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.names.insert(id, name);
        id
    }

    pub fn name(&self, id: TypeParamId) -> Option<Atom> {
        self.names.get(&id).map(|r| *r)
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
