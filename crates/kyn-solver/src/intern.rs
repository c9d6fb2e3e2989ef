//! Type interning.

use crate::types::{IntrinsicKind, TypeData, TypeId, TypeParamId};
use dashmap::DashMap;
use std::sync::RwLock;

/// Thread-safe type interner.
///
/// Structurally equal types share one `TypeId`. The well-known intrinsics
/// (`TypeId::ANY` etc.) are pre-interned at construction.
pub struct TypeInterner {
    map: DashMap<TypeData, TypeId>,
    types: RwLock<Vec<TypeData>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = Self {
            map: DashMap::new(),
            types: RwLock::new(Vec::new()),
        };
        // Order must match the TypeId constants.
        let intrinsics = [
            (IntrinsicKind::Any, false),
            (IntrinsicKind::Any, true),
            (IntrinsicKind::Nothing, false),
            (IntrinsicKind::Nothing, true),
            (IntrinsicKind::Unit, false),
            (IntrinsicKind::Error, false),
            (IntrinsicKind::Stub, false),
        ];
        for (kind, nullable) in intrinsics {
            interner.intern(TypeData::Intrinsic { kind, nullable });
        }
        interner
    }

    /// Intern a type, returning its `TypeId`.
    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(existing) = self.map.get(&data) {
            return *existing;
        }

        let mut types = self.types.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = self.map.get(&data) {
            return *existing;
        }
        let id = TypeId(u32::try_from(types.len()).unwrap_or(u32::MAX));
        types.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// Get the structural data behind a `TypeId`.
    ///
    /// Ids not produced by this interner resolve to the error type.
    pub fn lookup(&self, id: TypeId) -> TypeData {
        let types = self.types.read().unwrap_or_else(|e| e.into_inner());
        types.get(id.0 as usize).cloned().unwrap_or(TypeData::Intrinsic {
            kind: IntrinsicKind::Error,
            nullable: false,
        })
    }

    pub fn class(&self, def: crate::def::DefId, args: Vec<TypeId>, nullable: bool) -> TypeId {
        self.intern(TypeData::Class { def, args, nullable })
    }

    pub fn type_param(&self, param: TypeParamId, nullable: bool) -> TypeId {
        self.intern(TypeData::TypeParam { param, nullable })
    }

    pub fn flexible(&self, lower: TypeId, upper: TypeId) -> TypeId {
        self.intern(TypeData::Flexible { lower, upper })
    }

    pub fn is_nullable(&self, id: TypeId) -> bool {
        self.lookup(id).is_nullable()
    }

    /// Return the nullable (or non-nullable) version of a type.
    ///
    /// Marking a flexible type nullable marks both of its bounds.
    pub fn with_nullability(&self, id: TypeId, nullable: bool) -> TypeId {
        match self.lookup(id) {
            TypeData::Intrinsic { kind, nullable: n } if n != nullable => {
                self.intern(TypeData::Intrinsic { kind, nullable })
            }
            TypeData::Class { def, args, nullable: n } if n != nullable => {
                self.intern(TypeData::Class { def, args, nullable })
            }
            TypeData::TypeParam { param, nullable: n } if n != nullable => {
                self.intern(TypeData::TypeParam { param, nullable })
            }
            TypeData::Flexible { lower, upper } => {
                let new_lower = self.with_nullability(lower, nullable);
                let new_upper = self.with_nullability(upper, nullable);
                if new_lower == lower && new_upper == upper {
                    id
                } else {
                    self.flexible(new_lower, new_upper)
                }
            }
            _ => id,
        }
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
