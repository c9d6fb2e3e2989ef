//! Structural type representation.
//!
//! Types are interned: structurally equal `TypeData` values share one
//! `TypeId`, so type equality is a single integer comparison. Nullability is
//! a marker on each nominal variant; flexible (platform-origin) types carry
//! an explicit lower/upper bound pair instead of a hidden dynamic
//! nullability.

use crate::def::DefId;

/// Handle to an interned type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    // Well-known intrinsics, pre-interned by `TypeInterner::new` in this order.
    pub const ANY: Self = Self(0);
    pub const NULLABLE_ANY: Self = Self(1);
    pub const NOTHING: Self = Self(2);
    pub const NULLABLE_NOTHING: Self = Self(3);
    pub const UNIT: Self = Self(4);
    pub const ERROR: Self = Self(5);
    pub const STUB: Self = Self(6);
}

/// Identity of a declared type parameter.
///
/// Allocated once per declaration by [`crate::def::TypeParamRegistry`] and
/// never reused, so substitution maps key on identity rather than name. Two
/// declarations may use the same name for unrelated parameters without
/// aliasing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamId(pub u32);

/// Built-in types with fixed meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    /// Top type: every non-nullable type is a subtype of `Any`.
    Any,
    /// Bottom type: subtype of everything.
    Nothing,
    Unit,
    /// Produced for unresolvable or erroneous type references.
    Error,
    /// Placeholder for a type not yet inferred.
    Stub,
}

/// Structural type data behind a `TypeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic {
        kind: IntrinsicKind,
        nullable: bool,
    },
    /// A class constructor application, e.g. `Box<Int>` or `Int?`.
    Class {
        def: DefId,
        args: Vec<TypeId>,
        nullable: bool,
    },
    /// Reference to a declared type parameter, e.g. `T` or `T?`.
    TypeParam {
        param: TypeParamId,
        nullable: bool,
    },
    /// Flexible (platform-origin) type with uncertain exact nullability.
    /// Comparisons against a flexible supertype use only the upper bound.
    Flexible {
        lower: TypeId,
        upper: TypeId,
    },
}

impl TypeData {
    /// Whether a value of this type may be null.
    ///
    /// Flexible types answer for their upper bound side conservatively
    /// (callers that need bound-specific answers extract a bound first).
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Intrinsic { nullable, .. }
            | Self::Class { nullable, .. }
            | Self::TypeParam { nullable, .. } => *nullable,
            Self::Flexible { .. } => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Intrinsic {
                kind: IntrinsicKind::Error,
                ..
            }
        )
    }

    pub fn is_stub(&self) -> bool {
        matches!(
            self,
            Self::Intrinsic {
                kind: IntrinsicKind::Stub,
                ..
            }
        )
    }
}
