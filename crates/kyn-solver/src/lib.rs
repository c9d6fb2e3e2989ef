//! Interned Type Model and Subtyping Engine
//!
//! This crate implements the type side of Kyanite's semantic analysis:
//!
//! - **Interned types**: O(1) type equality via interning (`TypeId` comparison)
//! - **Class definitions**: nominal class facts (`DefId`, variance, supertypes)
//! - **Substitution**: identity-keyed type-parameter substitution
//! - **Subtyping**: nominal hierarchy walks with variance, nullability, and
//!   flexible (platform-origin) bound handling

pub mod def;
mod format;
mod instantiate;
mod intern;
mod subtype;
pub mod types;

pub use def::{ClassDefinition, ClassStore, ClassTypeParam, DefId, TypeParamRegistry, Variance};
pub use format::TypeFormatter;
pub use instantiate::{TypeSubstitution, substitute_type};
pub use intern::TypeInterner;
pub use subtype::{SubtypeChecker, SubtypeContext, is_subtype_of, upper_bound_if_flexible};
pub use types::{IntrinsicKind, TypeData, TypeId, TypeParamId};
