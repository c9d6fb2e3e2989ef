//! Declaration model and member scopes.
//!
//! The binder side of the pipeline: immutable class declarations
//! (`ClassDecl`, `MemberDecl`), the class table, and the per-class
//! `MemberScope` that answers "which symbols does this member directly
//! override" queries for the semantic checkers.

pub mod decl;
pub mod scope;

pub use decl::{
    ClassDecl, ClassTable, ConstructorDecl, FunctionDecl, MemberDecl, MemberRef, PropertyDecl,
    TypeParamDecl, TypeRef,
};
pub use scope::{MemberKind, MemberScope, MemberSymbol, ProcessorAction};
