//! Class member declarations.
//!
//! Declarations are immutable once built; they own their type-parameter
//! lists and are owned by the enclosing class declaration.

use kyn_common::{Atom, Interner, Span};
use kyn_solver::{DefId, TypeId, TypeParamId};
use rustc_hash::FxHashMap;

/// A type annotation as written in a declaration.
///
/// `Implicit` models a return/property type that has not been resolved yet
/// (inference pending). Checkers treat it as "not yet checkable", never as an
/// error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Resolved { ty: TypeId, source: Option<Span> },
    Implicit,
}

impl TypeRef {
    pub fn resolved(ty: TypeId, source: Option<Span>) -> Self {
        Self::Resolved { ty, source }
    }

    pub fn resolved_type(&self) -> Option<TypeId> {
        match self {
            Self::Resolved { ty, .. } => Some(*ty),
            Self::Implicit => None,
        }
    }

    pub fn source(&self) -> Option<Span> {
        match self {
            Self::Resolved { source, .. } => *source,
            Self::Implicit => None,
        }
    }
}

/// A member-level type parameter declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamDecl {
    pub id: TypeParamId,
    pub name: Atom,
}

#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub name: Atom,
    pub type_params: Vec<TypeParamDecl>,
    pub return_type: TypeRef,
    pub is_override: bool,
}

#[derive(Clone, Debug)]
pub struct PropertyDecl {
    pub name: Atom,
    pub type_params: Vec<TypeParamDecl>,
    pub ty: TypeRef,
    pub is_override: bool,
    /// `var` vs `val`: a mutable property's type is both its getter's return
    /// type and its setter's parameter type.
    pub is_mutable: bool,
}

#[derive(Clone, Debug)]
pub struct ConstructorDecl {
    pub is_primary: bool,
    pub source: Option<Span>,
}

/// A named member of a class.
///
/// Closed enumeration: adding a declaration kind must fail exhaustiveness
/// checks in every dispatching checker, never fall through silently.
#[derive(Clone, Debug)]
pub enum MemberDecl {
    Function(FunctionDecl),
    Property(PropertyDecl),
    Constructor(ConstructorDecl),
    NestedClass(DefId),
}

impl MemberDecl {
    pub fn name(&self) -> Option<Atom> {
        match self {
            Self::Function(f) => Some(f.name),
            Self::Property(p) => Some(p.name),
            Self::Constructor(_) | Self::NestedClass(_) => None,
        }
    }

    /// Declared type parameters, for members that can own them.
    pub fn type_params(&self) -> Option<&[TypeParamDecl]> {
        match self {
            Self::Function(f) => Some(&f.type_params),
            Self::Property(p) => Some(&p.type_params),
            Self::Constructor(_) | Self::NestedClass(_) => None,
        }
    }
}

/// A class declaration with its members in declaration order.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub def: DefId,
    pub name: Atom,
    pub type_params: Vec<TypeParamDecl>,
    pub supertypes: Vec<TypeId>,
    pub members: Vec<MemberDecl>,
}

/// Stable reference to a member declaration: owning class + member index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberRef {
    pub owner: DefId,
    pub index: u32,
}

/// The compilation unit's class declarations, keyed by `DefId`.
#[derive(Default)]
pub struct ClassTable {
    classes: FxHashMap<DefId, ClassDecl>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, decl: ClassDecl) {
        self.classes.insert(decl.def, decl);
    }

    pub fn class(&self, def: DefId) -> Option<&ClassDecl> {
        self.classes.get(&def)
    }

    pub fn member(&self, member: MemberRef) -> Option<&MemberDecl> {
        self.class(member.owner)?.members.get(member.index as usize)
    }

    /// Render a member reference as `Class.member` for diagnostics.
    pub fn render_member(&self, strings: &Interner, member: MemberRef) -> Option<String> {
        let class = self.class(member.owner)?;
        let name = self.member(member)?.name()?;
        Some(format!(
            "{}.{}",
            strings.resolve(class.name),
            strings.resolve(name)
        ))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
