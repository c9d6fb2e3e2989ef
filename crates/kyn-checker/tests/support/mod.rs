#![allow(dead_code)]

use kyn_binder::{
    ClassDecl, ClassTable, ConstructorDecl, FunctionDecl, MemberDecl, PropertyDecl, TypeParamDecl,
    TypeRef,
};
use kyn_checker::{CheckerContext, OverrideCompatibilityChecker};
use kyn_common::{Diagnostic, Interner, Span};
use kyn_solver::{
    ClassDefinition, ClassStore, ClassTypeParam, DefId, TypeId, TypeInterner, TypeParamRegistry,
    Variance,
};

pub const FILE: &str = "main.kyn";

/// One compilation unit's worth of state, plus builders for declarations.
pub struct World {
    pub strings: Interner,
    pub types: TypeInterner,
    pub classes: ClassStore,
    pub params: TypeParamRegistry,
    pub table: ClassTable,
}

impl World {
    pub fn new() -> Self {
        Self {
            strings: Interner::new(),
            types: TypeInterner::new(),
            classes: ClassStore::new(),
            params: TypeParamRegistry::new(),
            table: ClassTable::new(),
        }
    }

    pub fn class(
        &mut self,
        name: &str,
        supertypes: Vec<TypeId>,
        members: Vec<MemberDecl>,
    ) -> DefId {
        self.generic_class(name, vec![], supertypes, members)
    }

    pub fn generic_class(
        &mut self,
        name: &str,
        type_params: Vec<(TypeParamDecl, Variance)>,
        supertypes: Vec<TypeId>,
        members: Vec<MemberDecl>,
    ) -> DefId {
        let atom = self.strings.intern(name);
        let def = self.classes.register(ClassDefinition {
            name: atom,
            type_params: type_params
                .iter()
                .map(|(p, variance)| ClassTypeParam {
                    id: p.id,
                    name: p.name,
                    variance: *variance,
                })
                .collect(),
            supertypes: supertypes.clone(),
        });
        self.table.insert(ClassDecl {
            def,
            name: atom,
            type_params: type_params.into_iter().map(|(p, _)| p).collect(),
            supertypes,
            members,
        });
        def
    }

    pub fn param(&self, name: &str) -> TypeParamDecl {
        let atom = self.strings.intern(name);
        TypeParamDecl {
            id: self.params.allocate(atom),
            name: atom,
        }
    }

    pub fn function(&self, name: &str, return_type: TypeRef, is_override: bool) -> MemberDecl {
        self.generic_function(name, vec![], return_type, is_override)
    }

    pub fn generic_function(
        &self,
        name: &str,
        type_params: Vec<TypeParamDecl>,
        return_type: TypeRef,
        is_override: bool,
    ) -> MemberDecl {
        MemberDecl::Function(FunctionDecl {
            name: self.strings.intern(name),
            type_params,
            return_type,
            is_override,
        })
    }

    pub fn property(
        &self,
        name: &str,
        ty: TypeRef,
        is_override: bool,
        is_mutable: bool,
    ) -> MemberDecl {
        MemberDecl::Property(PropertyDecl {
            name: self.strings.intern(name),
            type_params: vec![],
            ty,
            is_override,
            is_mutable,
        })
    }

    pub fn constructor(&self) -> MemberDecl {
        MemberDecl::Constructor(ConstructorDecl {
            is_primary: true,
            source: Some(Span::new(0, 5)),
        })
    }

    /// Run the override checker over one class and collect its diagnostics.
    pub fn check_class(&self, def: DefId) -> Vec<Diagnostic> {
        let mut ctx = CheckerContext::new(
            &self.strings,
            &self.types,
            &self.classes,
            &self.params,
            &self.table,
            FILE,
        );
        let mut checker = OverrideCompatibilityChecker::new(&mut ctx);
        let class = self.table.class(def).unwrap();
        checker.check_class(class);
        ctx.diagnostics
    }
}

/// A resolved type annotation with a fixed dummy span.
pub fn spanned(ty: TypeId) -> TypeRef {
    TypeRef::resolved(ty, Some(Span::new(10, 20)))
}

/// A resolved type annotation with no source span.
pub fn spanless(ty: TypeId) -> TypeRef {
    TypeRef::resolved(ty, None)
}
