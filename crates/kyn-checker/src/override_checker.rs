//! Override type-compatibility checking.
//!
//! For every member of a class marked as overriding, resolves the set of
//! directly overridden symbols in immediate supertypes, re-bases each base
//! signature into the override's generic parameter space, and verifies under
//! full subtyping rules that the override's return/property type does not
//! widen beyond what each overridden signature permits. On violation, exactly
//! one diagnostic is reported per member, naming the first violated base
//! declaration in declaration order.

use crate::context::CheckerContext;
use kyn_binder::{
    ClassDecl, FunctionDecl, MemberDecl, MemberRef, MemberScope, MemberSymbol, ProcessorAction,
    PropertyDecl, TypeParamDecl, TypeRef,
};
use kyn_solver::{
    SubtypeChecker, SubtypeContext, TypeId, TypeParamId, TypeSubstitution, substitute_type,
    upper_bound_if_flexible,
};
use rustc_hash::FxHashSet;
use tracing::trace;

pub struct OverrideCompatibilityChecker<'a, 'ctx> {
    pub(crate) ctx: &'a mut CheckerContext<'ctx>,
}

impl<'a, 'ctx> OverrideCompatibilityChecker<'a, 'ctx> {
    pub fn new(ctx: &'a mut CheckerContext<'ctx>) -> Self {
        Self { ctx }
    }

    /// Check every member declaration of a class, in declaration order.
    ///
    /// The subtyping context is built once per class with both leniency
    /// flags disabled: a genuinely erroneous or unresolved base type still
    /// produces a hard subtype failure instead of being silently accepted.
    /// No step here is fatal; partially resolved members degrade to "skip".
    pub fn check_class(&mut self, class: &ClassDecl) {
        let subtype_ctx = SubtypeContext::strict();
        let mut scope =
            MemberScope::new(self.ctx.types, self.ctx.classes, self.ctx.table, class.def);

        for (index, member) in class.members.iter().enumerate() {
            match member {
                MemberDecl::Function(function) => {
                    self.check_function(class, index, function, &mut scope, &subtype_ctx);
                }
                MemberDecl::Property(property) => {
                    self.check_property(class, index, property, &mut scope, &subtype_ctx);
                }
                MemberDecl::Constructor(_) | MemberDecl::NestedClass(_) => {}
            }
        }
    }

    /// Symbols a function directly overrides, deduplicated by identity.
    ///
    /// The by-name lookup is a required priming step: the scope resolves a
    /// name's override chain lazily on first lookup, so it must run before
    /// the direct-overrides query. Its result is intentionally unused.
    fn direct_overrides_of_function(
        scope: &mut MemberScope<'_>,
        class: &ClassDecl,
        index: usize,
        function: &FunctionDecl,
    ) -> Vec<MemberSymbol> {
        let Some(symbol) = MemberSymbol::for_declaration(class, index) else {
            return Vec::new();
        };

        let _ = scope.functions_by_name(function.name);

        let mut seen = FxHashSet::default();
        let mut overridden = Vec::new();
        scope.direct_overrides_of_function(&symbol, |s| {
            if seen.insert(s.clone()) {
                overridden.push(s.clone());
            }
            ProcessorAction::Next
        });
        overridden
    }

    fn direct_overrides_of_property(
        scope: &mut MemberScope<'_>,
        class: &ClassDecl,
        index: usize,
        property: &PropertyDecl,
    ) -> Vec<MemberSymbol> {
        let Some(symbol) = MemberSymbol::for_declaration(class, index) else {
            return Vec::new();
        };

        let _ = scope.properties_by_name(property.name);

        let mut seen = FxHashSet::default();
        let mut overridden = Vec::new();
        scope.direct_overrides_of_property(&symbol, |s| {
            if seen.insert(s.clone()) {
                overridden.push(s.clone());
            }
            ProcessorAction::Next
        });
        overridden
    }

    /// Re-base an overridden bound into the override's own generic parameter
    /// space: the base declaration's parameters are substituted, positionally,
    /// with the override's parameters re-expressed as type expressions.
    ///
    /// Pairing truncates to the shorter parameter list; trailing base
    /// parameters stay unsubstituted. A base symbol with no type-parameter
    /// owner short-circuits to identity.
    fn rebase_type_parameters(
        &self,
        bound: TypeId,
        override_params: &[TypeParamDecl],
        base: &MemberSymbol,
    ) -> TypeId {
        if override_params.is_empty() {
            return bound;
        }
        let Some(base_params) = self.declared_type_params(base) else {
            return bound;
        };

        let size = override_params.len().min(base_params.len());
        let mut subst = TypeSubstitution::new();
        for i in 0..size {
            let to = self.ctx.types.type_param(override_params[i].id, false);
            subst.insert(base_params[i], to);
        }
        substitute_type(self.ctx.types, bound, &subst)
    }

    fn declared_type_params(&self, symbol: &MemberSymbol) -> Option<Vec<TypeParamId>> {
        let member = self.ctx.table.member(symbol.decl?)?;
        Some(member.type_params()?.iter().map(|p| p.id).collect())
    }

    /// Check an override's resolved return/property type against every
    /// directly overridden signature. Returns the first violated base
    /// declaration in declaration order, or `None`.
    ///
    /// An unresolved return type is not an error here, only "not yet
    /// checkable": resolution order is not guaranteed at invocation time.
    /// A violation against a symbol with no backing declaration ends the
    /// member's check with nothing diagnosable.
    fn check_return_type(
        &self,
        subtype_ctx: &SubtypeContext,
        return_type: &TypeRef,
        override_params: &[TypeParamDecl],
        overridden: &[MemberSymbol],
    ) -> Option<MemberRef> {
        let return_ty = return_type.resolved_type()?;
        let checker = SubtypeChecker::new(self.ctx.types, self.ctx.classes);

        for symbol in overridden {
            let Some(base_ty) = symbol.signature_type.resolved_type() else {
                continue;
            };
            // The conservative comparison target: what the strictest reading
            // of the base signature permits.
            let bound = upper_bound_if_flexible(self.ctx.types, base_ty);
            let restriction = self.rebase_type_parameters(bound, override_params, symbol);

            if !checker.is_subtype_of(subtype_ctx, return_ty, restriction) {
                return symbol.decl;
            }
        }

        None
    }

    fn check_function(
        &mut self,
        class: &ClassDecl,
        index: usize,
        function: &FunctionDecl,
        scope: &mut MemberScope<'_>,
        subtype_ctx: &SubtypeContext,
    ) {
        if !function.is_override {
            return;
        }

        let overridden = Self::direct_overrides_of_function(scope, class, index, function);
        if overridden.is_empty() {
            return;
        }

        let Some(violated) = self.check_return_type(
            subtype_ctx,
            &function.return_type,
            &function.type_params,
            &overridden,
        ) else {
            return;
        };

        trace!(class = class.def.0, index, "return type mismatch on override");
        let observed = self.render(&function.return_type);
        self.report_return_type_mismatch_on_override(
            function.return_type.source(),
            observed,
            violated,
        );
    }

    fn check_property(
        &mut self,
        class: &ClassDecl,
        index: usize,
        property: &PropertyDecl,
        scope: &mut MemberScope<'_>,
        subtype_ctx: &SubtypeContext,
    ) {
        if !property.is_override {
            return;
        }

        let overridden = Self::direct_overrides_of_property(scope, class, index, property);
        if overridden.is_empty() {
            return;
        }

        let Some(violated) = self.check_return_type(
            subtype_ctx,
            &property.ty,
            &property.type_params,
            &overridden,
        ) else {
            return;
        };

        trace!(class = class.def.0, index, "property type mismatch on override");
        let observed = self.render(&property.ty);
        // A mutable property's type is also its setter's parameter type, so
        // the user-facing category differs from a read-only property's.
        if property.is_mutable {
            self.report_var_type_mismatch_on_override(property.ty.source(), observed, violated);
        } else {
            self.report_property_type_mismatch_on_override(
                property.ty.source(),
                observed,
                violated,
            );
        }
    }

    fn render(&self, type_ref: &TypeRef) -> String {
        type_ref
            .resolved_type()
            .map(|ty| self.ctx.formatter().format(ty))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "tests/override_checker_tests.rs"]
mod tests;
