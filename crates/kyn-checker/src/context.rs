//! Shared checker state.

use kyn_binder::ClassTable;
use kyn_common::{Diagnostic, Interner};
use kyn_solver::{ClassStore, TypeFormatter, TypeInterner, TypeParamRegistry};

/// Read-only compilation state threaded through every checker, plus the
/// diagnostics collected so far.
///
/// No ambient globals: one context is built per checked file, and each
/// class-level check builds its own scope and subtyping context from it.
pub struct CheckerContext<'a> {
    pub strings: &'a Interner,
    pub types: &'a TypeInterner,
    pub classes: &'a ClassStore,
    pub params: &'a TypeParamRegistry,
    pub table: &'a ClassTable,
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        strings: &'a Interner,
        types: &'a TypeInterner,
        classes: &'a ClassStore,
        params: &'a TypeParamRegistry,
        table: &'a ClassTable,
        file: impl Into<String>,
    ) -> Self {
        Self {
            strings,
            types,
            classes,
            params,
            table,
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn formatter(&self) -> TypeFormatter<'a> {
        TypeFormatter::new(self.types, self.classes, self.params, self.strings)
    }
}
