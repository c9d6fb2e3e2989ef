//! Type rendering for diagnostics.

use crate::def::{ClassStore, TypeParamRegistry};
use crate::intern::TypeInterner;
use crate::types::{IntrinsicKind, TypeData, TypeId};
use kyn_common::Interner;

/// Renders types for user-facing messages: `Int`, `Box<Int>?`, `String!`.
pub struct TypeFormatter<'a> {
    types: &'a TypeInterner,
    classes: &'a ClassStore,
    params: &'a TypeParamRegistry,
    strings: &'a Interner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(
        types: &'a TypeInterner,
        classes: &'a ClassStore,
        params: &'a TypeParamRegistry,
        strings: &'a Interner,
    ) -> Self {
        Self {
            types,
            classes,
            params,
            strings,
        }
    }

    pub fn format(&self, ty: TypeId) -> String {
        match self.types.lookup(ty) {
            TypeData::Intrinsic { kind, nullable } => {
                let base = match kind {
                    IntrinsicKind::Any => "Any",
                    IntrinsicKind::Nothing => "Nothing",
                    IntrinsicKind::Unit => "Unit",
                    IntrinsicKind::Error => "<error>",
                    IntrinsicKind::Stub => "<stub>",
                };
                Self::with_question_mark(base.to_string(), nullable)
            }
            TypeData::Class { def, args, nullable } => {
                let mut out = self
                    .classes
                    .get_name(def)
                    .map(|name| self.strings.resolve(name))
                    .unwrap_or_else(|| "<unknown>".to_string());
                if !args.is_empty() {
                    let rendered: Vec<String> =
                        args.iter().map(|&arg| self.format(arg)).collect();
                    out.push('<');
                    out.push_str(&rendered.join(", "));
                    out.push('>');
                }
                Self::with_question_mark(out, nullable)
            }
            TypeData::TypeParam { param, nullable } => {
                let name = self
                    .params
                    .name(param)
                    .map(|name| self.strings.resolve(name))
                    .unwrap_or_else(|| "<param>".to_string());
                Self::with_question_mark(name, nullable)
            }
            TypeData::Flexible { lower, upper } => {
                // Platform notation for the common shape: the same
                // constructor differing only in nullability renders as `T!`.
                if self.types.with_nullability(lower, true) == upper {
                    format!("{}!", self.format(lower))
                } else {
                    format!("({}..{})", self.format(lower), self.format(upper))
                }
            }
        }
    }

    fn with_question_mark(base: String, nullable: bool) -> String {
        if nullable { format!("{base}?") } else { base }
    }
}
