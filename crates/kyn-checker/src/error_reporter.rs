//! Diagnostic emission for the override checkers.
//!
//! Every reporter takes the source span of the offending type annotation;
//! with no span there is nowhere to attach the diagnostic and nothing is
//! reported.

use crate::override_checker::OverrideCompatibilityChecker;
use kyn_binder::MemberRef;
use kyn_common::{Diagnostic, DiagnosticMessage, Span, diagnostic_messages, format_message};

impl OverrideCompatibilityChecker<'_, '_> {
    pub(crate) fn report_return_type_mismatch_on_override(
        &mut self,
        source: Option<Span>,
        observed: String,
        violated: MemberRef,
    ) {
        self.report_mismatch(
            diagnostic_messages::RETURN_TYPE_MISMATCH_ON_OVERRIDE,
            source,
            observed,
            violated,
        );
    }

    pub(crate) fn report_property_type_mismatch_on_override(
        &mut self,
        source: Option<Span>,
        observed: String,
        violated: MemberRef,
    ) {
        self.report_mismatch(
            diagnostic_messages::PROPERTY_TYPE_MISMATCH_ON_OVERRIDE,
            source,
            observed,
            violated,
        );
    }

    pub(crate) fn report_var_type_mismatch_on_override(
        &mut self,
        source: Option<Span>,
        observed: String,
        violated: MemberRef,
    ) {
        self.report_mismatch(
            diagnostic_messages::VAR_TYPE_MISMATCH_ON_OVERRIDE,
            source,
            observed,
            violated,
        );
    }

    fn report_mismatch(
        &mut self,
        template: DiagnosticMessage,
        source: Option<Span>,
        observed: String,
        violated: MemberRef,
    ) {
        let Some(span) = source else {
            return;
        };
        let Some(violated_name) = self.ctx.table.render_member(self.ctx.strings, violated) else {
            return;
        };
        let message = format_message(template.message, &[&observed, &violated_name]);
        self.ctx.diagnostics.push(Diagnostic::error(
            self.ctx.file.clone(),
            span.start,
            span.len(),
            message,
            template.code,
        ));
    }
}
