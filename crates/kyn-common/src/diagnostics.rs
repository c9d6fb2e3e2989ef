//! Diagnostic types and message lookup for the semantic checkers.

use serde::Serialize;

/// Diagnostic category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// A diagnostic message template.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Diagnostic codes in the semantic-check range (4xxx).
pub mod diagnostic_codes {
    pub const RETURN_TYPE_MISMATCH_ON_OVERRIDE: u32 = 4101;
    pub const PROPERTY_TYPE_MISMATCH_ON_OVERRIDE: u32 = 4102;
    pub const VAR_TYPE_MISMATCH_ON_OVERRIDE: u32 = 4103;
}

/// Message templates. `{n}` placeholders are filled by [`format_message`].
pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage};
    use super::diagnostic_codes as codes;

    pub const RETURN_TYPE_MISMATCH_ON_OVERRIDE: DiagnosticMessage = DiagnosticMessage {
        code: codes::RETURN_TYPE_MISMATCH_ON_OVERRIDE,
        category: DiagnosticCategory::Error,
        message: "Return type '{0}' is not a subtype of the return type of overridden member '{1}'.",
    };

    pub const PROPERTY_TYPE_MISMATCH_ON_OVERRIDE: DiagnosticMessage = DiagnosticMessage {
        code: codes::PROPERTY_TYPE_MISMATCH_ON_OVERRIDE,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' is not a subtype of the type of overridden property '{1}'.",
    };

    pub const VAR_TYPE_MISMATCH_ON_OVERRIDE: DiagnosticMessage = DiagnosticMessage {
        code: codes::VAR_TYPE_MISMATCH_ON_OVERRIDE,
        category: DiagnosticCategory::Error,
        message: "Var type '{0}' is not a subtype of the type of overridden var '{1}'.",
    };
}

/// Related information for a diagnostic (e.g., "see also" locations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

/// A semantic-checking diagnostic with optional related information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
            related_information: Vec::new(),
        }
    }

    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code: 0,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        });
        self
    }
}

/// Fill `{0}`, `{1}`, ... placeholders in a message template.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
