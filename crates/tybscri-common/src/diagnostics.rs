//! Structured diagnostics emitted during type resolution.
//!
//! The resolver never formats or localizes messages for display. It records
//! a code, a severity, the rendered template text and the span of the node the
//! finding belongs to; rendering is left to the host.

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticSeverity {
    Error,
}

/// A message template with `{0}`, `{1}`, ... placeholders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub severity: DiagnosticSeverity,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: u32,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub span: SourceSpan,
}

impl Diagnostic {
    pub fn error(span: SourceSpan, message: impl Into<String>, code: u32) -> Self {
        Self {
            code,
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            span,
        }
    }

    /// Render `template` with `args` and attach it to `span`.
    pub fn from_template(span: SourceSpan, template: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            code: template.code,
            severity: template.severity,
            message: format_message(template.message, args),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, DiagnosticSeverity::Error)
    }
}

pub mod diagnostic_codes {
    pub const CANNOT_FIND_NAME: u32 = 1001;
    pub const CANNOT_FIND_TYPE: u32 = 1002;
    pub const TYPE_ARGUMENT_COUNT_MISMATCH: u32 = 1003;
    pub const GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS: u32 = 1004;

    pub const ARGUMENT_NOT_ASSIGNABLE: u32 = 2001;
    pub const ARGUMENT_COUNT_MISMATCH: u32 = 2002;
    pub const NOT_INVOCABLE: u32 = 2003;

    pub const MEMBER_NOT_FOUND: u32 = 2101;
    pub const MEMBER_AMBIGUOUS: u32 = 2102;

    pub const TYPE_NOT_ASSIGNABLE: u32 = 2201;
    pub const CONDITION_NOT_BOOLEAN: u32 = 2202;
    pub const CANNOT_ASSIGN_TO_CONST: u32 = 2203;
    pub const INVALID_ASSIGNMENT_TARGET: u32 = 2204;

    pub const NON_NARROWABLE_GUARD: u32 = 2301;

    pub const CIRCULAR_REFERENCE: u32 = 2401;
    pub const CANNOT_INFER_PARAMETER_TYPE: u32 = 2402;
    pub const EXPRESSION_TOO_DEEP: u32 = 2403;
}

pub mod diagnostic_messages {
    use super::diagnostic_codes as codes;
    use super::{DiagnosticMessage, DiagnosticSeverity};

    const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
        DiagnosticMessage {
            code,
            severity: DiagnosticSeverity::Error,
            message,
        }
    }

    pub const CANNOT_FIND_NAME: DiagnosticMessage =
        error(codes::CANNOT_FIND_NAME, "Cannot find name '{0}'.");
    pub const CANNOT_FIND_TYPE: DiagnosticMessage =
        error(codes::CANNOT_FIND_TYPE, "Cannot find type '{0}'.");
    pub const TYPE_ARGUMENT_COUNT_MISMATCH: DiagnosticMessage = error(
        codes::TYPE_ARGUMENT_COUNT_MISMATCH,
        "Type '{0}' expects {1} type argument(s), but got {2}.",
    );
    pub const GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS: DiagnosticMessage = error(
        codes::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
        "Generic type '{0}' requires {1} type argument(s).",
    );
    pub const ARGUMENT_NOT_ASSIGNABLE: DiagnosticMessage = error(
        codes::ARGUMENT_NOT_ASSIGNABLE,
        "Argument of type '{0}' is not assignable to parameter of type '{1}'.",
    );
    pub const ARGUMENT_COUNT_MISMATCH: DiagnosticMessage = error(
        codes::ARGUMENT_COUNT_MISMATCH,
        "Expected {0} argument(s), but got {1}.",
    );
    pub const NOT_INVOCABLE: DiagnosticMessage = error(
        codes::NOT_INVOCABLE,
        "Value of type '{0}' is not invocable.",
    );
    pub const MEMBER_NOT_FOUND: DiagnosticMessage = error(
        codes::MEMBER_NOT_FOUND,
        "Member '{0}' does not exist on type '{1}'.",
    );
    pub const MEMBER_AMBIGUOUS: DiagnosticMessage = error(
        codes::MEMBER_AMBIGUOUS,
        "Member '{0}' is ambiguous on type '{1}'.",
    );
    pub const TYPE_NOT_ASSIGNABLE: DiagnosticMessage = error(
        codes::TYPE_NOT_ASSIGNABLE,
        "Type '{0}' is not assignable to type '{1}'.",
    );
    pub const CONDITION_NOT_BOOLEAN: DiagnosticMessage = error(
        codes::CONDITION_NOT_BOOLEAN,
        "Condition of type '{0}' is not assignable to 'boolean'.",
    );
    pub const CANNOT_ASSIGN_TO_CONST: DiagnosticMessage = error(
        codes::CANNOT_ASSIGN_TO_CONST,
        "Cannot assign to '{0}' because it is a constant.",
    );
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = error(
        codes::INVALID_ASSIGNMENT_TARGET,
        "The left-hand side of an assignment must be a variable.",
    );
    pub const NON_NARROWABLE_GUARD: DiagnosticMessage = error(
        codes::NON_NARROWABLE_GUARD,
        "'{0}' cannot be narrowed because it is reassignable.",
    );
    pub const CIRCULAR_REFERENCE: DiagnosticMessage = error(
        codes::CIRCULAR_REFERENCE,
        "'{0}' is referenced directly or indirectly in its own initializer.",
    );
    pub const CANNOT_INFER_PARAMETER_TYPE: DiagnosticMessage = error(
        codes::CANNOT_INFER_PARAMETER_TYPE,
        "Cannot infer the type of parameter '{0}'.",
    );
    pub const EXPRESSION_TOO_DEEP: DiagnosticMessage = error(
        codes::EXPRESSION_TOO_DEEP,
        "Expression is nested too deeply to resolve.",
    );

    pub const ALL: &[DiagnosticMessage] = &[
        CANNOT_FIND_NAME,
        CANNOT_FIND_TYPE,
        TYPE_ARGUMENT_COUNT_MISMATCH,
        GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
        ARGUMENT_NOT_ASSIGNABLE,
        ARGUMENT_COUNT_MISMATCH,
        NOT_INVOCABLE,
        MEMBER_NOT_FOUND,
        MEMBER_AMBIGUOUS,
        TYPE_NOT_ASSIGNABLE,
        CONDITION_NOT_BOOLEAN,
        CANNOT_ASSIGN_TO_CONST,
        INVALID_ASSIGNMENT_TARGET,
        NON_NARROWABLE_GUARD,
        CIRCULAR_REFERENCE,
        CANNOT_INFER_PARAMETER_TYPE,
        EXPRESSION_TOO_DEEP,
    ];
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    diagnostic_messages::ALL
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
