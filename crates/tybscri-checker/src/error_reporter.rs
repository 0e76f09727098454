//! Error reporting (`error_*` for emission).
//!
//! Every checked failure becomes a `Diagnostic`; none of these abort the
//! walk. Relations involving `Unknown` are never reported since the
//! unknown side already produced its own diagnostic.

use crate::context::CheckerState;
use tracing::debug;
use tybscri_common::{Diagnostic, DiagnosticMessage, SourceSpan, diagnostic_messages};
use tybscri_solver::{Type, format_type};
use tybscri_syntax::NodeIndex;

impl<'a> CheckerState<'a> {
    pub(crate) fn error_at_span(
        &mut self,
        span: SourceSpan,
        template: &DiagnosticMessage,
        args: &[&str],
    ) {
        let diagnostic = Diagnostic::from_template(span, template, args);
        debug!(
            code = diagnostic.code,
            message = %diagnostic.message,
            line = span.start.line,
            column = span.start.column,
            "diagnostic"
        );
        self.ctx.diagnostics.push(diagnostic);
    }

    pub(crate) fn error_at(&mut self, idx: NodeIndex, template: &DiagnosticMessage, args: &[&str]) {
        let span = self.ctx.arena.span(idx);
        self.error_at_span(span, template, args);
    }

    // =========================================================================
    // Names and types
    // =========================================================================

    pub(crate) fn error_cannot_find_name(&mut self, idx: NodeIndex, name: &str) {
        self.error_at(idx, &diagnostic_messages::CANNOT_FIND_NAME, &[name]);
    }

    pub(crate) fn error_cannot_find_type(&mut self, idx: NodeIndex, name: &str) {
        self.error_at(idx, &diagnostic_messages::CANNOT_FIND_TYPE, &[name]);
    }

    pub(crate) fn error_type_argument_count(
        &mut self,
        idx: NodeIndex,
        name: &str,
        expected: usize,
        actual: usize,
    ) {
        self.error_at(
            idx,
            &diagnostic_messages::TYPE_ARGUMENT_COUNT_MISMATCH,
            &[name, &expected.to_string(), &actual.to_string()],
        );
    }

    pub(crate) fn error_generic_requires_arguments(
        &mut self,
        idx: NodeIndex,
        name: &str,
        arity: usize,
    ) {
        self.error_at(
            idx,
            &diagnostic_messages::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
            &[name, &arity.to_string()],
        );
    }

    pub(crate) fn error_circular_reference(&mut self, idx: NodeIndex, name: &str) {
        self.error_at(idx, &diagnostic_messages::CIRCULAR_REFERENCE, &[name]);
    }

    pub(crate) fn error_cannot_infer_parameter(&mut self, span: SourceSpan, name: &str) {
        self.error_at_span(span, &diagnostic_messages::CANNOT_INFER_PARAMETER_TYPE, &[name]);
    }

    pub(crate) fn error_expression_too_deep(&mut self, idx: NodeIndex) {
        if self.ctx.depth_exceeded {
            return;
        }
        self.ctx.depth_exceeded = true;
        self.error_at(idx, &diagnostic_messages::EXPRESSION_TOO_DEEP, &[]);
    }

    // =========================================================================
    // Calls and members
    // =========================================================================

    pub(crate) fn error_argument_not_assignable(
        &mut self,
        idx: NodeIndex,
        argument: &Type,
        parameter: &Type,
    ) {
        if argument.contains_unknown() || parameter.contains_unknown() {
            return;
        }
        self.error_at(
            idx,
            &diagnostic_messages::ARGUMENT_NOT_ASSIGNABLE,
            &[&format_type(argument), &format_type(parameter)],
        );
    }

    pub(crate) fn error_argument_count(&mut self, idx: NodeIndex, expected: usize, actual: usize) {
        self.error_at(
            idx,
            &diagnostic_messages::ARGUMENT_COUNT_MISMATCH,
            &[&expected.to_string(), &actual.to_string()],
        );
    }

    pub(crate) fn error_not_invocable(&mut self, idx: NodeIndex, ty: &Type) {
        self.error_at(idx, &diagnostic_messages::NOT_INVOCABLE, &[&format_type(ty)]);
    }

    pub(crate) fn error_member_not_found(&mut self, idx: NodeIndex, member: &str, ty: &Type) {
        self.error_at(
            idx,
            &diagnostic_messages::MEMBER_NOT_FOUND,
            &[member, &format_type(ty)],
        );
    }

    pub(crate) fn error_member_ambiguous(&mut self, idx: NodeIndex, member: &str, ty: &Type) {
        self.error_at(
            idx,
            &diagnostic_messages::MEMBER_AMBIGUOUS,
            &[member, &format_type(ty)],
        );
    }

    // =========================================================================
    // Assignability
    // =========================================================================

    pub(crate) fn error_type_not_assignable(&mut self, idx: NodeIndex, source: &Type, target: &Type) {
        if source.contains_unknown() || target.contains_unknown() {
            return;
        }
        self.error_at(
            idx,
            &diagnostic_messages::TYPE_NOT_ASSIGNABLE,
            &[&format_type(source), &format_type(target)],
        );
    }

    pub(crate) fn error_condition_not_boolean(&mut self, idx: NodeIndex, ty: &Type) {
        if ty.contains_unknown() {
            return;
        }
        self.error_at(
            idx,
            &diagnostic_messages::CONDITION_NOT_BOOLEAN,
            &[&format_type(ty)],
        );
    }

    pub(crate) fn error_cannot_assign_to_const(&mut self, idx: NodeIndex, name: &str) {
        self.error_at(idx, &diagnostic_messages::CANNOT_ASSIGN_TO_CONST, &[name]);
    }

    pub(crate) fn error_invalid_assignment_target(&mut self, idx: NodeIndex) {
        self.error_at(idx, &diagnostic_messages::INVALID_ASSIGNMENT_TARGET, &[]);
    }

    pub(crate) fn error_non_narrowable_guard(&mut self, idx: NodeIndex, name: &str) {
        self.error_at(idx, &diagnostic_messages::NON_NARROWABLE_GUARD, &[name]);
    }
}
