//! Common types and utilities for the Tybscri resolver.
//!
//! This crate provides foundational types used across all tybscri crates:
//! - Source spans (`SourceLocation`, `SourceSpan`)
//! - Structured diagnostics (`Diagnostic`, `DiagnosticSeverity`, message templates)
//! - Resolver limits and thresholds

// Span - Source location tracking (index/line/column)
pub mod span;
pub use span::{SourceLocation, SourceSpan};

// Diagnostics - records emitted by the resolver, formatted by the host
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticMessage, DiagnosticSeverity, diagnostic_codes, diagnostic_messages,
    format_message, get_message_template,
};

// Centralized limits and thresholds
pub mod limits;
