use super::*;
use crate::span::{SourceLocation, SourceSpan};

#[test]
fn test_format_message_replaces_positional_args() {
    let text = format_message("Type '{0}' is not assignable to type '{1}'.", &["1", "string"]);
    assert_eq!(text, "Type '1' is not assignable to type 'string'.");
}

#[test]
fn test_format_message_leaves_missing_args() {
    let text = format_message("Expected {0} argument(s), but got {1}.", &["2"]);
    assert_eq!(text, "Expected 2 argument(s), but got {1}.");
}

#[test]
fn test_message_templates_have_unique_codes() {
    let mut codes: Vec<u32> = diagnostic_messages::ALL.iter().map(|m| m.code).collect();
    let before = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), before);
}

#[test]
fn test_get_message_template() {
    assert_eq!(
        get_message_template(diagnostic_codes::MEMBER_NOT_FOUND),
        Some("Member '{0}' does not exist on type '{1}'.")
    );
    assert_eq!(get_message_template(9999), None);
}

#[test]
fn test_from_template_renders_and_keeps_span() {
    let span = SourceSpan::new(SourceLocation::new(3, 1, 3), SourceLocation::new(9, 1, 9));
    let diag = Diagnostic::from_template(span, &diagnostic_messages::CANNOT_FIND_NAME, &["foo"]);
    assert_eq!(diag.code, diagnostic_codes::CANNOT_FIND_NAME);
    assert_eq!(diag.message, "Cannot find name 'foo'.");
    assert_eq!(diag.span, span);
    assert!(diag.is_error());
}

#[test]
fn test_diagnostic_serializes_camel_case() {
    let diag = Diagnostic::error(SourceSpan::EMPTY, "boom", 2201);
    let json = serde_json::to_value(&diag).expect("serializable");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["span"]["start"]["index"], 0);
    assert_eq!(json["code"], 2201);
}
