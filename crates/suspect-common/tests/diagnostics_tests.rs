use super::*;

#[test]
fn test_format_message_fills_placeholders_in_order() {
    let text = format_message(
        diagnostic_messages::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE,
        &["FastList<String>", "Integer"],
    );
    assert_eq!(text, "'FastList<String>' may not contain objects of type 'Integer'");
}

#[test]
fn test_format_message_leaves_missing_placeholders() {
    let text = format_message("{0} and {1}", &["a"]);
    assert_eq!(text, "a and {1}");
}

#[test]
fn test_message_table_lookup() {
    let message = get_diagnostic_message(diagnostic_codes::SUSPICIOUS_CALL_TO)
        .expect("suspicious call message is registered");
    assert_eq!(message.category, DiagnosticCategory::Warning);
    assert_eq!(
        get_message_template(diagnostic_codes::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE),
        Some(diagnostic_messages::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE)
    );
    assert!(get_diagnostic_message(1).is_none());
}

#[test]
fn test_diagnostic_from_code_uses_table_category() {
    let diag = Diagnostic::from_code(
        "Main.java".to_string(),
        10,
        3,
        "msg".to_string(),
        diagnostic_codes::SUSPICIOUS_CALL_TO,
    );
    assert_eq!(diag.category, DiagnosticCategory::Warning);

    let json = serde_json::to_value(&diag).expect("diagnostic serializes");
    assert_eq!(json["code"], 7002);
    assert_eq!(json["category"], "Warning");
}

#[test]
fn test_every_registered_message_is_a_warning() {
    assert!(!DIAGNOSTIC_MESSAGES.is_empty());
    for message in DIAGNOSTIC_MESSAGES {
        assert_eq!(message.category.as_str(), "warning", "{}", message.code);
    }
    let unknown = Diagnostic::from_code(String::new(), 0, 0, String::new(), 1);
    assert_eq!(unknown.category, DiagnosticCategory::Warning);
}
