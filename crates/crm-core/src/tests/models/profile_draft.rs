use crate::ProfileDraft;

#[test]
fn test_new() {
    let draft = ProfileDraft::new(
        "Sam Smith".to_string(),
        "sam@example.com".to_string(),
        "+1-555-0100".to_string(),
    );
    assert_eq!(draft.name, "Sam Smith");
    assert_eq!(draft.email, "sam@example.com");
    assert_eq!(draft.phone, "+1-555-0100");
}

#[test]
fn test_serialize_field_names() {
    let draft = ProfileDraft::new(
        "Sam Smith".to_string(),
        "sam@example.com".to_string(),
        "+1-555-0100".to_string(),
    );
    let value = serde_json::to_value(&draft).unwrap();
    assert_eq!(value["name"], "Sam Smith");
    assert_eq!(value["email"], "sam@example.com");
    assert_eq!(value["phone"], "+1-555-0100");
}
