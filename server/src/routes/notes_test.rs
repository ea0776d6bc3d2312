use super::*;

// =============================================================================
// validate_title
// =============================================================================

#[test]
fn validate_title_trims_whitespace() {
    assert_eq!(validate_title("  Groceries  "), Some("Groceries".to_owned()));
}

#[test]
fn validate_title_rejects_empty_and_blank() {
    assert_eq!(validate_title(""), None);
    assert_eq!(validate_title("   "), None);
}

#[test]
fn validate_title_rejects_oversized() {
    assert_eq!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)), None);
}

#[test]
fn validate_title_boundary_length_passes() {
    assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_some());
}

// =============================================================================
// NoteResponse
// =============================================================================

#[test]
fn note_response_serializes_id_as_string() {
    let note = NoteResponse {
        id: Uuid::nil(),
        title: "t".to_owned(),
        body: "b".to_owned(),
        updated_at: "2026-08-01 12:00:00+00".to_owned(),
    };
    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(value["title"], "t");
}
