use super::*;

// =============================================================================
// generate_reset_token / hash_token
// =============================================================================

#[test]
fn generate_reset_token_is_64_hex_chars() {
    let token = generate_reset_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_reset_token_two_calls_differ() {
    assert_ne!(generate_reset_token(), generate_reset_token());
}

#[test]
fn hash_token_is_deterministic() {
    assert_eq!(hash_token("abc"), hash_token("abc"));
}

#[test]
fn hash_token_differs_from_input() {
    let hashed = hash_token("abc");
    assert_ne!(hashed, "abc");
    assert_eq!(hashed.len(), 64);
}

// =============================================================================
// reset_url
// =============================================================================

#[test]
fn reset_url_appends_token_query() {
    assert_eq!(
        reset_url("http://localhost:3000", "tok123"),
        "http://localhost:3000/auth/reset?token=tok123"
    );
}

#[test]
fn reset_url_tolerates_trailing_slash() {
    assert_eq!(
        reset_url("https://notes.example.com/", "tok123"),
        "https://notes.example.com/auth/reset?token=tok123"
    );
}

// =============================================================================
// render_reset_email
// =============================================================================

#[test]
fn render_reset_email_substitutes_placeholders() {
    let html = render_reset_email("a@b.com", "https://x/auth/reset?token=t");
    assert!(html.contains("a@b.com"));
    assert!(html.contains("https://x/auth/reset?token=t"));
    assert!(!html.contains("{{EMAIL}}"));
    assert!(!html.contains("{{RESET_URL}}"));
}
