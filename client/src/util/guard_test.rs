use super::*;

// =============================================================================
// Authenticated
// =============================================================================

#[test]
fn authenticated_auth_pages_redirect_to_dashboard() {
    for path in ["/auth", "/auth/", "/auth/signup", "/auth/reset/extra"] {
        assert_eq!(
            decide(true, path, None),
            GuardDecision::RedirectTo("/dashboard"),
            "expected redirect for {path:?}"
        );
    }
}

#[test]
fn authenticated_reset_with_token_is_allowed() {
    assert_eq!(decide(true, "/auth/reset", Some("abc123")), GuardDecision::Allow);
}

#[test]
fn authenticated_reset_without_token_redirects() {
    assert_eq!(decide(true, "/auth/reset", None), GuardDecision::RedirectTo("/dashboard"));
}

#[test]
fn authenticated_reset_with_empty_token_redirects() {
    assert_eq!(decide(true, "/auth/reset", Some("")), GuardDecision::RedirectTo("/dashboard"));
}

#[test]
fn authenticated_token_elsewhere_does_not_matter() {
    // The token exception is scoped to the reset path only.
    assert_eq!(decide(true, "/auth/signup", Some("abc")), GuardDecision::RedirectTo("/dashboard"));
}

#[test]
fn authenticated_dashboard_is_allowed() {
    assert_eq!(decide(true, "/dashboard", None), GuardDecision::Allow);
}

#[test]
fn auth_prefix_match_is_literal() {
    // Prefix matching is deliberate: nested auth pages all redirect, and so
    // would any sibling path sharing the prefix.
    assert_eq!(decide(true, "/authors", None), GuardDecision::RedirectTo("/dashboard"));
}

// =============================================================================
// Unauthenticated
// =============================================================================

#[test]
fn unauthenticated_dashboard_redirects_to_auth() {
    assert_eq!(decide(false, "/dashboard", None), GuardDecision::RedirectTo("/auth"));
}

#[test]
fn unauthenticated_auth_pages_are_allowed() {
    for path in ["/auth", "/auth/reset", "/auth/signup"] {
        assert_eq!(decide(false, path, None), GuardDecision::Allow, "expected allow for {path:?}");
    }
}

#[test]
fn unauthenticated_dashboard_subpaths_are_allowed() {
    // Only the exact dashboard path is gated.
    assert_eq!(decide(false, "/dashboard/anything", None), GuardDecision::Allow);
}

// =============================================================================
// Neutral paths
// =============================================================================

#[test]
fn neutral_paths_always_allowed() {
    for present in [true, false] {
        for path in ["/", "/about", "/notes/123"] {
            assert_eq!(
                decide(present, path, None),
                GuardDecision::Allow,
                "expected allow for {path:?} (session={present})"
            );
        }
    }
}
