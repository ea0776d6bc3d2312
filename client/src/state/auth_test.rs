use super::*;

#[test]
fn default_state_is_loading_with_no_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!state.session_present());
}

#[test]
fn resolved_without_user_is_unauthenticated() {
    let state = AuthState::resolved(None);
    assert!(!state.loading);
    assert!(!state.session_present());
}

#[test]
fn resolved_with_user_is_authenticated() {
    let state = AuthState::resolved(Some(User {
        id: "u1".to_owned(),
        email: "alice@example.com".to_owned(),
        name: "alice".to_owned(),
    }));
    assert!(!state.loading);
    assert!(state.session_present());
}
