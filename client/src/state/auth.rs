//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route guard and user-aware chrome read this to coordinate redirects
//! and identity-dependent rendering. The session itself is opaque here: all
//! that matters is whether a user is present.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Session state as seen by the client.
///
/// `loading` is true from first render until the session query resolves;
/// guard evaluation holds off while it is set. A failed session query
/// resolves to `user: None`.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Resolved state after the session query completed.
    #[must_use]
    pub fn resolved(user: Option<User>) -> Self {
        Self { user, loading: false }
    }

    /// Whether an authenticated session is present.
    #[must_use]
    pub fn session_present(&self) -> bool {
        self.user.is_some()
    }
}
