//! Session-gated navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every client-side route transition is checked against the current session:
//! authenticated users are kept out of the auth pages (except an in-flight
//! password reset), unauthenticated users are kept out of the dashboard. The
//! decision itself is a pure function so the full path/session matrix stays
//! unit-testable; the installation wires it to the router through an injected
//! navigate closure.
//!
//! TRADE-OFFS
//! ==========
//! The guard only ever sees session *presence*. A session fetch that fails or
//! times out surfaces as "absent", so uncertain auth state fails closed
//! toward the unauthenticated branch instead of exposing protected routes.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;

/// Outcome of a guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation proceed unchanged.
    Allow,
    /// Short-circuit the navigation and go to the given path instead.
    RedirectTo(&'static str),
}

/// Decide what to do with a navigation to `path`.
///
/// `reset_token` is the `token` query parameter of the attempted navigation,
/// if any. Everything that matches no rule falls through to `Allow`.
#[must_use]
pub fn decide(session_present: bool, path: &str, reset_token: Option<&str>) -> GuardDecision {
    if session_present {
        if path.starts_with("/auth") {
            // Password reset stays reachable while logged in.
            if path == "/auth/reset" && reset_token.is_some_and(|t| !t.is_empty()) {
                return GuardDecision::Allow;
            }
            return GuardDecision::RedirectTo("/dashboard");
        }
        return GuardDecision::Allow;
    }

    if path == "/dashboard" {
        return GuardDecision::RedirectTo("/auth");
    }
    GuardDecision::Allow
}

/// Install the guard: re-evaluate on every location or session change and
/// redirect through `navigate` when required.
///
/// Evaluation is deferred while the session query is still in flight
/// (`auth.loading`), so a protected route is never admitted on unresolved
/// auth state.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let state = auth.get();
        if state.loading {
            return;
        }
        let path = location.pathname.get();
        let token = location.query.with(|q| q.get("token"));
        if let GuardDecision::RedirectTo(target) = decide(state.user.is_some(), &path, token.as_deref()) {
            navigate(target, NavigateOptions::default());
        }
    });
}
