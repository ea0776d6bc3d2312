//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. The session
//! query in particular collapses *every* failure mode — transport error,
//! non-2xx status, malformed body — into "no session", which is what the
//! route guard requires of uncertain auth state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Note, NotePayload, User};

#[cfg(any(test, feature = "hydrate"))]
fn note_endpoint(note_id: &str) -> String {
    format!("/api/notes/{note_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

/// Fetch the current session from `/api/auth/session`.
///
/// Returns `None` if unauthenticated, on any transport failure, or on the
/// server.
pub async fn fetch_session() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/session")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Register a new account via `POST /api/auth/register`.
///
/// # Errors
///
/// Returns a display message when the request fails or is rejected.
pub async fn register(email: &str, password: &str) -> Result<(), String> {
    post_credentials("/api/auth/register", "register", email, password).await
}

/// Sign in via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns a display message when the request fails or is rejected.
pub async fn login(email: &str, password: &str) -> Result<(), String> {
    post_credentials("/api/auth/login", "login", email, password).await
}

#[cfg(feature = "hydrate")]
async fn post_credentials(url: &str, what: &str, email: &str, password: &str) -> Result<(), String> {
    let body = serde_json::json!({ "email": email, "password": password });
    let resp = gloo_net::http::Request::post(url)
        .json(&body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(what, resp.status()));
    }
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
async fn post_credentials(_url: &str, _what: &str, _email: &str, _password: &str) -> Result<(), String> {
    Err("not available on server".to_owned())
}

/// Log out the current session via `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

/// Ask for a password-reset email via `POST /api/auth/request-reset`.
///
/// # Errors
///
/// Returns a display message when the request fails.
pub async fn request_password_reset(email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "email": email });
        let resp = gloo_net::http::Request::post("/api/auth/request-reset")
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("reset request", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Complete a password reset via `POST /api/auth/reset`.
///
/// # Errors
///
/// Returns a display message when the token is rejected or the request fails.
pub async fn reset_password(token: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "token": token, "password": password });
        let resp = gloo_net::http::Request::post("/api/auth/reset")
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("password reset", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, password);
        Err("not available on server".to_owned())
    }
}

/// List the current user's notes from `GET /api/notes`.
///
/// # Errors
///
/// Returns a display message when the request fails.
pub async fn list_notes() -> Result<Vec<Note>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/notes")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("notes list", resp.status()));
        }
        resp.json::<Vec<Note>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Create a note via `POST /api/notes`.
///
/// # Errors
///
/// Returns a display message when the request fails.
pub async fn create_note(payload: &NotePayload) -> Result<Note, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/notes")
            .json(payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("note create", resp.status()));
        }
        resp.json::<Note>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        Err("not available on server".to_owned())
    }
}

/// Update a note via `PATCH /api/notes/{id}`.
///
/// # Errors
///
/// Returns a display message when the request fails.
pub async fn update_note(note_id: &str, payload: &NotePayload) -> Result<Note, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = note_endpoint(note_id);
        let resp = gloo_net::http::Request::patch(&url)
            .json(payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("note update", resp.status()));
        }
        resp.json::<Note>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (note_id, payload);
        Err("not available on server".to_owned())
    }
}

/// Delete a note via `DELETE /api/notes/{id}`.
///
/// # Errors
///
/// Returns a display message when the request fails.
pub async fn delete_note(note_id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = note_endpoint(note_id);
        let resp = gloo_net::http::Request::delete(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("note delete", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = note_id;
        Err("not available on server".to_owned())
    }
}
