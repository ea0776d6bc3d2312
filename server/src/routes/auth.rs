//! Auth routes — email/password accounts, cookie sessions, password resets.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::account::{self, AccountError};
use crate::services::{reset, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";
const SESSION_MAX_AGE_DAYS: i64 = 30;

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Public base URL used for reset links and cookie security detection.
pub(crate) fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }
    base_url().starts_with("https://")
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

fn account_error_to_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::InvalidEmail | AccountError::InvalidPassword => StatusCode::BAD_REQUEST,
        AccountError::EmailTaken => StatusCode::CONFLICT,
        AccountError::BadCredentials => StatusCode::UNAUTHORIZED,
        AccountError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Non-empty session token from the request's cookie jar, if any.
fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
}

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar).ok_or(StatusCode::UNAUTHORIZED)?;

        let AppState { pool } = AppState::from_ref(state);
        let user = session::validate_session(&pool, &token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct CredentialsBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct ResetRequestBody {
    email: String,
}

#[derive(Deserialize)]
pub struct ResetBody {
    token: String,
    password: String,
}

/// `GET /api/auth/session` — return the current user, 401 without a live
/// session. The client treats any non-2xx as "no session".
pub async fn current_session(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/register` — create an account, sign it in, set cookie.
pub async fn register(State(state): State<AppState>, Json(body): Json<CredentialsBody>) -> Response {
    let user = match account::register(&state.pool, &body.email, &body.password).await {
        Ok(user) => user,
        Err(e) => {
            let status = account_error_to_status(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %e, "register failed");
            }
            return (status, e.to_string()).into_response();
        }
    };
    start_session(&state, user).await
}

/// `POST /api/auth/login` — check credentials, set cookie.
pub async fn login(State(state): State<AppState>, Json(body): Json<CredentialsBody>) -> Response {
    let user = match account::authenticate(&state.pool, &body.email, &body.password).await {
        Ok(user) => user,
        Err(e) => {
            let status = account_error_to_status(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %e, "login failed");
            }
            return (status, e.to_string()).into_response();
        }
    };
    start_session(&state, user).await
}

async fn start_session(state: &AppState, user: session::SessionUser) -> Response {
    let token = match session::create_session(&state.pool, user.id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    let jar = CookieJar::new().add(session_cookie(token));
    (jar, Json(user)).into_response()
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;

    let jar = CookieJar::new().add(expired_session_cookie());
    (jar, StatusCode::NO_CONTENT)
}

/// `POST /api/auth/request-reset` — email a single-use reset link.
///
/// Always answers 204 for well-formed requests, whether or not the email has
/// an account behind it.
pub async fn request_reset(State(state): State<AppState>, Json(body): Json<ResetRequestBody>) -> Result<StatusCode, StatusCode> {
    let token = match reset::create_reset_token(&state.pool, &body.email).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "reset token creation failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Some(token) = token {
        let url = reset::reset_url(&base_url(), &token);
        if let Err(e) = reset::deliver_reset_email(body.email.trim(), &url).await {
            tracing::error!(error = %e, "reset email delivery failed");
            return Err(StatusCode::BAD_GATEWAY);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/auth/reset` — consume a reset token and set a new password.
pub async fn reset_password(State(state): State<AppState>, Json(body): Json<ResetBody>) -> Result<StatusCode, StatusCode> {
    let user_id = match reset::consume_reset_token(&state.pool, &body.token).await {
        Ok(id) => id,
        Err(reset::ResetError::TokenRejected) => return Err(StatusCode::BAD_REQUEST),
        Err(e) => {
            tracing::error!(error = %e, "reset token lookup failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match account::set_password(&state.pool, user_id, &body.password).await {
        Ok(()) => {}
        Err(e) => return Err(account_error_to_status(&e)),
    }

    // Existing sessions die with the old password.
    let _ = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(&state.pool)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
