//! Password-reset tokens and reset-email delivery.
//!
//! TRADE-OFFS
//! ==========
//! Tokens are stored hashed and consumed with a destructive
//! `DELETE ... RETURNING`, guaranteeing single use at the cost of reconvening
//! the flow from scratch after any failed attempt. Requests for unknown
//! emails succeed silently so the endpoint cannot be used to probe accounts.

#[cfg(test)]
#[path = "reset_test.rs"]
mod reset_test;

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::account::normalize_email;
use super::session::hex_encode;

const RESET_EMAIL_TEMPLATE: &str = include_str!("../../templates/reset_email.html");

#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    #[error("expired or unknown reset token")]
    TokenRejected,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

/// Generate a random 32-byte hex reset token.
#[must_use]
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex_encode(&bytes)
}

/// Hash a reset token for at-rest storage and lookup.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Absolute reset link carried by the email.
#[must_use]
pub fn reset_url(base_url: &str, token: &str) -> String {
    format!("{}/auth/reset?token={token}", base_url.trim_end_matches('/'))
}

#[must_use]
pub fn render_reset_email(email: &str, url: &str) -> String {
    RESET_EMAIL_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{RESET_URL}}", url)
}

/// Create a reset token for the account behind `email`, replacing any
/// outstanding one. Returns `None` (not an error) when no account matches.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn create_reset_token(pool: &PgPool, email: &str) -> Result<Option<String>, ResetError> {
    let Some(email) = normalize_email(email) else {
        return Ok(None);
    };

    let row = sqlx::query("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let user_id: Uuid = row.get("id");

    sqlx::query("DELETE FROM password_resets WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    let token = generate_reset_token();
    sqlx::query("INSERT INTO password_resets (token_hash, user_id) VALUES ($1, $2)")
        .bind(hash_token(&token))
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(Some(token))
}

/// Consume a reset token atomically, returning the `user_id` if it was live.
///
/// # Errors
///
/// `TokenRejected` when the token is unknown, already used, or expired.
pub async fn consume_reset_token(pool: &PgPool, token: &str) -> Result<Uuid, ResetError> {
    let row = sqlx::query(
        "DELETE FROM password_resets WHERE token_hash = $1 AND expires_at > now() RETURNING user_id",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    row.map(|r| r.get("user_id")).ok_or(ResetError::TokenRejected)
}

/// Send the reset email, or log the link when no mail provider is configured
/// (development mode).
///
/// # Errors
///
/// `EmailDelivery` when the configured provider rejects the send.
pub async fn deliver_reset_email(to_email: &str, url: &str) -> Result<(), ResetError> {
    let api_key = std::env::var("RESEND_API_KEY").ok();
    let from = std::env::var("RESEND_FROM").ok();

    let (Some(api_key), Some(from)) = (api_key, from) else {
        tracing::info!(email = %to_email, %url, "reset email not sent: no mail provider configured; use the logged link");
        return Ok(());
    };

    let resend = Resend::new(&api_key);
    let to = [to_email];
    let subject = "Reset your Notes password";
    let html = render_reset_email(to_email, url);

    let email = CreateEmailBaseOptions::new(&from, to, subject).with_html(&html);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| ResetError::EmailDelivery(e.to_string()))?;
    Ok(())
}
