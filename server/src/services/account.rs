//! Email + password accounts.
//!
//! Registration and credential checks over the `users` table. Password
//! digests are salted SHA-256, stored hex-encoded next to their salt.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session::hex_encode;
use super::session::SessionUser;

/// Password length policy, mirrored by the client for early feedback.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password outside length policy")]
    InvalidPassword,
    #[error("email already registered")]
    EmailTaken,
    #[error("unknown email or wrong password")]
    BadCredentials,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn password_within_policy(password: &str) -> bool {
    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len())
}

pub(crate) fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user")
        .to_owned()
}

pub(crate) fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex_encode(&bytes)
}

#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Create an account and return the new user.
///
/// # Errors
///
/// `InvalidEmail`/`InvalidPassword` on policy violations, `EmailTaken` when
/// the email already has an account, `Db` on database failure.
pub async fn register(pool: &PgPool, email: &str, password: &str) -> Result<SessionUser, AccountError> {
    let email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
    if !password_within_policy(password) {
        return Err(AccountError::InvalidPassword);
    }

    let name = name_from_email(&email);
    let salt = generate_salt();
    let hash = hash_password(&salt, password);

    let row = sqlx::query(
        r"INSERT INTO users (email, name, password_hash, password_salt)
          VALUES ($1, $2, $3, $4)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&email)
    .bind(&name)
    .bind(&hash)
    .bind(&salt)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Err(AccountError::EmailTaken);
    };

    Ok(SessionUser { id: row.get("id"), email, name })
}

/// Check credentials and return the matching user.
///
/// # Errors
///
/// `BadCredentials` covers both unknown email and wrong password, so the
/// response does not reveal which one failed.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<SessionUser, AccountError> {
    let email = normalize_email(email).ok_or(AccountError::BadCredentials)?;

    let row = sqlx::query(
        "SELECT id, name, password_hash, password_salt FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Err(AccountError::BadCredentials);
    };

    let salt: String = row.get("password_salt");
    let stored: String = row.get("password_hash");
    if hash_password(&salt, password) != stored {
        return Err(AccountError::BadCredentials);
    }

    Ok(SessionUser { id: row.get("id"), email, name: row.get("name") })
}

/// Replace a user's password digest.
///
/// # Errors
///
/// `InvalidPassword` on policy violations, `Db` on database failure.
pub async fn set_password(pool: &PgPool, user_id: Uuid, password: &str) -> Result<(), AccountError> {
    if !password_within_policy(password) {
        return Err(AccountError::InvalidPassword);
    }
    let salt = generate_salt();
    let hash = hash_password(&salt, password);
    sqlx::query("UPDATE users SET password_hash = $1, password_salt = $2 WHERE id = $3")
        .bind(&hash)
        .bind(&salt)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
