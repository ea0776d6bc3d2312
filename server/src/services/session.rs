//! Cookie-session management.
//!
//! ARCHITECTURE
//! ============
//! A session is a long-lived random token held in an HttpOnly cookie and
//! checked on every request by joining against `users`. Expiry lives in the
//! database default, so revocation and timeout are both a row away.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use rand::Rng;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Hex-encode raw bytes (tokens, salts, digests).
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    hex_encode(&rand::rng().random::<[u8; 32]>())
}

/// The user a live session resolves to.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    /// Login email, normalized lowercase.
    pub email: String,
    /// Display name derived from the email local part.
    pub name: String,
}

impl SessionUser {
    fn from_row(row: &PgRow) -> Self {
        Self {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
        }
    }
}

/// Open a session for `user_id` and hand back its token.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Resolve a token to its user, or `None` for unknown/expired sessions.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email, u.name
          FROM sessions s JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(SessionUser::from_row))
}

/// Revoke one session by token. Unknown tokens are a quiet no-op.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await
        .map(|_| ())
}
