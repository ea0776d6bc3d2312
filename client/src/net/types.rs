//! REST DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the server's response payloads by hand so serde
//! round-trips stay lossless without coupling the WASM build to server-side
//! crates.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by `/api/auth/session`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Login email, normalized lowercase.
    pub email: String,
    /// Display name derived from the email local part.
    pub name: String,
}

/// A note owned by the current user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique note identifier (UUID string).
    pub id: String,
    /// Short title shown in the list.
    pub title: String,
    /// Free-form body text.
    pub body: String,
    /// Last-modified timestamp as reported by the server.
    pub updated_at: String,
}

/// Body for note create/update requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    pub body: String,
}
