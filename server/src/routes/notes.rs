//! Notes REST routes, scoped to the session user.
//!
//! Every query filters on `user_id`, so a well-formed request for someone
//! else's note is indistinguishable from a missing note (404).

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::state::AppState;

const MAX_TITLE_LEN: usize = 200;

#[derive(Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct NoteBody {
    pub title: String,
    pub body: String,
}

fn validate_title(title: &str) -> Option<String> {
    let title = title.trim();
    if title.is_empty() || title.len() > MAX_TITLE_LEN {
        return None;
    }
    Some(title.to_owned())
}

fn row_to_note(row: &PgRow) -> NoteResponse {
    NoteResponse {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        updated_at: row.get("updated_at"),
    }
}

/// `GET /api/notes` — list the user's notes, most recently touched first.
pub async fn list_notes(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<NoteResponse>>, StatusCode> {
    let rows = sqlx::query(
        r"SELECT id, title, body, updated_at::text AS updated_at
          FROM notes
          WHERE user_id = $1
          ORDER BY updated_at DESC",
    )
    .bind(auth.user.id)
    .fetch_all(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "notes list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(rows.iter().map(row_to_note).collect()))
}

/// `POST /api/notes` — create a note.
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NoteBody>,
) -> Result<Json<NoteResponse>, StatusCode> {
    let title = validate_title(&body.title).ok_or(StatusCode::BAD_REQUEST)?;

    let row = sqlx::query(
        r"INSERT INTO notes (user_id, title, body)
          VALUES ($1, $2, $3)
          RETURNING id, title, body, updated_at::text AS updated_at",
    )
    .bind(auth.user.id)
    .bind(&title)
    .bind(&body.body)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "note create failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(row_to_note(&row)))
}

/// `PATCH /api/notes/{id}` — update a note's title and body.
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<Uuid>,
    Json(body): Json<NoteBody>,
) -> Result<Json<NoteResponse>, StatusCode> {
    let title = validate_title(&body.title).ok_or(StatusCode::BAD_REQUEST)?;

    let row = sqlx::query(
        r"UPDATE notes
          SET title = $1, body = $2, updated_at = now()
          WHERE id = $3 AND user_id = $4
          RETURNING id, title, body, updated_at::text AS updated_at",
    )
    .bind(&title)
    .bind(&body.body)
    .bind(note_id)
    .bind(auth.user.id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "note update failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    row.as_ref().map(row_to_note).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `DELETE /api/notes/{id}` — delete a note.
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(auth.user.id)
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "note delete failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
