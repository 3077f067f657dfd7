//! Session tracker: open sessions, append events, close sessions
//!
//! The only lifecycle here is open -> closed, encoded by `ended_at`.
//! Ending is an unconditional overwrite: a second end call wins, and a
//! session can be ended with no prior events.

use crate::{time, Error, Result};
use sqlx::SqlitePool;

/// Open a session for operator x media item. Zero/missing ids are
/// rejected; existence of the referenced rows is not checked here.
pub async fn start_session(
    pool: &SqlitePool,
    operator_id: i64,
    media_item_id: i64,
) -> Result<i64> {
    if operator_id == 0 || media_item_id == 0 {
        return Err(Error::Validation(
            "operatorId y mediaItemId son obligatorios.".to_string(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO playback_sessions (operator_id, media_item_id, started_at) VALUES (?, ?, ?)",
    )
    .bind(operator_id)
    .bind(media_item_id)
    .bind(time::now_iso())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Append one event row. The payload is stored as JSON text and must
/// round-trip to an equivalent structure on read. No check that the
/// session is still open.
pub async fn log_event(
    pool: &SqlitePool,
    session_id: i64,
    event_type: &str,
    position: f64,
    payload: &serde_json::Value,
) -> Result<()> {
    let event_type = event_type.trim();
    if session_id == 0 || event_type.is_empty() {
        return Err(Error::Validation(
            "sessionId y eventType son obligatorios.".to_string(),
        ));
    }

    let payload_json = serde_json::to_string(payload)
        .map_err(|e| Error::Internal(format!("payload serialization failed: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO playback_events (session_id, event_type, position, payload_json, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(session_id)
    .bind(event_type)
    .bind(position)
    .bind(payload_json)
    .bind(time::now_iso())
    .execute(pool)
    .await?;

    Ok(())
}

/// Close a session: set ended_at, last_position and completed in one
/// write. Last write wins; re-ending an already ended session is allowed.
pub async fn end_session(
    pool: &SqlitePool,
    session_id: i64,
    last_position: f64,
    completed: bool,
) -> Result<()> {
    if session_id == 0 {
        return Err(Error::Validation("sessionId es obligatorio.".to_string()));
    }

    sqlx::query(
        r#"
        UPDATE playback_sessions
        SET ended_at = ?, last_position = ?, completed = ?
        WHERE id = ?
        "#,
    )
    .bind(time::now_iso())
    .bind(last_position)
    .bind(completed)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(())
}
