//! Operator registry: registration and per-operator session history

use crate::db::models::MediaKind;
use crate::{time, Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;

/// Default number of history rows when the client does not ask for more
pub const DEFAULT_HISTORY_LIMIT: i64 = 8;

/// Outcome of a successful registration: the new id plus the normalized
/// name and dni as stored
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredOperator {
    pub id: i64,
    pub name: String,
    pub dni: String,
}

/// A history entry: one session joined with its media item
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryRow {
    pub id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub last_position: f64,
    pub completed: bool,
    pub title: String,
    pub kind: MediaKind,
    pub genre: String,
}

/// Register an operator. Name is trimmed, dni is trimmed and uppercased;
/// both must be non-empty. No dedup check: duplicate dni rows are allowed.
pub async fn register_operator(
    pool: &SqlitePool,
    name: &str,
    dni: &str,
) -> Result<RegisteredOperator> {
    let name = name.trim();
    let dni = dni.trim().to_uppercase();

    if name.is_empty() || dni.is_empty() {
        return Err(Error::Validation(
            "Nombre y DNI son obligatorios.".to_string(),
        ));
    }

    let result = sqlx::query("INSERT INTO operators (name, dni, created_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(&dni)
        .bind(time::now_iso())
        .execute(pool)
        .await?;

    Ok(RegisteredOperator {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        dni,
    })
}

/// Up to `limit` most recent sessions for an operator, newest first.
/// An operator with no sessions yields an empty list.
pub async fn operator_history(
    pool: &SqlitePool,
    operator_id: i64,
    limit: i64,
) -> Result<Vec<HistoryRow>> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT ps.id, ps.started_at, ps.ended_at, ps.last_position, ps.completed,
               mi.title, mi.kind, mi.genre
        FROM playback_sessions ps
        JOIN media_items mi ON mi.id = ps.media_item_id
        WHERE ps.operator_id = ?
        ORDER BY ps.id DESC
        LIMIT ?
        "#,
    )
    .bind(operator_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
