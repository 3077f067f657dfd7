//! Reporting: read-only aggregates over the session schema

use crate::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Number of rows the leaderboard is capped at
pub const LEADERBOARD_LIMIT: i64 = 10;

/// One leaderboard entry. Operators with zero sessions still appear,
/// with zero counts and zero average position.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeaderRow {
    pub id: i64,
    pub name: String,
    pub dni: String,
    pub total_sessions: i64,
    pub completions: i64,
    pub avg_position: f64,
}

/// Global row counts across the four tables
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Totals {
    pub media_total: i64,
    pub operators_total: i64,
    pub sessions_total: i64,
    pub events_total: i64,
}

/// Top 10 operators by completions, then session count, then average
/// final position (rounded to 2 decimals)
pub async fn leaderboard(pool: &SqlitePool) -> Result<Vec<LeaderRow>> {
    let rows = sqlx::query_as::<_, LeaderRow>(
        r#"
        SELECT
            o.id,
            o.name,
            o.dni,
            COUNT(ps.id) AS total_sessions,
            COALESCE(SUM(ps.completed), 0) AS completions,
            ROUND(COALESCE(AVG(ps.last_position), 0), 2) AS avg_position
        FROM operators o
        LEFT JOIN playback_sessions ps ON ps.operator_id = o.id
        GROUP BY o.id, o.name, o.dni
        ORDER BY completions DESC, total_sessions DESC, avg_position DESC
        LIMIT ?
        "#,
    )
    .bind(LEADERBOARD_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Single-row global counts. Zero counts on an empty store are valid
/// output, not an error.
pub async fn totals(pool: &SqlitePool) -> Result<Totals> {
    let totals = sqlx::query_as::<_, Totals>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM media_items) AS media_total,
            (SELECT COUNT(*) FROM operators) AS operators_total,
            (SELECT COUNT(*) FROM playback_sessions) AS sessions_total,
            (SELECT COUNT(*) FROM playback_events) AS events_total
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(totals)
}
