//! Database initialization
//!
//! Creates the database file on first run and applies the schema
//! idempotently; safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema creation is idempotent - safe to call multiple times
    create_operators_table(&pool).await?;
    create_media_items_table(&pool).await?;
    create_playback_sessions_table(&pool).await?;
    create_playback_events_table(&pool).await?;

    Ok(pool)
}

async fn create_operators_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS operators (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            dni TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_media_items_table(pool: &SqlitePool) -> Result<()> {
    // kind is constrained here; inserts with any other value fail at the
    // store boundary
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            kind TEXT NOT NULL CHECK(kind IN ('audio', 'video')),
            source_url TEXT NOT NULL,
            duration_seconds INTEGER DEFAULT 0,
            genre TEXT DEFAULT 'General',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_playback_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playback_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            operator_id INTEGER NOT NULL,
            media_item_id INTEGER NOT NULL,
            started_at TEXT NOT NULL,
            ended_at TEXT,
            last_position REAL DEFAULT 0,
            completed INTEGER DEFAULT 0,
            FOREIGN KEY(operator_id) REFERENCES operators(id),
            FOREIGN KEY(media_item_id) REFERENCES media_items(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sessions_operator ON playback_sessions(operator_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_playback_events_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playback_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id INTEGER NOT NULL,
            event_type TEXT NOT NULL,
            position REAL DEFAULT 0,
            payload_json TEXT DEFAULT '{}',
            created_at TEXT NOT NULL,
            FOREIGN KEY(session_id) REFERENCES playback_sessions(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_session ON playback_events(session_id)")
        .execute(pool)
        .await?;

    Ok(())
}
