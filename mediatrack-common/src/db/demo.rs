//! Randomized demo-data fixture
//!
//! Test-fixture generation behind POST /api/seed: demo operators, a
//! couple of extra media rows, and random closed sessions with events.
//! Not part of the core store contract; nothing else calls this.

use crate::db::catalog::{self, NewMediaItem};
use crate::db::models::MediaKind;
use crate::{time, Result};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

const DEMO_OPERATORS: &[&str] = &["Ana Demo", "Carlos Test", "Lucía QA"];

const DEMO_MEDIA: &[(&str, MediaKind, &str, i64, &str)] = &[
    (
        "Sinfonía Alfa",
        MediaKind::Audio,
        "https://samplelib.com/lib/preview/mp3/sample-9s.mp3",
        9,
        "Clásica",
    ),
    (
        "Clip Beta",
        MediaKind::Video,
        "https://samplelib.com/lib/preview/mp4/sample-15s.mp4",
        15,
        "Documental",
    ),
];

// rand::thread_rng() is not Send, so random draws happen in these small
// synchronous helpers rather than across await points.
fn rand_range(low: i64, high: i64) -> i64 {
    rand::thread_rng().gen_range(low..=high)
}

fn rand_position(max: f64) -> f64 {
    let raw: f64 = rand::thread_rng().gen_range(0.0..=max.max(f64::MIN_POSITIVE));
    (raw * 100.0).round() / 100.0
}

fn rand_bool() -> bool {
    rand::thread_rng().gen_bool(0.5)
}

/// Generate demo operators, extra media and random sessions with events.
pub async fn seed_demo(pool: &SqlitePool) -> Result<()> {
    // Ensure the base catalog exists first
    catalog::seed_catalog(pool).await?;

    let mut operator_ids = Vec::with_capacity(DEMO_OPERATORS.len());
    for name in DEMO_OPERATORS {
        let dni = format!("DEMO-{}", rand_range(1000, 9999));
        let result = sqlx::query("INSERT INTO operators (name, dni, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(dni)
            .bind(time::now_iso())
            .execute(pool)
            .await?;
        operator_ids.push(result.last_insert_rowid());
    }

    for (title, kind, source_url, duration, genre) in DEMO_MEDIA {
        let item = NewMediaItem {
            title: title.to_string(),
            kind: *kind,
            source_url: source_url.to_string(),
            duration_seconds: *duration,
            genre: genre.to_string(),
        };
        catalog::insert_media(pool, &item).await?;
    }

    let media_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM media_items")
        .fetch_all(pool)
        .await?;

    let mut session_count = 0u32;
    for &operator_id in &operator_ids {
        for _ in 0..rand_range(2, 5) {
            let media_id = media_ids[rand_range(0, media_ids.len() as i64 - 1) as usize];
            let completed = rand_bool();
            let position = rand_position(30.0);

            let result = sqlx::query(
                r#"
                INSERT INTO playback_sessions
                    (operator_id, media_item_id, started_at, ended_at, last_position, completed)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(operator_id)
            .bind(media_id)
            .bind(time::now_iso())
            .bind(time::now_iso())
            .bind(position)
            .bind(completed)
            .execute(pool)
            .await?;
            let session_id = result.last_insert_rowid();
            session_count += 1;

            for event_type in ["play", "pause", "stop"] {
                sqlx::query(
                    r#"
                    INSERT INTO playback_events
                        (session_id, event_type, position, payload_json, created_at)
                    VALUES (?, ?, ?, '{}', ?)
                    "#,
                )
                .bind(session_id)
                .bind(event_type)
                .bind(rand_position(position))
                .bind(time::now_iso())
                .execute(pool)
                .await?;
            }
        }
    }

    info!(
        "Demo data seeded: {} operators, {} sessions",
        operator_ids.len(),
        session_count
    );
    Ok(())
}
