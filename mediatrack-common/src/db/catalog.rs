//! Media catalog: listing, creation, bootstrap seed and bulk import

use crate::db::models::{MediaItem, MediaKind};
use crate::{coerce, time, Error, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

/// Sample rows inserted once into an empty catalog
const SEED_SAMPLES: &[(&str, MediaKind, &str, i64, &str)] = &[
    (
        "Muestra MP3 3s",
        MediaKind::Audio,
        "https://samplelib.com/lib/preview/mp3/sample-3s.mp3",
        3,
        "Demo",
    ),
    (
        "Muestra MP3 6s",
        MediaKind::Audio,
        "https://samplelib.com/lib/preview/mp3/sample-6s.mp3",
        6,
        "Demo",
    ),
    (
        "Muestra MP4 5s",
        MediaKind::Video,
        "https://samplelib.com/lib/preview/mp4/sample-5s.mp4",
        5,
        "Demo",
    ),
    (
        "Muestra MP4 10s",
        MediaKind::Video,
        "https://samplelib.com/lib/preview/mp4/sample-10s.mp4",
        10,
        "Demo",
    ),
];

/// A validated, normalized catalog row ready for insertion
#[derive(Debug, Clone)]
pub struct NewMediaItem {
    pub title: String,
    pub kind: MediaKind,
    pub source_url: String,
    pub duration_seconds: i64,
    pub genre: String,
}

impl NewMediaItem {
    /// Validate and normalize client-supplied fields.
    ///
    /// Title and source URL are trimmed and must be non-empty; kind is
    /// lowercased and must be audio or video; empty genre falls back to
    /// "General". Negative durations pass through unchanged.
    pub fn validated(
        title: &str,
        kind: &str,
        source_url: &str,
        duration_seconds: i64,
        genre: &str,
    ) -> Result<Self> {
        let title = title.trim();
        let source_url = source_url.trim();

        let kind = MediaKind::parse(&kind.trim().to_lowercase())
            .filter(|_| !title.is_empty() && !source_url.is_empty())
            .ok_or_else(|| Error::Validation("Datos de medio incompletos.".to_string()))?;

        let genre = genre.trim();
        let genre = if genre.is_empty() { "General" } else { genre };

        Ok(Self {
            title: title.to_string(),
            kind,
            source_url: source_url.to_string(),
            duration_seconds,
            genre: genre.to_string(),
        })
    }
}

/// Insert one catalog row, returning its id
pub async fn insert_media(pool: &SqlitePool, item: &NewMediaItem) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO media_items (title, kind, source_url, duration_seconds, genre, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.title)
    .bind(item.kind)
    .bind(&item.source_url)
    .bind(item.duration_seconds)
    .bind(&item.genre)
    .bind(time::now_iso())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List catalog rows, most recent first, optionally filtered by kind
pub async fn list_media(pool: &SqlitePool, kind: Option<MediaKind>) -> Result<Vec<MediaItem>> {
    let items = match kind {
        Some(kind) => {
            sqlx::query_as::<_, MediaItem>(
                "SELECT * FROM media_items WHERE kind = ? ORDER BY id DESC",
            )
            .bind(kind)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MediaItem>("SELECT * FROM media_items ORDER BY id DESC")
                .fetch_all(pool)
                .await?
        }
    };

    Ok(items)
}

/// Total catalog row count
pub async fn media_count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM media_items")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Seed the fixed demo catalog, only when the table is empty.
///
/// Idempotent bootstrap: returns true when the samples were inserted,
/// false when the catalog already had rows.
pub async fn seed_catalog(pool: &SqlitePool) -> Result<bool> {
    if media_count(pool).await? > 0 {
        return Ok(false);
    }

    for (title, kind, source_url, duration, genre) in SEED_SAMPLES {
        let item = NewMediaItem {
            title: title.to_string(),
            kind: *kind,
            source_url: source_url.to_string(),
            duration_seconds: *duration,
            genre: genre.to_string(),
        };
        insert_media(pool, &item).await?;
    }

    info!("Seeded media catalog with {} sample items", SEED_SAMPLES.len());
    Ok(true)
}

/// One entry of a bulk JSON import. Every field is optional on the wire;
/// validation happens per row in [`bulk_import`].
#[derive(Debug, Default, Deserialize)]
pub struct MediaImportRow {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    pub duration_seconds: i64,
    #[serde(default)]
    pub genre: String,
}

/// Insert rows from a JSON export, skipping the ones that fail
/// validation. Not transactional across rows. Returns the number of rows
/// actually inserted.
pub async fn bulk_import(pool: &SqlitePool, rows: &[MediaImportRow]) -> Result<u32> {
    let mut inserted = 0u32;

    for row in rows {
        let item = match NewMediaItem::validated(
            &row.title,
            &row.kind,
            &row.source_url,
            row.duration_seconds,
            &row.genre,
        ) {
            Ok(item) => item,
            Err(_) => continue,
        };
        insert_media(pool, &item).await?;
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_rejects_incomplete_media() {
        assert!(NewMediaItem::validated("", "audio", "http://x", 0, "").is_err());
        assert!(NewMediaItem::validated("  ", "audio", "http://x", 0, "").is_err());
        assert!(NewMediaItem::validated("t", "podcast", "http://x", 0, "").is_err());
        assert!(NewMediaItem::validated("t", "", "http://x", 0, "").is_err());
        assert!(NewMediaItem::validated("t", "audio", "", 0, "").is_err());
    }

    #[test]
    fn test_validated_normalizes_fields() {
        let item = NewMediaItem::validated(" Título ", " AUDIO ", " http://x ", 12, "  ").unwrap();
        assert_eq!(item.title, "Título");
        assert_eq!(item.kind, MediaKind::Audio);
        assert_eq!(item.source_url, "http://x");
        assert_eq!(item.genre, "General");
    }

    #[test]
    fn test_validated_passes_negative_duration_through() {
        let item = NewMediaItem::validated("t", "video", "http://x", -5, "Rock").unwrap();
        assert_eq!(item.duration_seconds, -5);
        assert_eq!(item.genre, "Rock");
    }
}
