//! Row types for the mediatrack schema

use serde::{Deserialize, Serialize};

/// Media modality. Enforced at the store boundary by a CHECK constraint;
/// any other value fails the insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Parse a client-supplied kind string (already lowercased by callers
    /// that accept mixed case). Returns None for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "audio" => Some(MediaKind::Audio),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

/// A catalog entry: an external URL or a locally uploaded file
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MediaItem {
    pub id: i64,
    pub title: String,
    pub kind: MediaKind,
    pub source_url: String,
    pub duration_seconds: i64,
    pub genre: String,
    pub created_at: String,
}

/// A registered operator. Duplicates by dni are permitted; rows are
/// immutable after creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Operator {
    pub id: i64,
    pub name: String,
    pub dni: String,
    pub created_at: String,
}

/// A playback session. `ended_at = NULL` means the session is open.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlaybackSession {
    pub id: i64,
    pub operator_id: i64,
    pub media_item_id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub last_position: f64,
    pub completed: bool,
}

/// An append-only playback fact (play/pause/stop/...) with a JSON payload
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlaybackEvent {
    pub id: i64,
    pub session_id: i64,
    pub event_type: String,
    pub position: f64,
    pub payload_json: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_accepts_only_audio_video() {
        assert_eq!(MediaKind::parse("audio"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::parse("video"), Some(MediaKind::Video));
        assert_eq!(MediaKind::parse("Audio"), None);
        assert_eq!(MediaKind::parse("podcast"), None);
        assert_eq!(MediaKind::parse(""), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Audio).unwrap(), "\"audio\"");
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"video\"");
    }
}
