//! Timestamp utilities
//!
//! All persisted timestamps are ISO-8601 UTC strings, matching the
//! `created_at`/`started_at`/`ended_at` columns in the store.

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC timestamp as the ISO-8601 string stored in the database
pub fn now_iso() -> String {
    now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_now_iso_round_trips() {
        let iso = now_iso();
        let parsed = DateTime::parse_from_rfc3339(&iso).expect("Should parse as RFC 3339");
        assert_eq!(parsed.timezone().utc_minus_local(), 0);
    }

    #[test]
    fn test_now_iso_is_lexicographically_ordered() {
        // Stored timestamps are compared as text; fixed-width UTC format
        // keeps string order equal to time order.
        let a = now_iso();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = now_iso();
        assert!(a < b);
        assert_eq!(a.len(), b.len());
    }
}
