//! Local calendar-day bucketing.
//!
//! Daily limits and session aggregates are keyed by the user's local
//! calendar day, not UTC. Keys are always the canonical `YYYY-MM-DD` form;
//! [`normalize_date_key`] collapses older stored formats onto it so lookups
//! and merges stay stable.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

fn to_local(timestamp_ms: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Local `YYYY-MM-DD` key for the day containing `timestamp_ms`.
pub fn local_date_key(timestamp_ms: i64) -> String {
    to_local(timestamp_ms).format("%Y-%m-%d").to_string()
}

/// Collapse a stored date string to the canonical local key.
///
/// Already-canonical keys pass through untouched; timestamped formats are
/// re-bucketed into the local timezone. Unparseable input is returned
/// unchanged so a corrupt record never takes over another day's slot.
pub fn normalize_date_key(raw: &str) -> String {
    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return raw.to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Epoch milliseconds of local midnight for the day containing `now_ms`.
pub fn local_day_start_ms(now_ms: i64) -> i64 {
    let local = to_local(now_ms);
    let midnight = local.date_naive().and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|start| start.timestamp_millis())
        .unwrap_or(now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_has_canonical_shape() {
        let key = local_date_key(1_700_000_000_000);
        assert_eq!(key.len(), 10);
        assert_eq!(&key[4..5], "-");
        assert_eq!(&key[7..8], "-");
    }

    #[test]
    fn canonical_keys_pass_through() {
        assert_eq!(normalize_date_key("2024-01-05"), "2024-01-05");
    }

    #[test]
    fn slash_dates_are_rewritten() {
        assert_eq!(normalize_date_key("2024/01/05"), "2024-01-05");
    }

    #[test]
    fn rfc3339_collapses_to_local_day() {
        let now = 1_700_000_000_000;
        let rfc = DateTime::<Utc>::from_timestamp_millis(now)
            .unwrap()
            .to_rfc3339();
        assert_eq!(normalize_date_key(&rfc), local_date_key(now));
    }

    #[test]
    fn garbage_is_returned_unchanged() {
        assert_eq!(normalize_date_key("not a date"), "not a date");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["2024-01-05", "2024/01/05", "junk"] {
            let once = normalize_date_key(raw);
            assert_eq!(normalize_date_key(&once), once);
        }
    }

    #[test]
    fn day_start_is_within_the_same_day() {
        let now = 1_700_000_000_000;
        let start = local_day_start_ms(now);
        assert!(start <= now);
        assert!(now - start < 24 * 60 * 60 * 1000 + 3_600_000);
        assert_eq!(local_date_key(start), local_date_key(now));
    }
}
