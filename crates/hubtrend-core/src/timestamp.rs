//! Timestamp coercion to UTC
//!
//! Stored and registry-reported timestamps arrive as text. Everything the
//! engine compares must be a UTC instant, so all parsing goes through
//! [`parse_utc`].

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a timestamp into a UTC instant.
///
/// Accepts RFC 3339 with any offset (converted to UTC) and naive ISO-8601
/// date-times, which are taken to already be UTC. Returns `None` for anything
/// else; callers turn that into a `MalformedRecord` with their own context.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // "2024-01-08 00:00:00+00:00" style, as pandas prints aware timestamps
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Canonical storage form: RFC 3339, UTC, `Z` suffix, microsecond precision.
pub fn to_storage(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Report form: `YYYY-MM-DD HH:MM:SS[.ffffff]+00:00`. The fraction only
/// appears when non-zero.
pub fn to_display(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string()
}
