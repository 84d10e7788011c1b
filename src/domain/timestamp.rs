//! RFC3339 helpers for request-facing time fields.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Formats a time the way the API expects (`2024-01-01T12:00:00Z`).
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses a time string returned by the API.
pub fn parse_time(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
}
