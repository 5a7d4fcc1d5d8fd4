//! Time and timestamp helpers.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

/// UTC timestamp used for receive times and snapshot versions.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// The host's current UTC offset, used to render local times of day.
#[must_use]
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Parse a timestamp as reported by the relay.
///
/// RFC 3339 strings keep their own offset. Strings without an offset
/// (`2024-05-01T10:15:30.123`) are read as wall-clock time in `offset`.
#[must_use]
pub fn parse_reported(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// Render a reported timestamp as a time of day (`HH:MM:SS`) in `offset`.
///
/// Returns `None` when the string is not a recognisable timestamp.
#[must_use]
pub fn time_of_day(raw: &str, offset: FixedOffset) -> Option<String> {
    parse_reported(raw, offset).map(|ts| ts.with_timezone(&offset).format("%H:%M:%S").to_string())
}
