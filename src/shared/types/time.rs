//! Timestamp codec for the parking API.
//!
//! The backend exchanges local wall-clock times as `YYYY-MM-DD HH:MM:SS`
//! strings with no offset. All values handled by this crate are normalised
//! to that same reference, so plain [`NaiveDateTime`] arithmetic is sound.

use chrono::{NaiveDateTime, Timelike};

use super::errors::{DomainError, DomainResult};

/// Wire format used by every endpoint.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display format (matches the `id-ID` locale with two-digit fields).
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H.%M";

/// Values the backend uses for "no timestamp".
const EMPTY_MARKERS: [&str; 3] = ["", "null", "0000-00-00 00:00:00"];

const ACCEPTED_FORMATS: [&str; 4] = [
    WIRE_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn format_wire(ts: NaiveDateTime) -> String {
    ts.format(WIRE_FORMAT).to_string()
}

pub fn format_display(ts: NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Parse a timestamp in any accepted layout. Minute-precision input gets
/// `:00` seconds.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse an optional wire timestamp. Empty markers decode to `None`,
/// anything else that does not parse is an error.
pub fn parse_wire_opt(raw: &str) -> Result<Option<NaiveDateTime>, String> {
    let trimmed = raw.trim();
    if EMPTY_MARKERS.contains(&trimmed) {
        return Ok(None);
    }
    parse_timestamp(trimmed)
        .map(Some)
        .ok_or_else(|| format!("invalid timestamp '{}'", raw))
}

/// Parse operator input (`YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM` or the full
/// wire format).
pub fn parse_form_input(raw: &str) -> DomainResult<NaiveDateTime> {
    parse_timestamp(raw).ok_or_else(|| {
        DomainError::Validation(format!(
            "'{}' is not a valid time, expected YYYY-MM-DD HH:MM",
            raw
        ))
    })
}

pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
