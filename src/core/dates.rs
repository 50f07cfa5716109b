//! Date parsing and formatting
//!
//! Apple Health writes dates as `2022-10-06 20:04:10 +0100`; GPX route files use
//! ISO-8601 with a `Z` suffix. Both are parsed into `DateTime<FixedOffset>` so the
//! offset the watch recorded is kept for file naming, while TCX output is always
//! rendered in UTC.

use crate::domain::{HealthTcxError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Format of archive dates (`startDate`, `endDate`)
pub const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Format of TCX timestamps (`Id`, `Lap StartTime`, `Trackpoint/Time`)
pub const TCX_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format of the timestamp part of output file names
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

fn source_date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} [+-]\d{4}$")
            .expect("source date pattern is a valid regex")
    })
}

/// Parses an archive date such as `2024-01-15 10:00:00 +0000`
///
/// # Errors
///
/// Returns [`HealthTcxError::DateFormat`] if the text is not exactly
/// `YYYY-MM-DD HH:MM:SS ±HHMM` or names an impossible date.
///
/// # Examples
///
/// ```
/// use healthtcx::core::dates::parse_source_date;
///
/// let start = parse_source_date("2022-10-06 20:04:10 +0100").unwrap();
/// assert_eq!(start.offset().local_minus_utc(), 3600);
/// ```
pub fn parse_source_date(text: &str) -> Result<DateTime<FixedOffset>> {
    if !source_date_shape().is_match(text) {
        return Err(HealthTcxError::date_format(
            text,
            "expected 'YYYY-MM-DD HH:MM:SS +HHMM'",
        ));
    }

    DateTime::parse_from_str(text, SOURCE_DATE_FORMAT)
        .map_err(|e| HealthTcxError::date_format(text, e.to_string()))
}

/// Parses a GPX `<time>` value such as `2024-01-15T10:00:10Z`
///
/// A trailing `Z` is read as `+00:00`. Fractional seconds and explicit offsets
/// are accepted.
///
/// # Errors
///
/// Returns [`HealthTcxError::DateFormat`] on malformed input.
pub fn parse_track_timestamp(text: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    let normalized = match trimmed.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized)
        .map_err(|e| HealthTcxError::date_format(text, e.to_string()))
}

/// Renders an instant as a TCX timestamp, converted to UTC
///
/// # Examples
///
/// ```
/// use healthtcx::core::dates::{format_tcx_timestamp, parse_source_date};
///
/// let start = parse_source_date("2022-10-06 20:04:10 +0100").unwrap();
/// assert_eq!(format_tcx_timestamp(&start), "2022-10-06T19:04:10.000000Z");
/// ```
pub fn format_tcx_timestamp(instant: &DateTime<FixedOffset>) -> String {
    instant
        .with_timezone(&Utc)
        .format(TCX_TIMESTAMP_FORMAT)
        .to_string()
}

/// Renders an instant in its own offset as `YYYY-MM-DD_HHMMSS`
pub fn format_file_stamp(instant: &DateTime<FixedOffset>) -> String {
    instant.format(FILE_STAMP_FORMAT).to_string()
}
