//! Deadline conversion between `datetime-local` input and epoch milliseconds.
//!
//! The caller supplies the user's UTC offset; the browser reads it from
//! `Date.getTimezoneOffset()` and the console from the host clock.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeadlineError {
    #[error("deadline is empty")]
    Empty,
    #[error("deadline {0:?} is not a date/time")]
    Unparsable(String),
    #[error("deadline {0:?} is before the Unix epoch")]
    BeforeEpoch(String),
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Offset east of UTC from a JS `getTimezoneOffset()` value (minutes *west*).
pub fn offset_from_js_minutes(minutes_west: i32) -> FixedOffset {
    FixedOffset::west_opt(minutes_west.saturating_mul(60)).unwrap_or_else(utc)
}

pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse a `datetime-local` value (or a bare date, meaning midnight) in
/// `offset` and return milliseconds since the Unix epoch.
pub fn parse_datetime_local(input: &str, offset: FixedOffset) -> Result<u64, DeadlineError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DeadlineError::Empty);
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(input, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| DeadlineError::Unparsable(input.to_string()))?;

    let local = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DeadlineError::Unparsable(input.to_string()))?;

    u64::try_from(local.timestamp_millis())
        .map_err(|_| DeadlineError::BeforeEpoch(input.to_string()))
}

/// Render epoch milliseconds in `offset` as `YYYY-MM-DD HH:MM:SS`.
pub fn format_deadline(ms: u64, offset: FixedOffset) -> String {
    let Ok(ms) = i64::try_from(ms) else {
        return format!("{ms} ms");
    };
    match DateTime::from_timestamp_millis(ms) {
        Some(utc) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => format!("{ms} ms"),
    }
}
