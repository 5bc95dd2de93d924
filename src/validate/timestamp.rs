//! Timestamp parameters
//!
//! Accepts epoch seconds (10 digits), epoch milliseconds (13 digits) or a
//! calendar string interpreted as UTC. Results are whole seconds.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::error::TimestampError;

// A bare year is all digits and takes the numeric path; the year-only
// branch here only matches after a trailing `Z` is stripped (`2023Z`).
static CALENDAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})(?:-(\d{2})(?:-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.\d{1,9})?)?)?)?)?$",
    )
    .expect("valid regex")
});

/// Parse a timestamp parameter into epoch seconds.
///
/// Returns `Ok(None)` when the value is absent or is not a recognizable
/// date, and an error only for a digit string of unsupported length.
pub fn parse_timestamp(raw: Option<&str>) -> Result<Option<i64>, TimestampError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let number: i64 = raw.parse().map_err(|_| TimestampError::invalid(raw))?;
        return timestamp_from_number(number).map(Some);
    }
    Ok(parse_calendar(raw))
}

/// Epoch seconds from a numeric timestamp, by its decimal length
pub fn timestamp_from_number(number: i64) -> Result<i64, TimestampError> {
    match number.to_string().len() {
        10 => Ok(number),
        13 => Ok(number.div_euclid(1000)),
        _ => Err(TimestampError::invalid(number)),
    }
}

fn parse_calendar(raw: &str) -> Option<i64> {
    let text = raw.strip_suffix('Z').unwrap_or(raw);
    let caps = CALENDAR.captures(text)?;
    let part = |i: usize, default: u32| -> Option<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = caps[1].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, part(2, 1)?, part(3, 1)?)?;
    let time = date.and_hms_opt(part(4, 0)?, part(5, 0)?, part(6, 0)?)?;
    Some(time.and_utc().timestamp())
}
