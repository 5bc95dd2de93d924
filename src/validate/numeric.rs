//! Numeric parameters
//!
//! Numbers are read from the longest numeric prefix of the input, so
//! `"10abc"` reads as 10. An input with no numeric prefix is reported as
//! [`Numeric::NotANumber`], which callers can tell apart from a value that
//! was absent or not positive.

use std::sync::LazyLock;

use regex::Regex;

static INT_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid regex"));
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid regex")
});

/// Outcome of a positive-number validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric<T> {
    /// Missing, empty, zero or negative
    Absent,
    /// Present but not numeric
    NotANumber,
    Value(T),
}

impl<T: Copy> Numeric<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Numeric::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Numeric::NotANumber)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Numeric::Absent)
    }
}

/// Leading integer of `raw`; `None` when there is none or it overflows
fn int_prefix(raw: &str) -> Option<i64> {
    let caps = INT_PREFIX.captures(raw)?;
    caps[1].parse::<i64>().ok()
}

pub fn parse_positive_int(raw: Option<&str>) -> Numeric<u64> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Numeric::Absent;
    };
    match int_prefix(raw) {
        Some(value) => positive_int_from(value),
        None => Numeric::NotANumber,
    }
}

/// Positive-integer rule for an already numeric input
pub fn positive_int_from(value: i64) -> Numeric<u64> {
    if value <= 0 {
        Numeric::Absent
    } else {
        Numeric::Value(value as u64)
    }
}

/// Decimal counterpart of [`parse_positive_int`], used for price values
pub fn parse_positive_float(raw: Option<&str>) -> Numeric<f64> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Numeric::Absent;
    };
    let parsed = FLOAT_PREFIX
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|v| v.is_finite());
    match parsed {
        Some(v) if v > 0.0 => Numeric::Value(v),
        Some(_) => Numeric::Absent,
        None => Numeric::NotANumber,
    }
}

/// Page size: 1 when absent, unparsable or not positive, clamped to `max_limit`
pub fn parse_limit(raw: Option<&str>, max_limit: u64) -> u64 {
    let requested = parse_positive_int(raw).value().unwrap_or(1);
    requested.min(max_limit.max(1))
}
