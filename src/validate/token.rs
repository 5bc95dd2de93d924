//! Closed-set tokens with configured fallbacks

use crate::query::{AggregateColumn, AggregateFunction, SortDirection, TimeRange};

/// `ASC` or `DESC` exactly, otherwise `default`
pub fn parse_sort_direction(raw: Option<&str>, default: SortDirection) -> SortDirection {
    raw.and_then(|r| r.parse().ok()).unwrap_or(default)
}

/// Known function, otherwise `default`. Unknown tokens are rejected
/// earlier by the verifier; this never fails.
pub fn parse_aggregate_function(raw: Option<&str>, default: AggregateFunction) -> AggregateFunction {
    raw.and_then(|r| r.parse().ok()).unwrap_or(default)
}

/// Known column, otherwise `default`
pub fn parse_aggregate_column(raw: Option<&str>, default: AggregateColumn) -> AggregateColumn {
    raw.and_then(|r| r.parse().ok()).unwrap_or(default)
}

/// `default` when absent; one of [`TimeRange::ACCEPTED`] when present; `None` otherwise
pub fn parse_time_range(raw: Option<&str>, default: TimeRange) -> Option<TimeRange> {
    match raw.filter(|r| !r.is_empty()) {
        None => Some(default),
        Some(token) if TimeRange::ACCEPTED.contains(&token) => token.parse().ok(),
        Some(_) => None,
    }
}
