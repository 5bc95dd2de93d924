//! Time windows for history queries

use crate::query::TimeRange;

pub const HOUR_SECONDS: i64 = 3_600;
pub const DAY_SECONDS: i64 = 86_400;
pub const YEAR_SECONDS: i64 = 365 * DAY_SECONDS;

/// Start of the UTC day containing `now`
pub fn start_of_day(now: i64) -> i64 {
    now - now.rem_euclid(DAY_SECONDS)
}

/// `(low, high)` epoch-second bounds of `range`; `None` for `all`.
///
/// Hour ranges end at `now`. Day and year ranges end at the start of the
/// current UTC day so that every bucket covers a whole day.
pub fn time_window(range: TimeRange, now: i64) -> Option<(i64, i64)> {
    let midnight = start_of_day(now);
    match range {
        TimeRange::Hours(n) => Some((now - i64::from(n) * HOUR_SECONDS, now)),
        TimeRange::Days(n) => Some((midnight - i64::from(n) * DAY_SECONDS, midnight)),
        TimeRange::Years(n) => Some((midnight - i64::from(n) * YEAR_SECONDS, midnight)),
        TimeRange::All => None,
    }
}
