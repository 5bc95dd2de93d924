//! Query request types (noun module)
//!
//! Raw parameters as they arrive from a request's query string, and the
//! closed token sets those parameters resolve to.

mod params;
mod types;

pub use params::QueryParams;
pub use types::{AggregateColumn, AggregateFunction, AggregateMode, SortDirection, TimeRange, UnknownToken};
