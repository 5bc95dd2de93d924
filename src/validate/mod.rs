//! Parameter validators (verb module)
//!
//! One total function per domain concept. Each takes the raw parameter
//! value (or its absence) and returns a normalized value, or nothing when
//! the input does not fit the grammar. The only hard failure is a numeric
//! timestamp of unsupported length.

mod error;
mod numeric;
mod text;
mod timestamp;
mod token;

pub use error::TimestampError;
pub use numeric::{parse_limit, parse_positive_float, parse_positive_int, positive_int_from, Numeric};
pub use text::{parse_chain, parse_collection_name, parse_symbol_code, parse_transaction_hash};
pub use timestamp::{parse_timestamp, timestamp_from_number};
pub use token::{parse_aggregate_column, parse_aggregate_function, parse_sort_direction, parse_time_range};
