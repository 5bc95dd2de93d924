//! Query planner (verb module)
//!
//! Assembles filters from validated parameters and compiles the record
//! and aggregate statements.

mod build;
mod filter;
mod window;

pub use build::{compile_aggregate_query, compile_record_query};
pub use filter::{assemble_filters, FilterScope, ASSET_CONTAINMENT_PARAM};
pub use window::{start_of_day, time_window, DAY_SECONDS, HOUR_SECONDS, YEAR_SECONDS};
