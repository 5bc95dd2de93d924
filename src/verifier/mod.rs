//! Cross-field verification (verb module)
//!
//! Rejects requests whose parameters are individually well-formed but
//! cannot be executed together, before any SQL is built.

mod error;
mod verify;

pub use error::{Rejection, RejectionKind};
pub use verify::verify_parameters;
pub(crate) use verify::check_aggregate_pair;
