//! Reference data (verb module)
//!
//! Sets of currently known collections, symbol codes and chains, used by
//! the verifier for existence checks. Each set is fetched once from a
//! [`ReferenceSource`] and cached until invalidated.

mod cache;
mod error;
mod source;

pub use cache::ReferenceData;
pub use error::ReferenceError;
pub use source::{ReferenceKind, ReferenceSource, StaticSource};
