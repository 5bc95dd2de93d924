//! SQL emitter (verb module)
//!
//! Transforms a [`Statement`](crate::plan::Statement) into ClickHouse SQL
//! text, either with literal values inline or with bound query parameters.

mod compiled;
mod error;
mod sql;

pub use compiled::{BoundParam, CompiledQuery};
pub use error::EmitError;
pub use sql::{emit_sql, EmitMode};
