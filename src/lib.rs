//! salequery - Compile marketplace sale queries to ClickHouse SQL
//!
//! This library provides:
//! - Parameter validators for every filter, paging and aggregate parameter
//! - Cross-field verification against known collections, currencies and chains
//! - Filter assembly in a fixed, testable order
//! - Record and aggregate (point or daily history) query compilation
//! - SQL emission with inline literals or bound query parameters
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `query/` - raw request parameters and token types (QueryParams, AggregateFunction, ...)
//! - `plan/` - typed SQL fragments (Predicate, Statement, Source)
//! - `config` - compiler defaults and limits
//!
//! **Verb modules** (transformations):
//! - `validate/` - raw value → typed value
//! - `reference/` - cached reference sets for existence checks
//! - `verifier/` - QueryParams → accept / Rejection
//! - `planner/` - QueryParams → Statement
//! - `emitter/` - Statement → CompiledQuery
//! - `parser/` - YAML → CompilerConfig
//! - `history` - history rows → per-pair series
//!
//! # Example
//!
//! ```ignore
//! use salequery::{compile_record_query, verify_parameters, CompilerConfig, QueryParams};
//!
//! let params = QueryParams::parse("collection_name=pomelo&limit=10");
//! verify_parameters(&params, &reference, &config).await?;
//! let query = compile_record_query(&params, &config)?;
//! store.execute(query.sql()).await?;
//! ```

pub mod query;
pub mod plan;
pub mod validate;
pub mod reference;
pub mod verifier;
pub mod planner;
pub mod emitter;
pub mod parser;
pub mod history;
pub mod config;
pub mod clock;
pub mod error;

// Re-export commonly used types
pub use query::{QueryParams, AggregateFunction, AggregateColumn, AggregateMode, SortDirection, TimeRange};
pub use plan::{Field, Operator, Predicate, Statement, Value};
pub use reference::{ReferenceData, ReferenceKind, ReferenceSource, ReferenceError, StaticSource};
pub use verifier::{verify_parameters, Rejection, RejectionKind};
pub use planner::{compile_record_query, compile_aggregate_query, assemble_filters, FilterScope};
pub use emitter::{emit_sql, CompiledQuery, BoundParam, EmitMode, EmitError};
pub use config::CompilerConfig;
pub use clock::{Clock, SystemClock, FixedClock};
pub use error::ParseError;
