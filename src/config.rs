//! Compiler configuration
//!
//! Every default the validators fall back to lives here and is passed
//! explicitly into each compile call.

use serde::{Deserialize, Serialize};

use crate::query::{AggregateColumn, AggregateFunction, SortDirection, TimeRange};

pub const DEFAULT_MAX_LIMIT: u64 = 500;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Ceiling for the `limit` parameter
    pub max_limit: u64,
    pub default_sort_direction: SortDirection,
    pub default_aggregate_function: AggregateFunction,
    pub default_aggregate_column: AggregateColumn,
    /// Look-back window of a history query without `range`
    pub default_time_range: TimeRange,
    /// Emit `{pN:Type}` placeholders instead of inline literals
    pub bind_values: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
            default_sort_direction: SortDirection::Desc,
            default_aggregate_function: AggregateFunction::Count,
            default_aggregate_column: AggregateColumn::SaleId,
            default_time_range: TimeRange::Hours(24),
            bind_values: false,
        }
    }
}

impl CompilerConfig {
    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn with_bound_values(mut self) -> Self {
        self.bind_values = true;
        self
    }
}
