//! History response folding
//!
//! A history query returns one row per (chain, currency, day). Clients
//! receive one series per (chain, currency) pair instead.

use serde::{Deserialize, Serialize};

pub use crate::planner::DAY_SECONDS;

/// One row of a history query result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryRow {
    pub chain: String,
    pub symbol_code: String,
    pub timestamp: i64,
    pub value: RowValue,
}

/// ClickHouse writes 64-bit integers as JSON strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Number(f64),
    Text(String),
}

impl RowValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RowValue::Number(n) => Some(*n),
            RowValue::Text(s) => s.trim().parse().ok().filter(|v: &f64| v.is_finite()),
        }
    }
}

/// Values of one (chain, currency) pair, aligned with their timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySeries {
    pub network: String,
    pub symbol_code: String,
    pub values: Vec<f64>,
    pub timestamps: Vec<i64>,
    /// Bucket width in seconds
    pub interval: i64,
}

/// Group rows into series, one per distinct (chain, symbol_code) pair in
/// the order pairs first appear.
///
/// String values are parsed as decimals, so fractional averages survive.
/// Rows whose value is not numeric are dropped rather than kept as NaN,
/// which keeps `values` serializable as plain JSON numbers.
pub fn group_history(rows: &[HistoryRow], interval: i64) -> Vec<HistorySeries> {
    let mut series: Vec<HistorySeries> = Vec::new();
    for row in rows {
        let Some(value) = row.value.as_f64() else {
            continue;
        };
        let position = series
            .iter()
            .position(|s| s.network == row.chain && s.symbol_code == row.symbol_code);
        let entry = match position {
            Some(i) => &mut series[i],
            None => {
                series.push(HistorySeries {
                    network: row.chain.clone(),
                    symbol_code: row.symbol_code.clone(),
                    values: Vec::new(),
                    timestamps: Vec::new(),
                    interval,
                });
                let last = series.len() - 1;
                &mut series[last]
            }
        };
        entry.values.push(value);
        entry.timestamps.push(row.timestamp);
    }
    series
}
