//! Closed token sets accepted by the query parameters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A token that is not a member of the expected set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    pub expected: &'static str,
    pub token: String,
}

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: '{}'", self.expected, self.token)
    }
}

impl std::error::Error for UnknownToken {}

fn unknown(expected: &'static str, token: &str) -> UnknownToken {
    UnknownToken {
        expected,
        token: token.to_string(),
    }
}

/// Direction of the `ORDER BY sale_id` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(unknown("sort direction", s)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate function applied by the aggregate query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    #[default]
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Median,
}

impl AggregateFunction {
    pub const ALL: [AggregateFunction; 6] = [
        AggregateFunction::Count,
        AggregateFunction::Sum,
        AggregateFunction::Avg,
        AggregateFunction::Min,
        AggregateFunction::Max,
        AggregateFunction::Median,
    ];

    /// ClickHouse function name
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "count",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
            AggregateFunction::Median => "median",
        }
    }
}

impl FromStr for AggregateFunction {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| unknown("aggregate function", s))
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column an aggregate function is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateColumn {
    #[default]
    SaleId,
    /// Number of assets in a sale; derived as `length(asset_ids)`
    TotalAssetIds,
    ListingPriceAmount,
    ListingPriceValue,
}

impl AggregateColumn {
    pub const ALL: [AggregateColumn; 4] = [
        AggregateColumn::SaleId,
        AggregateColumn::TotalAssetIds,
        AggregateColumn::ListingPriceAmount,
        AggregateColumn::ListingPriceValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateColumn::SaleId => "sale_id",
            AggregateColumn::TotalAssetIds => "total_asset_ids",
            AggregateColumn::ListingPriceAmount => "listing_price_amount",
            AggregateColumn::ListingPriceValue => "listing_price_value",
        }
    }

    /// True when the column is not stored and must be projected by a subquery
    pub fn is_computed(&self) -> bool {
        matches!(self, AggregateColumn::TotalAssetIds)
    }

    /// True for identifier columns, which may only be counted
    pub fn is_identifier(&self) -> bool {
        matches!(self, AggregateColumn::SaleId)
    }
}

impl FromStr for AggregateColumn {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| unknown("aggregate column", s))
    }
}

impl fmt::Display for AggregateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look-back window of a history query: `<N>h`, `<N>d`, `<N>y` or `all`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeRange {
    Hours(u32),
    Days(u32),
    Years(u32),
    All,
}

impl TimeRange {
    /// Tokens a client may send in the `range` parameter
    pub const ACCEPTED: [&'static str; 6] = ["24h", "7d", "30d", "90d", "1y", "all"];
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Hours(24)
    }
}

impl FromStr for TimeRange {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(TimeRange::All);
        }
        if !s.is_ascii() {
            return Err(unknown("time range", s));
        }
        let split = s.len().saturating_sub(1);
        let (count, unit) = s.split_at(split);
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown("time range", s));
        }
        let count: u32 = count.parse().map_err(|_| unknown("time range", s))?;
        match unit {
            "h" => Ok(TimeRange::Hours(count)),
            "d" => Ok(TimeRange::Days(count)),
            "y" => Ok(TimeRange::Years(count)),
            _ => Err(unknown("time range", s)),
        }
    }
}

impl TryFrom<String> for TimeRange {
    type Error = UnknownToken;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::Hours(n) => write!(f, "{}h", n),
            TimeRange::Days(n) => write!(f, "{}d", n),
            TimeRange::Years(n) => write!(f, "{}y", n),
            TimeRange::All => f.write_str("all"),
        }
    }
}

/// Shape of an aggregate query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateMode {
    /// A single aggregate over every matching sale
    #[default]
    Point,
    /// Daily buckets per chain and currency over a time range
    History,
}

impl AggregateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateMode::Point => "point",
            AggregateMode::History => "history",
        }
    }
}
