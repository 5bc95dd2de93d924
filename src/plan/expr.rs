//! Expression and predicate types

use std::fmt;

use serde::Serialize;

/// A column reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Table name or alias, empty for unqualified references
    pub table: String,
    /// Column name
    pub name: String,
}

impl Column {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }

    /// Create an unqualified column reference (no table prefix)
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            table: String::new(),
            name: name.into(),
        }
    }

    /// Fully qualified name: table.column
    pub fn qualified_name(&self) -> String {
        if self.table.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.table, self.name)
        }
    }
}

/// Scalar expressions used in select lists
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(Column),
    /// Function call, e.g. `length(asset_ids)`
    Call {
        func: &'static str,
        args: Vec<Expr>,
    },
    /// Aggregate call; `count()` when the argument is absent
    Aggregate {
        func: &'static str,
        arg: Option<Column>,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(Column::unqualified(name))
    }

    pub fn call(func: &'static str, arg: Expr) -> Self {
        Expr::Call {
            func,
            args: vec![arg],
        }
    }
}

/// A filter value. Rendered inline or bound as a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    UInt(u64),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// ClickHouse type used in a `{name:Type}` placeholder
    pub fn clickhouse_type(&self) -> &'static str {
        match self {
            Value::UInt(_) => "UInt64",
            Value::Int(_) => "Int64",
            Value::Float(_) => "Float64",
            Value::Str(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::UInt(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

/// Comparison operators of the filter families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    /// Range operators in the order their filters are emitted
    pub const RANGE: [Operator; 4] = [Operator::Gte, Operator::Gt, Operator::Lte, Operator::Lt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }

    /// Parameter-name prefix of a range operator; `None` for `Eq`
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Operator::Eq => None,
            Operator::Gt => Some("greater"),
            Operator::Gte => Some("greater_or_equals"),
            Operator::Lt => Some("less"),
            Operator::Lte => Some("less_or_equals"),
        }
    }

    /// Parameter name selecting this operator on `field`
    /// (`greater_by_block_number`, or the bare field name for `Eq`)
    pub fn param_name(&self, field: Field) -> String {
        match self.prefix() {
            Some(prefix) => format!("{}_by_{}", prefix, field.name()),
            None => field.name().to_string(),
        }
    }
}

/// Sale attributes that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CollectionName,
    Chain,
    SaleId,
    BlockNumber,
    Timestamp,
    ListingPriceAmount,
    ListingPriceValue,
    ListingPriceSymcode,
    TrxId,
    AssetIds,
}

impl Field {
    /// Fields with a range family, in emission order within an operator
    pub const RANGE: [Field; 4] = [
        Field::BlockNumber,
        Field::Timestamp,
        Field::ListingPriceAmount,
        Field::ListingPriceValue,
    ];

    /// Fields with an equality filter, in emission order
    pub const EQUALITY: [Field; 9] = [
        Field::CollectionName,
        Field::Chain,
        Field::SaleId,
        Field::BlockNumber,
        Field::Timestamp,
        Field::ListingPriceAmount,
        Field::ListingPriceValue,
        Field::ListingPriceSymcode,
        Field::TrxId,
    ];

    /// Column and parameter name
    pub fn name(&self) -> &'static str {
        match self {
            Field::CollectionName => "collection_name",
            Field::Chain => "chain",
            Field::SaleId => "sale_id",
            Field::BlockNumber => "block_number",
            Field::Timestamp => "timestamp",
            Field::ListingPriceAmount => "listing_price_amount",
            Field::ListingPriceValue => "listing_price_value",
            Field::ListingPriceSymcode => "listing_price_symcode",
            Field::TrxId => "trx_id",
            Field::AssetIds => "asset_ids",
        }
    }

    /// Timestamps are stored as DateTime and compared as epoch seconds
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Field::Timestamp)
    }
}

/// One `WHERE` fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `<field> <op> <value>`
    Compare {
        field: Field,
        op: Operator,
        value: Value,
    },
    /// `has(<field>, <value>)` on a set-valued column
    Contains {
        field: Field,
        value: Value,
    },
    /// `toUnixTimestamp(<column>) BETWEEN <low> AND <high>`
    TimeWindow {
        column: Column,
        low: Value,
        high: Value,
    },
}

impl Predicate {
    pub fn compare(field: Field, op: Operator, value: Value) -> Self {
        Predicate::Compare { field, op, value }
    }
}
