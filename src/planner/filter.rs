//! Filter assembly
//!
//! Turns validated parameters into an ordered list of predicates. The
//! order is fixed: range filters by operator (`>=`, `>`, `<=`, `<`) and,
//! within an operator, by field; then asset containment; then equality
//! filters in the sale's field order. Parameters that fail validation are
//! skipped.

use crate::plan::{Field, Operator, Predicate, Value};
use crate::query::QueryParams;
use crate::validate::{
    parse_chain, parse_collection_name, parse_positive_float, parse_positive_int,
    parse_symbol_code, parse_timestamp, parse_transaction_hash, TimestampError,
};

/// Parameter holding an asset id that must appear in a sale's `asset_ids`
pub const ASSET_CONTAINMENT_PARAM: &str = "asset_id_in_asset_ids";

/// Which query the filters are assembled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    Records,
    Aggregate,
    /// Time-bucketed aggregates take their time bound from `range`,
    /// so timestamp filters do not apply
    History,
}

impl FilterScope {
    pub fn includes(&self, field: Field) -> bool {
        !(matches!(self, FilterScope::History) && field.is_timestamp())
    }
}

/// Assemble the `WHERE` predicates for `params`.
///
/// Fails only on a numeric timestamp of unsupported length.
pub fn assemble_filters(params: &QueryParams, scope: FilterScope) -> Result<Vec<Predicate>, TimestampError> {
    let mut predicates = Vec::new();

    for op in Operator::RANGE {
        for field in Field::RANGE {
            if !scope.includes(field) {
                continue;
            }
            if let Some(value) = field_value(field, params.get(&op.param_name(field)))? {
                predicates.push(Predicate::compare(field, op, value));
            }
        }
    }

    if let Some(asset_id) = parse_positive_int(params.get(ASSET_CONTAINMENT_PARAM)).value() {
        predicates.push(Predicate::Contains {
            field: Field::AssetIds,
            value: Value::UInt(asset_id),
        });
    }

    for field in Field::EQUALITY {
        if !scope.includes(field) {
            continue;
        }
        if let Some(value) = field_value(field, params.get(field.name()))? {
            predicates.push(Predicate::compare(field, Operator::Eq, value));
        }
    }

    Ok(predicates)
}

/// Validated value of one filter parameter
fn field_value(field: Field, raw: Option<&str>) -> Result<Option<Value>, TimestampError> {
    let text = |v: &str| Value::Str(v.to_string());
    let value = match field {
        Field::CollectionName => parse_collection_name(raw).map(text),
        Field::Chain => parse_chain(raw).map(text),
        Field::ListingPriceSymcode => parse_symbol_code(raw).map(text),
        Field::TrxId => parse_transaction_hash(raw).map(text),
        Field::SaleId | Field::BlockNumber | Field::ListingPriceAmount | Field::AssetIds => {
            parse_positive_int(raw).value().map(Value::UInt)
        }
        Field::ListingPriceValue => parse_positive_float(raw).value().map(Value::Float),
        Field::Timestamp => parse_timestamp(raw)?.map(Value::Int),
    };
    Ok(value)
}
