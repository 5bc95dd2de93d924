use tracing::debug;

use crate::config::CompilerConfig;
use crate::query::{AggregateColumn, AggregateFunction, QueryParams};
use crate::reference::{ReferenceData, ReferenceKind};
use crate::validate::{
    parse_aggregate_column, parse_aggregate_function, parse_chain, parse_collection_name,
    parse_symbol_code, parse_time_range,
};
use super::error::Rejection;

/// Check parameter combinations before compiling.
///
/// Checks run in a fixed order and stop at the first failure: grammar
/// before membership for each reference parameter, then the time range,
/// then the aggregate tokens, and finally the function/column pairing.
/// Empty values count as absent.
pub async fn verify_parameters(
    params: &QueryParams,
    reference: &ReferenceData,
    config: &CompilerConfig,
) -> Result<(), Rejection> {
    let result = verify(params, reference, config).await;
    if let Err(rejection) = &result {
        debug!(status = rejection.status(), reason = %rejection, "rejected parameters");
    }
    result
}

async fn verify(
    params: &QueryParams,
    reference: &ReferenceData,
    config: &CompilerConfig,
) -> Result<(), Rejection> {
    if let Some(name) = params.get_non_empty("collection_name") {
        if parse_collection_name(Some(name)).is_none() {
            return Err(Rejection::InvalidCollectionName(name.to_string()));
        }
        if !reference.contains(ReferenceKind::CollectionNames, name).await {
            return Err(Rejection::CollectionNotFound(name.to_string()));
        }
    }

    if let Some(code) = params.get_non_empty("listing_price_symcode") {
        if parse_symbol_code(Some(code)).is_none() {
            return Err(Rejection::InvalidSymbolCode(code.to_string()));
        }
        if !reference.contains(ReferenceKind::SymbolCodes, code).await {
            return Err(Rejection::SymbolCodeNotFound(code.to_string()));
        }
    }

    if let Some(chain) = params.get_non_empty("chain") {
        if parse_chain(Some(chain)).is_none() {
            return Err(Rejection::InvalidChain(chain.to_string()));
        }
        if !reference.contains(ReferenceKind::Chains, chain).await {
            return Err(Rejection::ChainNotFound(chain.to_string()));
        }
    }

    if let Some(range) = params.get_non_empty("range") {
        if parse_time_range(Some(range), config.default_time_range).is_none() {
            return Err(Rejection::InvalidTimeRange(range.to_string()));
        }
    }

    let raw_function = params.get_non_empty("aggregate_function");
    if let Some(function) = raw_function {
        if function.parse::<AggregateFunction>().is_err() {
            return Err(Rejection::InvalidAggregateFunction(function.to_string()));
        }
    }

    let raw_column = params.get_non_empty("aggregate_column");
    if let Some(column) = raw_column {
        if column.parse::<AggregateColumn>().is_err() {
            return Err(Rejection::InvalidAggregateColumn(column.to_string()));
        }
    }

    // only meaningful once an aggregate was asked for
    if raw_function.is_some() || raw_column.is_some() {
        let function = parse_aggregate_function(raw_function, config.default_aggregate_function);
        let column = parse_aggregate_column(raw_column, config.default_aggregate_column);
        check_aggregate_pair(function, column)?;
    }

    Ok(())
}

/// Identifier columns may only be counted
pub(crate) fn check_aggregate_pair(
    function: AggregateFunction,
    column: AggregateColumn,
) -> Result<(), Rejection> {
    if function != AggregateFunction::Count && column.is_identifier() {
        return Err(Rejection::IllegalAggregate {
            function: function.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}
