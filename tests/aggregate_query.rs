//! Integration tests for point and history aggregate queries

mod common;

use common::{load_config, params, MIDNIGHT, NOW};
use salequery::{
    compile_aggregate_query, AggregateColumn, AggregateMode, CompilerConfig, FixedClock, QueryParams,
    Rejection, Value,
};

const SALES_BLOCKS: &str = "Sales AS s JOIN blocks ON blocks.block_id = s.block_id";
const COMPUTED_SALES_BLOCKS: &str =
    "(SELECT *, length(asset_ids) AS total_asset_ids FROM Sales) AS s JOIN blocks ON blocks.block_id = s.block_id";
const HISTORY_SELECT: &str =
    "SELECT chain, listing_price_symcode AS symbol_code, toUnixTimestamp(toStartOfDay(blocks.timestamp)) AS timestamp";
const HISTORY_TAIL: &str = "GROUP BY chain, symbol_code, timestamp ORDER BY timestamp ASC";

fn point(params: &QueryParams) -> Result<String, Rejection> {
    compile_aggregate_query(params, AggregateMode::Point, &CompilerConfig::default(), &FixedClock(NOW))
        .map(|q| q.into_sql())
}

fn history(params: &QueryParams) -> Result<String, Rejection> {
    compile_aggregate_query(params, AggregateMode::History, &CompilerConfig::default(), &FixedClock(NOW))
        .map(|q| q.into_sql())
}

// ---------------------------------------------------------------------------
// Point aggregates
// ---------------------------------------------------------------------------

#[test]
fn test_count_without_column() {
    let sql = point(&params(&[("aggregate_function", "count"), ("collection_name", "pomelo")])).unwrap();
    assert_eq!(
        sql,
        format!("SELECT count() FROM {} WHERE (collection_name == 'pomelo')", SALES_BLOCKS)
    );
    assert_eq!(point(&QueryParams::new()).unwrap(), format!("SELECT count() FROM {}", SALES_BLOCKS));
}

#[test]
fn test_count_with_column() {
    let sql = point(&params(&[("aggregate_function", "count"), ("aggregate_column", "sale_id")])).unwrap();
    assert_eq!(sql, format!("SELECT count(sale_id) FROM {}", SALES_BLOCKS));
}

#[test]
fn test_function_on_stored_column() {
    let sql = point(&params(&[
        ("aggregate_function", "max"),
        ("aggregate_column", "listing_price_amount"),
    ]))
    .unwrap();
    assert_eq!(sql, format!("SELECT max(listing_price_amount) FROM {}", SALES_BLOCKS));

    let sql = point(&params(&[
        ("aggregate_function", "median"),
        ("aggregate_column", "listing_price_value"),
        ("chain", "wax"),
        ("listing_price_symcode", "WAX"),
    ]))
    .unwrap();
    assert_eq!(
        sql,
        format!(
            "SELECT median(listing_price_value) FROM {} WHERE (chain == 'wax' AND listing_price_symcode == 'WAX')",
            SALES_BLOCKS
        )
    );
}

#[test]
fn test_computed_column_uses_subquery() {
    let compiled = compile_aggregate_query(
        &params(&[("aggregate_function", "max"), ("aggregate_column", "total_asset_ids")]),
        AggregateMode::Point,
        &CompilerConfig::default(),
        &FixedClock(NOW),
    )
    .unwrap();

    assert_eq!(compiled.sql(), format!("SELECT max(total_asset_ids) FROM {}", COMPUTED_SALES_BLOCKS));
    assert!(compiled.uses_subquery());
    assert_eq!(compiled.columns(), &["max(total_asset_ids)".to_string()]);

    let sql = point(&params(&[("aggregate_function", "count"), ("aggregate_column", "total_asset_ids")])).unwrap();
    assert_eq!(sql, format!("SELECT count(total_asset_ids) FROM {}", COMPUTED_SALES_BLOCKS));
}

#[test]
fn test_stored_columns_do_not_use_subquery() {
    let compiled = compile_aggregate_query(
        &params(&[("aggregate_function", "sum"), ("aggregate_column", "listing_price_value")]),
        AggregateMode::Point,
        &CompilerConfig::default(),
        &FixedClock(NOW),
    )
    .unwrap();
    assert!(!compiled.uses_subquery());
}

#[test]
fn test_point_filters() {
    let sql = point(&params(&[
        ("aggregate_function", "sum"),
        ("aggregate_column", "listing_price_amount"),
        ("greater_by_timestamp", "2023-01-01"),
        ("asset_id_in_asset_ids", "2199024044581"),
        ("collection_name", "pomelo"),
        ("range", "7d"),
    ]))
    .unwrap();
    assert_eq!(
        sql,
        format!(
            "SELECT sum(listing_price_amount) FROM {} WHERE (toUnixTimestamp(timestamp) > 1672531200 \
AND has(asset_ids, 2199024044581) AND collection_name == 'pomelo')",
            SALES_BLOCKS
        )
    );
}

#[test]
fn test_non_count_on_identifier_is_rejected() {
    let err = point(&params(&[("aggregate_function", "sum"), ("aggregate_column", "sale_id")])).unwrap_err();
    assert!(matches!(err, Rejection::IllegalAggregate { .. }));
    assert_eq!(err.status(), 400);
    assert_eq!(err.to_string(), "Invalid aggregate column: sale_id for aggregate function: sum");

    // the default column is sale_id too
    let err = point(&params(&[("aggregate_function", "avg")])).unwrap_err();
    assert!(matches!(err, Rejection::IllegalAggregate { .. }));
}

#[test]
fn test_configured_default_column() {
    let config = CompilerConfig {
        default_aggregate_column: AggregateColumn::ListingPriceValue,
        ..CompilerConfig::default()
    };
    let compiled = compile_aggregate_query(
        &params(&[("aggregate_function", "sum")]),
        AggregateMode::Point,
        &config,
        &FixedClock(NOW),
    )
    .unwrap();
    assert_eq!(compiled.sql(), format!("SELECT sum(listing_price_value) FROM {}", SALES_BLOCKS));
}

#[test]
fn test_unknown_tokens_are_rejected() {
    let err = point(&params(&[("aggregate_function", "mode")])).unwrap_err();
    assert!(matches!(err, Rejection::InvalidAggregateFunction(ref f) if f == "mode"));

    let err = point(&params(&[("aggregate_column", "asset_ids")])).unwrap_err();
    assert!(matches!(err, Rejection::InvalidAggregateColumn(ref c) if c == "asset_ids"));
}

#[test]
fn test_malformed_timestamp_in_aggregate() {
    let err = point(&params(&[("less_by_timestamp", "123456789")])).unwrap_err();
    assert!(matches!(err, Rejection::InvalidTimestamp(_)));
}

// ---------------------------------------------------------------------------
// History aggregates
// ---------------------------------------------------------------------------

#[test]
fn test_history_default_range_is_last_24_hours() {
    let sql = history(&QueryParams::new()).unwrap();
    assert_eq!(
        sql,
        format!(
            "{}, count() AS value FROM {} WHERE (toUnixTimestamp(blocks.timestamp) BETWEEN {} AND {}) {}",
            HISTORY_SELECT,
            SALES_BLOCKS,
            NOW - 86_400,
            NOW,
            HISTORY_TAIL
        )
    );
}

#[test]
fn test_history_day_ranges_end_at_midnight() {
    let sql = history(&params(&[
        ("aggregate_function", "sum"),
        ("aggregate_column", "listing_price_amount"),
        ("collection_name", "pomelo"),
        ("range", "30d"),
    ]))
    .unwrap();
    assert_eq!(
        sql,
        format!(
            "{}, sum(listing_price_amount) AS value FROM {} WHERE (collection_name == 'pomelo' \
AND toUnixTimestamp(blocks.timestamp) BETWEEN 1684195200 AND {}) {}",
            HISTORY_SELECT, SALES_BLOCKS, MIDNIGHT, HISTORY_TAIL
        )
    );

    let sql = history(&params(&[("range", "1y")])).unwrap();
    assert!(sql.contains(&format!("BETWEEN {} AND {}", MIDNIGHT - 365 * 86_400, MIDNIGHT)));
}

#[test]
fn test_history_all_has_no_window() {
    let sql = history(&params(&[("range", "all")])).unwrap();
    assert_eq!(
        sql,
        format!("{}, count() AS value FROM {} {}", HISTORY_SELECT, SALES_BLOCKS, HISTORY_TAIL)
    );
}

#[test]
fn test_history_ignores_timestamp_filters() {
    let sql = history(&params(&[
        ("range", "all"),
        ("timestamp", "2023-01-01"),
        ("less_by_timestamp", "2023-01-01"),
        ("less_by_block_number", "100"),
    ]))
    .unwrap();
    assert!(sql.contains("WHERE (block_number < 100)"));
    assert!(!sql.contains("toUnixTimestamp(timestamp)"));
}

#[test]
fn test_history_computed_column() {
    let compiled = compile_aggregate_query(
        &params(&[("aggregate_function", "avg"), ("aggregate_column", "total_asset_ids"), ("range", "all")]),
        AggregateMode::History,
        &CompilerConfig::default(),
        &FixedClock(NOW),
    )
    .unwrap();
    assert_eq!(
        compiled.sql(),
        format!("{}, avg(total_asset_ids) AS value FROM {} {}", HISTORY_SELECT, COMPUTED_SALES_BLOCKS, HISTORY_TAIL)
    );
    assert_eq!(compiled.columns(), &["chain", "symbol_code", "timestamp", "value"]);
}

#[test]
fn test_history_rejects_unlisted_range() {
    let err = history(&params(&[("range", "12h")])).unwrap_err();
    assert!(matches!(err, Rejection::InvalidTimeRange(ref r) if r == "12h"));
}

#[test]
fn test_history_default_range_from_config() {
    let config = load_config("compiler.yaml");
    let compiled =
        compile_aggregate_query(&QueryParams::new(), AggregateMode::History, &config, &FixedClock(NOW)).unwrap();
    assert!(compiled
        .sql()
        .contains(&format!("BETWEEN {} AND {}", MIDNIGHT - 7 * 86_400, MIDNIGHT)));
}

#[test]
fn test_history_window_follows_the_clock() {
    let later = compile_aggregate_query(
        &QueryParams::new(),
        AggregateMode::History,
        &CompilerConfig::default(),
        &FixedClock(NOW + 60),
    )
    .unwrap();
    assert!(later.sql().contains(&format!("BETWEEN {} AND {}", NOW + 60 - 86_400, NOW + 60)));
}

#[test]
fn test_history_bound_values() {
    let config = CompilerConfig::default().with_bound_values();
    let compiled = compile_aggregate_query(
        &params(&[("chain", "eos"), ("range", "7d")]),
        AggregateMode::History,
        &config,
        &FixedClock(NOW),
    )
    .unwrap();
    assert!(compiled.sql().contains(
        "WHERE (chain == {p0:String} AND toUnixTimestamp(blocks.timestamp) BETWEEN {p1:Int64} AND {p2:Int64})"
    ));
    let values: Vec<Value> = compiled.params().iter().map(|p| p.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            Value::Str("eos".to_string()),
            Value::Int(MIDNIGHT - 7 * 86_400),
            Value::Int(MIDNIGHT),
        ]
    );
}
