//! Query compilation
//!
//! Builds the record and aggregate statements from raw parameters and
//! hands them to the emitter.

use tracing::debug;

use crate::clock::Clock;
use crate::config::CompilerConfig;
use crate::emitter::{emit_sql, CompiledQuery, EmitMode};
use crate::plan::{ArrayJoin, Column, Expr, JoinCondition, OrderBy, Predicate, SelectItem, Source, Statement, Value};
use crate::query::{AggregateColumn, AggregateFunction, AggregateMode, QueryParams, SortDirection};
use crate::validate::{parse_aggregate_column, parse_aggregate_function, parse_limit, parse_sort_direction, parse_time_range};
use crate::verifier::{check_aggregate_pair, Rejection};
use super::filter::{assemble_filters, FilterScope};
use super::window::time_window;

const SALES_TABLE: &str = "Sales";
const ASSETS_TABLE: &str = "Assets";
const BLOCKS_TABLE: &str = "blocks";
const SALE_ALIAS: &str = "s";
const ASSET_ALIAS: &str = "a";

/// Sale columns returned by the record query, up to `collection_name`
const RECORD_HEAD: [&str; 7] = [
    "sale_id",
    "trx_id",
    "asset_ids",
    "listing_price_amount",
    "listing_price_precision",
    "listing_price_symcode",
    "listing_price_value",
];
/// Columns returned after `collection_name`
const RECORD_TAIL: [&str; 4] = ["template_id", "block_number", "timestamp", "chain"];

const HISTORY_GROUP_BY: [&str; 3] = ["chain", "symbol_code", "timestamp"];

/// Compile a filtered, sorted and paginated sales listing.
///
/// Sales are exploded to one row per asset and joined with asset and
/// block data. Always ends in `ORDER BY sale_id <dir> LIMIT <n>`.
pub fn compile_record_query(params: &QueryParams, config: &CompilerConfig) -> Result<CompiledQuery, Rejection> {
    let mut statement = Statement::new(record_projection(), exploded_sales());
    statement.filter = assemble_filters(params, FilterScope::Records)?;
    statement.order_by = Some(OrderBy {
        column: "sale_id".to_string(),
        direction: parse_sort_direction(params.get("sort_by"), config.default_sort_direction),
    });
    statement.limit = Some(parse_limit(params.get("limit"), config.max_limit));

    finish(&statement, config, "record")
}

/// Compile an aggregate over matching sales.
///
/// `Point` yields a single value. `History` groups by chain, currency and
/// day over the window selected by `range`, using `clock` for the current
/// time.
pub fn compile_aggregate_query(
    params: &QueryParams,
    mode: AggregateMode,
    config: &CompilerConfig,
    clock: &dyn Clock,
) -> Result<CompiledQuery, Rejection> {
    let (function, column, column_given) = resolve_aggregate(params, config)?;
    let aggregate = aggregate_expr(function, column, column_given);

    let statement = match mode {
        AggregateMode::Point => {
            let mut statement = Statement::new(vec![SelectItem::Expr(aggregate)], sales_source(column));
            statement.filter = assemble_filters(params, FilterScope::Aggregate)?;
            statement
        }
        AggregateMode::History => {
            let raw_range = params.get("range");
            let range = parse_time_range(raw_range, config.default_time_range)
                .ok_or_else(|| Rejection::InvalidTimeRange(raw_range.unwrap_or_default().to_string()))?;

            let day = Expr::call("toUnixTimestamp", Expr::call("toStartOfDay", Expr::Column(block_timestamp())));
            let select = vec![
                SelectItem::column("chain"),
                SelectItem::aliased(Expr::column("listing_price_symcode"), "symbol_code"),
                SelectItem::aliased(day, "timestamp"),
                SelectItem::aliased(aggregate, "value"),
            ];
            let mut statement = Statement::new(select, sales_source(column));
            statement.filter = assemble_filters(params, FilterScope::History)?;
            if let Some((low, high)) = time_window(range, clock.now()) {
                statement.filter.push(Predicate::TimeWindow {
                    column: block_timestamp(),
                    low: Value::Int(low),
                    high: Value::Int(high),
                });
            }
            statement.group_by = HISTORY_GROUP_BY.iter().map(|c| c.to_string()).collect();
            statement.order_by = Some(OrderBy {
                column: "timestamp".to_string(),
                direction: SortDirection::Asc,
            });
            statement
        }
    };

    finish(&statement, config, mode.as_str())
}

fn finish(statement: &Statement, config: &CompilerConfig, mode: &str) -> Result<CompiledQuery, Rejection> {
    let emit_mode = if config.bind_values { EmitMode::Bound } else { EmitMode::Inline };
    let compiled = emit_sql(statement, emit_mode)?;
    debug!(mode, sql = compiled.sql(), params = compiled.params().len(), "compiled query");
    Ok(compiled)
}

/// Resolve the aggregate function and column, and whether a column was
/// requested explicitly. Re-checks what the verifier checks so an
/// unverified request cannot produce an illegal aggregate.
fn resolve_aggregate(
    params: &QueryParams,
    config: &CompilerConfig,
) -> Result<(AggregateFunction, AggregateColumn, bool), Rejection> {
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

    let function = parse_aggregate_function(raw_function, config.default_aggregate_function);
    let column = parse_aggregate_column(raw_column, config.default_aggregate_column);
    check_aggregate_pair(function, column)?;
    Ok((function, column, raw_column.is_some()))
}

fn aggregate_expr(function: AggregateFunction, column: AggregateColumn, column_given: bool) -> Expr {
    let arg = if function == AggregateFunction::Count && !column_given && !column.is_computed() {
        None
    } else {
        Some(Column::unqualified(column.as_str()))
    };
    Expr::Aggregate {
        func: function.as_str(),
        arg,
    }
}

fn record_projection() -> Vec<SelectItem> {
    let mut items: Vec<SelectItem> = RECORD_HEAD.iter().map(|c| SelectItem::column(*c)).collect();
    items.push(SelectItem::aliased(
        Expr::Column(Column::new(SALE_ALIAS, "collection_name")),
        "collection_name",
    ));
    items.extend(RECORD_TAIL.iter().map(|c| SelectItem::column(*c)));
    items
}

fn block_timestamp() -> Column {
    Column::new(BLOCKS_TABLE, "timestamp")
}

fn join_blocks(sales: Source) -> Source {
    sales.join(
        Source::table(BLOCKS_TABLE),
        vec![JoinCondition::new(
            Column::new(BLOCKS_TABLE, "block_id"),
            Column::new(SALE_ALIAS, "block_id"),
        )],
    )
}

/// One row per (sale, asset), joined with the asset and its block
fn exploded_sales() -> Source {
    let mut exploded = Statement::new(vec![SelectItem::Wildcard], Source::table(SALES_TABLE));
    exploded.array_join = Some(ArrayJoin {
        column: "asset_ids".to_string(),
        alias: "asset_id".to_string(),
    });

    let with_assets = Source::subquery(exploded, SALE_ALIAS).join(
        Source::aliased_table(ASSETS_TABLE, ASSET_ALIAS),
        vec![
            JoinCondition::new(Column::new(ASSET_ALIAS, "asset_id"), Column::new(SALE_ALIAS, "asset_id")),
            JoinCondition::new(
                Column::new(ASSET_ALIAS, "collection_name"),
                Column::new(SALE_ALIAS, "collection_name"),
            ),
        ],
    );
    join_blocks(with_assets)
}

/// Sales joined with blocks; a computed column is projected by a subquery
fn sales_source(column: AggregateColumn) -> Source {
    let sales = if column.is_computed() {
        let computed = Statement::new(
            vec![
                SelectItem::Wildcard,
                SelectItem::aliased(Expr::call("length", Expr::column("asset_ids")), column.as_str()),
            ],
            Source::table(SALES_TABLE),
        );
        Source::subquery(computed, SALE_ALIAS)
    } else {
        Source::aliased_table(SALES_TABLE, SALE_ALIAS)
    };
    join_blocks(sales)
}
