//! Property tests for the validators and query compilation

mod common;

use common::{MIDNIGHT, NOW};
use proptest::prelude::*;
use salequery::validate::{
    parse_chain, parse_collection_name, parse_limit, parse_positive_float, parse_positive_int,
    parse_symbol_code, parse_timestamp, parse_transaction_hash,
};
use salequery::{
    assemble_filters, compile_aggregate_query, compile_record_query, AggregateMode, CompilerConfig,
    Field, FilterScope, FixedClock, Operator, Predicate, QueryParams,
};

const PARAM_NAMES: [&str; 16] = [
    "collection_name",
    "chain",
    "sale_id",
    "trx_id",
    "listing_price_symcode",
    "listing_price_value",
    "asset_id_in_asset_ids",
    "greater_by_block_number",
    "less_or_equals_by_listing_price_amount",
    "greater_or_equals_by_timestamp",
    "sort_by",
    "limit",
    "range",
    "aggregate_function",
    "aggregate_column",
    "timestamp",
];

fn arbitrary_params() -> impl Strategy<Value = QueryParams> {
    prop::collection::vec((prop::sample::select(PARAM_NAMES.to_vec()), "\\PC{0,16}"), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn range_params() -> impl Strategy<Value = QueryParams> {
    let names: Vec<(Operator, Field)> = Operator::RANGE
        .into_iter()
        .flat_map(|op| Field::RANGE.into_iter().map(move |f| (op, f)))
        .collect();
    prop::collection::vec(prop::sample::select(names), 0..10).prop_flat_map(|filters| {
        let values: Vec<BoxedStrategy<String>> = filters
            .iter()
            .map(|(_, field)| {
                if field.is_timestamp() {
                    (1_000_000_000i64..10_000_000_000).prop_map(|v| v.to_string()).boxed()
                } else {
                    (1u64..1_000_000).prop_map(|v| v.to_string()).boxed()
                }
            })
            .collect();
        values.prop_map(move |values| {
            filters
                .iter()
                .zip(values)
                .map(|((op, field), value)| (op.param_name(*field), value))
                .collect::<QueryParams>()
        })
    })
}

proptest! {
    #[test]
    fn prop_validators_are_total(raw in "\\PC*") {
        let _ = parse_positive_int(Some(&raw));
        let _ = parse_positive_float(Some(&raw));
        let _ = parse_timestamp(Some(&raw));
        if let Some(name) = parse_collection_name(Some(&raw)) {
            prop_assert!(name.len() <= 13);
            prop_assert!(name.bytes().all(|b| matches!(b, b'a'..=b'z' | b'1'..=b'5' | b'.')));
        }
        if let Some(code) = parse_symbol_code(Some(&raw)) {
            prop_assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
        }
        if let Some(chain) = parse_chain(Some(&raw)) {
            prop_assert!(chain.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
        if let Some(hash) = parse_transaction_hash(Some(&raw)) {
            prop_assert!(hash.bytes().all(|b| b.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn prop_limit_is_clamped(raw in "\\PC{0,24}", max in 1u64..10_000) {
        let limit = parse_limit(Some(&raw), max);
        prop_assert!(limit >= 1 && limit <= max);
    }

    #[test]
    fn prop_epoch_lengths(seconds in 1_000_000_000i64..10_000_000_000, millis in 0i64..1000) {
        prop_assert_eq!(parse_timestamp(Some(&seconds.to_string())).unwrap(), Some(seconds));
        let in_millis = seconds * 1000 + millis;
        prop_assert_eq!(parse_timestamp(Some(&in_millis.to_string())).unwrap(), Some(seconds));
    }

    #[test]
    fn prop_compilation_is_deterministic(request in arbitrary_params()) {
        let config = CompilerConfig::default();
        let first = compile_record_query(&request, &config).map(|q| q.into_sql()).map_err(|e| e.to_string());
        let second = compile_record_query(&request.clone(), &config).map(|q| q.into_sql()).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);

        let history = |r: &QueryParams| {
            compile_aggregate_query(r, AggregateMode::History, &config, &FixedClock(NOW))
                .map(|q| q.into_sql())
                .map_err(|e| e.to_string())
        };
        prop_assert_eq!(history(&request), history(&request.clone()));
    }

    #[test]
    fn prop_rejected_text_never_reaches_sql(value in "\\PC*'\\PC*") {
        let request = QueryParams::new()
            .with("collection_name", value.as_str())
            .with("chain", value.as_str())
            .with("listing_price_symcode", value.as_str())
            .with("trx_id", value.as_str());
        let sql = compile_record_query(&request, &CompilerConfig::default()).unwrap().into_sql();
        prop_assert!(!sql.contains('\''));
    }

    #[test]
    fn prop_range_filters_follow_operator_then_field_order(request in range_params()) {
        let predicates = assemble_filters(&request, FilterScope::Records).unwrap();
        let ranks: Vec<(usize, usize)> = predicates
            .iter()
            .map(|p| match p {
                Predicate::Compare { field, op, .. } => (
                    Operator::RANGE.iter().position(|o| o == op).unwrap_or(usize::MAX),
                    Field::RANGE.iter().position(|f| f == field).unwrap_or(usize::MAX),
                ),
                _ => (usize::MAX, usize::MAX),
            })
            .collect();
        prop_assert_eq!(predicates.len(), request.len());
        prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_history_window_ends_at_midnight_for_day_ranges(range in prop::sample::select(vec!["7d", "30d", "90d", "1y"])) {
        let request = QueryParams::new().with("range", range);
        let sql = compile_aggregate_query(&request, AggregateMode::History, &CompilerConfig::default(), &FixedClock(NOW))
            .unwrap()
            .into_sql();
        let expected = format!(" AND {})", MIDNIGHT);
        prop_assert!(sql.contains(&expected));
    }
}
