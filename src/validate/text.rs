//! Identifier, code and hash grammars

use std::sync::LazyLock;

use regex::Regex;

static COLLECTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z1-5.]{1,13}$").expect("valid regex"));
static CHAIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid regex"));
static SYMBOL_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{1,7}$").expect("valid regex"));
static TRANSACTION_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0x)?[a-fA-F0-9]+$").expect("valid regex"));

fn matching<'a>(raw: Option<&'a str>, grammar: &Regex) -> Option<&'a str> {
    raw.filter(|value| grammar.is_match(value))
}

/// Collection names use the EOSIO name alphabet (`a-z`, `1-5`, `.`), up to 13 characters
pub fn parse_collection_name(raw: Option<&str>) -> Option<&str> {
    matching(raw, &COLLECTION_NAME)
}

pub fn parse_chain(raw: Option<&str>) -> Option<&str> {
    matching(raw, &CHAIN)
}

/// Currency symbol codes: 1 to 7 uppercase letters
pub fn parse_symbol_code(raw: Option<&str>) -> Option<&str> {
    matching(raw, &SYMBOL_CODE)
}

/// Hex transaction hash; a leading `0x` is stripped
pub fn parse_transaction_hash(raw: Option<&str>) -> Option<&str> {
    matching(raw, &TRANSACTION_HASH).map(|hash| hash.strip_prefix("0x").unwrap_or(hash))
}
