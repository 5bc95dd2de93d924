//! Shared test utilities for integration tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use salequery::{
    parser, CompilerConfig, QueryParams, ReferenceData, ReferenceError, ReferenceKind,
    ReferenceSource, StaticSource,
};
use serde::Deserialize;

/// 2023-06-15T13:30:00Z
pub const NOW: i64 = 1686835800;
/// 2023-06-15T00:00:00Z
pub const MIDNIGHT: i64 = 1686787200;

/// Build parameters from name/value pairs
pub fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Load a compiler configuration from the tests/test_data directory
pub fn load_config(name: &str) -> CompilerConfig {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path).unwrap_or_else(|e| panic!("Failed to load config {}: {}", name, e))
}

#[derive(Debug, Deserialize)]
struct ReferenceFixture {
    collection_names: Vec<String>,
    symbol_codes: Vec<String>,
    chains: Vec<String>,
}

/// Reference data served from tests/test_data/reference.yaml
pub fn fixture_reference() -> ReferenceData {
    let contents = std::fs::read_to_string("tests/test_data/reference.yaml")
        .expect("reference fixture should exist");
    let fixture: ReferenceFixture = serde_yaml::from_str(&contents).expect("reference fixture should parse");
    let source = StaticSource::new()
        .with(ReferenceKind::CollectionNames, fixture.collection_names)
        .with(ReferenceKind::SymbolCodes, fixture.symbol_codes)
        .with(ReferenceKind::Chains, fixture.chains);
    ReferenceData::new(Arc::new(source))
}

/// A source that counts fetches and records the statements a store would
/// run, optionally failing or pausing before answering
pub struct CountingSource {
    fetches: AtomicUsize,
    statements: Mutex<Vec<&'static str>>,
    sets: HashMap<ReferenceKind, Vec<String>>,
    fail: bool,
    delay: Duration,
}

impl CountingSource {
    pub fn new(sets: &[(ReferenceKind, &[&str])]) -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            statements: Mutex::new(Vec::new()),
            sets: sets
                .iter()
                .map(|(kind, values)| (*kind, values.iter().map(|v| v.to_string()).collect()))
                .collect(),
            fail: false,
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Enumerating statements issued so far, in order
    pub fn statements(&self) -> Vec<&'static str> {
        self.statements.lock().clone()
    }
}

#[async_trait]
impl ReferenceSource for CountingSource {
    async fn fetch(&self, kind: ReferenceKind) -> Result<Vec<String>, ReferenceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.statements.lock().push(kind.query());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(ReferenceError::Fetch("connection refused".to_string()));
        }
        Ok(self.sets.get(&kind).cloned().unwrap_or_default())
    }
}
