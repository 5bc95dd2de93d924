use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use super::error::ReferenceError;

/// Kind of reference set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    CollectionNames,
    SymbolCodes,
    Chains,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::CollectionNames,
        ReferenceKind::SymbolCodes,
        ReferenceKind::Chains,
    ];

    /// Statement that enumerates the set in the sales store
    pub fn query(&self) -> &'static str {
        match self {
            ReferenceKind::CollectionNames => "SELECT DISTINCT collection_name FROM Sales",
            ReferenceKind::SymbolCodes => "SELECT DISTINCT listing_price_symcode FROM Sales",
            ReferenceKind::Chains => "SELECT DISTINCT chain FROM Sales",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::CollectionNames => "collection names",
            ReferenceKind::SymbolCodes => "symbol codes",
            ReferenceKind::Chains => "chains",
        };
        f.write_str(name)
    }
}

/// Where reference sets come from, typically the analytical store itself
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self, kind: ReferenceKind) -> Result<Vec<String>, ReferenceError>;
}

/// A source serving fixed lists
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    sets: HashMap<ReferenceKind, Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, S>(mut self, kind: ReferenceKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets.insert(kind, values.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl ReferenceSource for StaticSource {
    async fn fetch(&self, kind: ReferenceKind) -> Result<Vec<String>, ReferenceError> {
        Ok(self.sets.get(&kind).cloned().unwrap_or_default())
    }
}
