//! Memoized reference sets

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::source::{ReferenceKind, ReferenceSource};

type Slot = Arc<OnceCell<Arc<HashSet<String>>>>;

/// Lazily populated cache of the reference sets.
///
/// The first lookup of a kind fetches it; lookups that arrive while that
/// fetch is in flight wait for it instead of issuing their own. A failed
/// fetch is cached as an empty set, so every membership check fails until
/// the kind is invalidated.
pub struct ReferenceData {
    source: Arc<dyn ReferenceSource>,
    collection_names: RwLock<Slot>,
    symbol_codes: RwLock<Slot>,
    chains: RwLock<Slot>,
}

impl ReferenceData {
    pub fn new(source: Arc<dyn ReferenceSource>) -> Self {
        Self {
            source,
            collection_names: RwLock::default(),
            symbol_codes: RwLock::default(),
            chains: RwLock::default(),
        }
    }

    fn slot(&self, kind: ReferenceKind) -> &RwLock<Slot> {
        match kind {
            ReferenceKind::CollectionNames => &self.collection_names,
            ReferenceKind::SymbolCodes => &self.symbol_codes,
            ReferenceKind::Chains => &self.chains,
        }
    }

    /// The set for `kind`, fetching it on first use
    pub async fn get(&self, kind: ReferenceKind) -> Arc<HashSet<String>> {
        // clone the cell out so the lock is not held across the fetch
        let cell = self.slot(kind).read().clone();
        let set = cell
            .get_or_init(|| async {
                match self.source.fetch(kind).await {
                    Ok(values) => {
                        let set: HashSet<String> = values.into_iter().collect();
                        info!(kind = %kind, count = set.len(), "loaded reference data");
                        Arc::new(set)
                    }
                    Err(e) => {
                        warn!(kind = %kind, error = %e, "reference data unavailable, treating as empty");
                        Arc::new(HashSet::new())
                    }
                }
            })
            .await;
        Arc::clone(set)
    }

    pub async fn known_collection_names(&self) -> Arc<HashSet<String>> {
        self.get(ReferenceKind::CollectionNames).await
    }

    pub async fn known_symbol_codes(&self) -> Arc<HashSet<String>> {
        self.get(ReferenceKind::SymbolCodes).await
    }

    pub async fn known_chains(&self) -> Arc<HashSet<String>> {
        self.get(ReferenceKind::Chains).await
    }

    pub async fn contains(&self, kind: ReferenceKind, value: &str) -> bool {
        self.get(kind).await.contains(value)
    }

    /// Drop the cached set for `kind`; the next lookup fetches again.
    /// Lookups already waiting on the old fetch still receive its result.
    pub fn invalidate(&self, kind: ReferenceKind) {
        *self.slot(kind).write() = Slot::default();
    }

    pub fn invalidate_all(&self) {
        for kind in ReferenceKind::ALL {
            self.invalidate(kind);
        }
    }

    /// True when `kind` has been fetched (successfully or not)
    pub fn is_loaded(&self, kind: ReferenceKind) -> bool {
        self.slot(kind).read().initialized()
    }
}

impl std::fmt::Debug for ReferenceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceData")
            .field("collection_names", &self.is_loaded(ReferenceKind::CollectionNames))
            .field("symbol_codes", &self.is_loaded(ReferenceKind::SymbolCodes))
            .field("chains", &self.is_loaded(ReferenceKind::Chains))
            .finish()
    }
}
