//! Collection discovery against the live store catalog.

use std::sync::Arc;

use tracing::trace;

use tally_core::{CollectionFilter, Result};

use crate::store::DocumentStore;

/// Enumerates stored collections scoped by a [`CollectionFilter`].
///
/// The catalog is re-read from the store on every call. Enumeration and any
/// subsequent per-collection reads are separate round-trips, so a collection
/// created in between can be missed or half-counted; that race is benign for
/// these read-only reports and is accepted rather than locked away.
#[derive(Clone)]
pub struct CollectionRegistry {
    store: Arc<dyn DocumentStore>,
}

impl CollectionRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Collection names currently in the store that fall inside `filter`,
    /// in the store's enumeration order.
    pub async fn list(&self, filter: CollectionFilter) -> Result<Vec<String>> {
        let names = self.store.list_collection_names().await?;
        let scoped: Vec<String> = names.into_iter().filter(|n| filter.matches(n)).collect();
        trace!(collection_count = scoped.len(), ?filter, "catalog enumerated");
        Ok(scoped)
    }
}
