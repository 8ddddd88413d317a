//! Cross-collection paginated asset listing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use tally_core::{sanitize_document, CollectionFilter, Error, Result, SanitizePolicy};
use tally_store::{CollectionRegistry, DocumentStore, RecordFilter};

/// Scope value selecting every discovered inventory collection.
pub const SCOPE_ALL: &str = "all";

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 500;

/// Listing request. `page` and `limit` default like the HTTP query does.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// `"all"` or one discovered inventory collection name.
    #[serde(default = "default_scope")]
    pub collection: String,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

fn default_scope() -> String {
    SCOPE_ALL.to_string()
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: default_page(),
            limit: default_limit(),
            collection: default_scope(),
        }
    }
}

/// One page of sanitized asset records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPage {
    pub assets: Vec<JsonValue>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_assets: u64,
}

/// Pages asset records across the discovered inventory collections.
///
/// Skip/limit are applied to each scoped collection in enumeration order,
/// accumulating until the page is full — NOT as a single global cursor.
/// When the scope spans several collections, a page boundary that crosses a
/// collection boundary can undercount, and catalog changes between calls can
/// shift where page N+1 starts. This is a documented approximation carried
/// over from the data contract; making the cursor precise would change
/// observable pagination behavior for existing clients.
#[derive(Clone)]
pub struct PaginatedAssetFetcher {
    store: Arc<dyn DocumentStore>,
    registry: CollectionRegistry,
}

impl PaginatedAssetFetcher {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let registry = CollectionRegistry::new(store.clone());
        Self { store, registry }
    }

    /// Fetch one page. Validation failures surface before any store call.
    pub async fn fetch(&self, req: &PageRequest) -> Result<AssetPage> {
        if req.page < 1 {
            return Err(Error::InvalidInput("page must be >= 1".to_string()));
        }
        if req.limit < 1 || req.limit > MAX_LIMIT {
            return Err(Error::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        let discovered = self.registry.list(CollectionFilter::Marked).await?;
        let scoped: Vec<String> = if req.collection == SCOPE_ALL {
            discovered
        } else if discovered.contains(&req.collection) {
            vec![req.collection.clone()]
        } else {
            return Err(Error::InvalidInput(format!(
                "invalid collection name: {}",
                req.collection
            )));
        };

        // Counting is a separate pass from the listing fetch; a write landing
        // in between shows up in one but not the other. Accepted read skew.
        let mut total_assets = 0u64;
        for collection in &scoped {
            total_assets += self
                .store
                .count_documents(collection, &RecordFilter::All)
                .await?;
        }

        // `page` is unbounded; a huge page means "past the end", never a
        // panic or a wrapped-around skip.
        let skip = (req.page - 1).saturating_mul(req.limit);
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);

        let mut assets: Vec<JsonValue> = Vec::new();
        for collection in &scoped {
            let docs = self
                .store
                .find(collection, &RecordFilter::All, skip, Some(req.limit as usize))
                .await?;
            assets.extend(docs.iter().map(|d| {
                JsonValue::Object(sanitize_document(d, SanitizePolicy::ZeroWithPlaceholder))
            }));

            if assets.len() as u64 >= req.limit {
                break;
            }
        }

        let total_pages = std::cmp::max(1, total_assets.div_ceil(req.limit));

        debug!(
            page = req.page,
            limit = req.limit,
            scope = %req.collection,
            total_assets,
            result_count = assets.len(),
            "asset page fetched"
        );

        Ok(AssetPage {
            assets,
            total_pages,
            current_page: req.page,
            total_assets,
        })
    }
}
