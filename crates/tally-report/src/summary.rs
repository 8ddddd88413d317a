//! Cross-collection summary statistics.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tally_core::{Result, CANONICAL_COLLECTIONS, STATUS_MAINTENANCE, STATUS_RETIRED};
use tally_core::record::FIELD_TOTAL_PRICE;
use tally_store::{DocumentStore, RecordFilter};

/// Inventory-wide counts and per-category spend.
///
/// `total_assets` is the sum of the four classification buckets, not an
/// independent document count. Assignment and `status` are independent
/// fields, so a record that is both assigned and `"Retired"` lands in two
/// buckets and inflates the total. That double-counting comes from the
/// upstream data contract and is reproduced here unchanged; reconciling it
/// would silently change every dashboard built on these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_assets: u64,
    pub available_assets: u64,
    pub assigned_assets: u64,
    pub assets_in_maintenance: u64,
    pub retired_assets: u64,
    /// Collection name -> that collection's (bucket-summed) total.
    pub category_summary: IndexMap<String, u64>,
    /// Collection name -> summed "Total Price"; never NaN or null.
    pub total_spent_summary: IndexMap<String, f64>,
}

impl SummaryReport {
    fn empty() -> Self {
        SummaryReport {
            total_assets: 0,
            available_assets: 0,
            assigned_assets: 0,
            assets_in_maintenance: 0,
            retired_assets: 0,
            category_summary: IndexMap::new(),
            total_spent_summary: IndexMap::new(),
        }
    }
}

/// Builds a [`SummaryReport`] over the canonical inventory collections.
///
/// The scope is the fixed five-category allow-list, not runtime discovery:
/// a canonical collection that does not exist yet still appears in the
/// per-category maps with zero counts.
#[derive(Clone)]
pub struct SummaryAggregator {
    store: Arc<dyn DocumentStore>,
}

impl SummaryAggregator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Aggregate all canonical collections into one report.
    ///
    /// Fail-fast: any store error aborts the whole report rather than
    /// returning partial numbers.
    pub async fn collect(&self) -> Result<SummaryReport> {
        let mut report = SummaryReport::empty();

        for collection in CANONICAL_COLLECTIONS {
            let assigned = self
                .store
                .count_documents(collection, &RecordFilter::Assigned)
                .await?;
            let available = self
                .store
                .count_documents(collection, &RecordFilter::AvailableEmpty)
                .await?;
            let maintenance = self
                .store
                .count_documents(collection, &RecordFilter::StatusEq(STATUS_MAINTENANCE.into()))
                .await?;
            let retired = self
                .store
                .count_documents(collection, &RecordFilter::StatusEq(STATUS_RETIRED.into()))
                .await?;

            // Bucket sum, not a document count; see SummaryReport docs.
            let collection_total = assigned + available + maintenance + retired;

            let spent = self.store.sum_field(collection, FIELD_TOTAL_PRICE).await?;
            let spent = if spent.is_finite() { spent } else { 0.0 };

            debug!(
                collection,
                assigned, available, maintenance, retired, spent, "collection summarized"
            );

            report.total_assets += collection_total;
            report.assigned_assets += assigned;
            report.available_assets += available;
            report.assets_in_maintenance += maintenance;
            report.retired_assets += retired;
            report
                .category_summary
                .insert(collection.to_string(), collection_total);
            report
                .total_spent_summary
                .insert(collection.to_string(), spent);
        }

        Ok(report)
    }
}
