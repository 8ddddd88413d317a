//! Per-employee asset index across every stored collection.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::debug;

use tally_core::record::{
    assignment_value, AssigneeKey, FIELD_ISSUE_DATE, FIELD_MATERIAL_NAME, FIELD_REMARKS,
    FIELD_STOCK_ENTRY,
};
use tally_core::{sanitize, CollectionFilter, Error, FieldValue, Result, SanitizePolicy};
use tally_store::{CollectionRegistry, DocumentStore, RecordFilter};

/// Fields projected into each per-employee asset summary, besides the
/// collection name.
const SUMMARY_FIELDS: [&str; 4] = [
    FIELD_STOCK_ENTRY,
    FIELD_ISSUE_DATE,
    FIELD_MATERIAL_NAME,
    FIELD_REMARKS,
];

/// Display name -> asset summaries, in first-seen order.
pub type EmployeeIndex = IndexMap<String, Vec<JsonValue>>;

/// Groups assigned-asset summaries by free-text assignee name.
///
/// Scans every stored collection, not just inventory-marked ones: any
/// collection might contain assignable items. Grouping is by normalized
/// [`AssigneeKey`] (trimmed, case-folded) so `" Bob "` and `"bob"` land in
/// one group; the first-seen raw spelling becomes the display key. The match
/// stays a string comparison end to end — there is no employee identifier in
/// the data to join on.
#[derive(Clone)]
pub struct EmployeeAssetIndexer {
    store: Arc<dyn DocumentStore>,
    registry: CollectionRegistry,
}

impl EmployeeAssetIndexer {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let registry = CollectionRegistry::new(store.clone());
        Self { store, registry }
    }

    /// Build the index. Zero qualifying records across the entire store is
    /// a NotFound condition, not an empty mapping: this report's clients
    /// treat an empty index as an error state.
    pub async fn index(&self) -> Result<EmployeeIndex> {
        let collections = self.registry.list(CollectionFilter::All).await?;

        let mut groups: IndexMap<AssigneeKey, (String, Vec<JsonValue>)> = IndexMap::new();
        for collection in &collections {
            let docs = self
                .store
                .find(collection, &RecordFilter::Assigned, 0, None)
                .await?;
            for doc in docs {
                let Some(raw) = assignment_value(&doc).and_then(display_name) else {
                    continue;
                };
                let key = AssigneeKey::new(&raw);
                let summary = summarize(collection, &doc);
                groups
                    .entry(key)
                    .or_insert_with(|| (raw, Vec::new()))
                    .1
                    .push(summary);
            }
        }

        if groups.is_empty() {
            return Err(Error::NotFound(
                "no employees with assigned assets found".to_string(),
            ));
        }

        debug!(result_count = groups.len(), "employee index built");
        Ok(groups.into_values().collect())
    }
}

/// Render an assignment value as a display string. Non-scalar assignment
/// values are ignored.
fn display_name(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::String(s) => Some(s.clone()),
        FieldValue::Number(n) if n.is_finite() => Some(n.to_string()),
        FieldValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reduced projection of an assigned record, sanitized with the
/// null-for-any convention. Missing projected fields surface as null.
fn summarize(collection: &str, doc: &tally_core::Document) -> JsonValue {
    let mut summary = serde_json::Map::new();
    summary.insert("collection".to_string(), JsonValue::String(collection.to_string()));
    for field in SUMMARY_FIELDS {
        let value = doc
            .get(field)
            .map(|v| sanitize(v, SanitizePolicy::NullForAny))
            .unwrap_or(JsonValue::Null);
        summary.insert(field.to_string(), value);
    }
    JsonValue::Object(summary)
}
