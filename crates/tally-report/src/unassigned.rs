//! Unassigned-asset classification across inventory collections.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use tally_core::{sanitize_document, CollectionFilter, Result, SanitizePolicy};
use tally_store::{CollectionRegistry, DocumentStore, RecordFilter};

/// Finds every record with no assignment target.
///
/// Scans all collections whose name contains the inventory marker — a looser
/// net than the canonical allow-list, on purpose: legacy and ad-hoc
/// collections created by bulk ingestion surface here too. A record
/// qualifies when its assignment field is null, empty, or absent.
///
/// The full result set is returned in one response, unpaginated. Acceptable
/// at current inventory sizes (hundreds to low-thousands of records per
/// collection); this is the first thing to revisit if volumes grow.
#[derive(Clone)]
pub struct AssignmentClassifier {
    store: Arc<dyn DocumentStore>,
    registry: CollectionRegistry,
}

impl AssignmentClassifier {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let registry = CollectionRegistry::new(store.clone());
        Self { store, registry }
    }

    /// Flattened union of unassigned records across all marked collections,
    /// sanitized with the null-for-any convention.
    pub async fn collect(&self) -> Result<Vec<JsonValue>> {
        let collections = self.registry.list(CollectionFilter::Marked).await?;

        let mut unassigned = Vec::new();
        for collection in &collections {
            let docs = self
                .store
                .find(collection, &RecordFilter::Unassigned, 0, None)
                .await?;
            unassigned.extend(
                docs.iter()
                    .map(|d| JsonValue::Object(sanitize_document(d, SanitizePolicy::NullForAny))),
            );
        }

        debug!(
            collection_count = collections.len(),
            result_count = unassigned.len(),
            "unassigned assets collected"
        );
        Ok(unassigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tally_core::{document_from_json, Document, FieldValue};
    use tally_store::MemoryStore;

    fn doc(v: serde_json::Value) -> Document {
        document_from_json(v).unwrap()
    }

    #[tokio::test]
    async fn test_collects_null_empty_and_absent_assignments() {
        let store = MemoryStore::new();
        store
            .insert_many(
                "Inventory_Laptop",
                vec![
                    doc(json!({"Material Name": "A", "Issued to": "Bob"})),
                    doc(json!({"Material Name": "B", "Issued to": ""})),
                    doc(json!({"Material Name": "C", "Issued to": null})),
                    doc(json!({"Material Name": "D"})),
                ],
            )
            .await
            .unwrap();

        let classifier = AssignmentClassifier::new(Arc::new(store));
        let unassigned = classifier.collect().await.unwrap();

        let names: Vec<&str> = unassigned
            .iter()
            .map(|a| a["Material Name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_legacy_marked_collections_are_scanned() {
        let store = MemoryStore::new();
        store
            .insert_one("Legacy_Inventory_2019", doc(json!({"Material Name": "old desk"})))
            .await
            .unwrap();
        store
            .insert_one("messages", doc(json!({"subject": "not an asset"})))
            .await
            .unwrap();

        let classifier = AssignmentClassifier::new(Arc::new(store));
        let unassigned = classifier.collect().await.unwrap();

        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0]["Material Name"], json!("old desk"));
    }

    #[tokio::test]
    async fn test_output_uses_null_for_any_and_strips_id() {
        let store = MemoryStore::new();
        let mut d = Document::new();
        d.insert("Issued to".to_string(), FieldValue::from(""));
        d.insert("Total Price".to_string(), FieldValue::Number(f64::INFINITY));
        d.insert("Remarks".to_string(), FieldValue::Null);
        store.insert_one("Inventory_Others", d).await.unwrap();

        let classifier = AssignmentClassifier::new(Arc::new(store));
        let unassigned = classifier.collect().await.unwrap();

        let asset = unassigned[0].as_object().unwrap();
        assert!(!asset.contains_key(tally_store::INTERNAL_ID_FIELD));
        assert_eq!(asset["Total Price"], json!(null));
        assert_eq!(asset["Remarks"], json!(null));
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_list_not_error() {
        let classifier = AssignmentClassifier::new(Arc::new(MemoryStore::new()));
        assert!(classifier.collect().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_logging_uses_schema_field_names() {
        use std::sync::Mutex;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Capture(std::sync::Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Capture {
            type Writer = Capture;
            fn make_writer(&'a self) -> Capture {
                self.clone()
            }
        }

        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();

        let store = MemoryStore::new();
        store
            .insert_one("Inventory_Laptop", doc(json!({"Issued to": ""})))
            .await
            .unwrap();
        let classifier = AssignmentClassifier::new(Arc::new(store));

        {
            let _guard = tracing::subscriber::set_default(subscriber);
            classifier.collect().await.unwrap();
        }

        // The emitted field names are the documented logging schema.
        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains(tally_core::logging::COLLECTION_COUNT));
        assert!(logs.contains(tally_core::logging::RESULT_COUNT));
    }
}
