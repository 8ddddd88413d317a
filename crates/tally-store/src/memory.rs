//! In-process `DocumentStore` backend.
//!
//! Used by tests and local runs. Collections live in a `BTreeMap`, so the
//! enumeration order is the collection names' lexicographic order, which
//! keeps pagination deterministic across calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use tally_core::{Document, FieldValue, Result};

use crate::store::{DocumentStore, RecordFilter, INTERNAL_ID_FIELD};

/// In-memory document store. Cheap to clone; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection from raw documents, assigning internal ids.
    /// Convenience for tests and fixtures.
    pub async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            ids.push(self.insert_one(collection, doc).await?);
        }
        Ok(ids)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let collections = self.collections.read().await;
        Ok(collections.keys().cloned().collect())
    }

    async fn count_documents(&self, collection: &str, filter: &RecordFilter) -> Result<u64> {
        let collections = self.collections.read().await;
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        Ok(docs.iter().filter(|d| filter.matches(d)).count() as u64)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &RecordFilter,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        let matches = docs
            .iter()
            .filter(|d| filter.matches(d))
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .map(|d| {
                let mut out = d.clone();
                out.shift_remove(INTERNAL_ID_FIELD);
                out
            })
            .collect();
        Ok(matches)
    }

    async fn sum_field(&self, collection: &str, field: &str) -> Result<f64> {
        let collections = self.collections.read().await;
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        let sum = docs
            .iter()
            .filter_map(|d| d.get(field).and_then(FieldValue::as_f64))
            .sum();
        Ok(sum)
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<Uuid> {
        let id = Uuid::new_v4();
        doc.insert(
            INTERNAL_ID_FIELD.to_string(),
            FieldValue::String(id.to_string()),
        );

        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(doc);
        Ok(id)
    }
}
