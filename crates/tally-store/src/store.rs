//! The `DocumentStore` trait and its filter language.

use async_trait::async_trait;
use uuid::Uuid;

use tally_core::record::{is_assigned, is_available, is_unassigned, status_of};
use tally_core::{Document, Result};

/// Field name under which backends keep their internal record identifier.
///
/// Never leaves the store: [`DocumentStore::find`] strips it from every
/// returned document.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Typed filter understood by every store backend.
///
/// The assignment-based variants delegate to the classification rules in
/// `tally_core::record`, so both spellings of the assignment field and the
/// literal empty-string availability rule apply identically no matter which
/// backend evaluates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Every document in the collection.
    All,
    /// Assignment field present with a non-empty, non-null value.
    Assigned,
    /// Assignment field exactly the empty string.
    AvailableEmpty,
    /// Assignment field null, empty string, or structurally absent.
    Unassigned,
    /// `status` field equal to the given string.
    StatusEq(String),
}

impl RecordFilter {
    /// Evaluate this filter against a document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Assigned => is_assigned(doc),
            RecordFilter::AvailableEmpty => is_available(doc),
            RecordFilter::Unassigned => is_unassigned(doc),
            RecordFilter::StatusEq(status) => status_of(doc) == Some(status.as_str()),
        }
    }
}

/// External keyed collection service holding schema-less asset records.
///
/// All methods are single round-trips with no transactional snapshot across
/// calls; concurrent writers can cause read skew between enumeration and
/// counting. That is accepted eventual-consistency behavior for these
/// read-only reports, and implementations must not serialize reads to hide
/// it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Current collection catalog, in the store's enumeration order.
    async fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Count documents in `collection` matching `filter`.
    async fn count_documents(&self, collection: &str, filter: &RecordFilter) -> Result<u64>;

    /// Fetch documents matching `filter`, skipping `skip` matches and
    /// returning at most `limit` (no cap when `None`). The internal record
    /// identifier is stripped from every returned document.
    async fn find(
        &self,
        collection: &str,
        filter: &RecordFilter,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Document>>;

    /// Grouped sum of a numeric field across the whole collection.
    ///
    /// Non-numeric values (strings, nulls, absent fields) contribute
    /// nothing; an empty collection sums to `0`. Non-finite stored numbers
    /// propagate into the result, which callers must normalize.
    async fn sum_field(&self, collection: &str, field: &str) -> Result<f64>;

    /// Insert a single document, returning the store-assigned record id.
    /// The collection is created implicitly if it does not exist.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<Uuid>;
}
