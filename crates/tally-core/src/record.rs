//! Asset record classification rules.
//!
//! Records are schema-less, and the historical data carries two spellings of
//! the assignment field (`"Issued to"` and `"Issued To"`). Every rule that
//! inspects assignment goes through [`assignment_value`] so both spellings
//! are recognized at every call site.
//!
//! Classification contract:
//! - **assigned**: assignment field present with a non-empty, non-null value.
//! - **available**: assignment field exactly the empty string. Absent and
//!   null do NOT count as available; this is a quirk of the upstream data
//!   contract that downstream dashboards depend on, so it is preserved here
//!   rather than corrected.
//! - **unassigned** (the broader report): assignment field null, empty, or
//!   structurally absent.
//!
//! Assignment and `status` are independent fields, so a record can be both
//! assigned and `"Retired"`. Summary arithmetic sums the four buckets anyway
//! (see `tally-report`), which means such records are double-counted. Known
//! upstream inconsistency, intentionally not reconciled here.

use crate::value::{Document, FieldValue};

/// Both historical spellings of the assignment field, in lookup order.
pub const ASSIGNMENT_FIELDS: [&str; 2] = ["Issued to", "Issued To"];

/// Free-text status field.
pub const FIELD_STATUS: &str = "status";

/// Monetary field summed per category.
pub const FIELD_TOTAL_PRICE: &str = "Total Price";

pub const FIELD_STOCK_ENTRY: &str = "Stock Entry Number";
pub const FIELD_ISSUE_DATE: &str = "Issue Date";
pub const FIELD_MATERIAL_NAME: &str = "Material Name";
pub const FIELD_REMARKS: &str = "Remarks";

/// Observed `status` values with dedicated summary buckets.
pub const STATUS_MAINTENANCE: &str = "Under Maintenance";
pub const STATUS_RETIRED: &str = "Retired";

/// The assignment field value, whichever spelling the record uses.
pub fn assignment_value(doc: &Document) -> Option<&FieldValue> {
    ASSIGNMENT_FIELDS.iter().find_map(|field| doc.get(*field))
}

/// Assignment field present with a usable, non-empty value.
pub fn is_assigned(doc: &Document) -> bool {
    match assignment_value(doc) {
        Some(v) => !v.is_no_value() && !v.is_empty_string(),
        None => false,
    }
}

/// Assignment field exactly the empty string (the literal availability rule).
pub fn is_available(doc: &Document) -> bool {
    matches!(assignment_value(doc), Some(v) if v.is_empty_string())
}

/// Assignment field null, empty string, or structurally absent.
pub fn is_unassigned(doc: &Document) -> bool {
    match assignment_value(doc) {
        Some(v) => v.is_no_value() || v.is_empty_string(),
        None => true,
    }
}

/// The record's `status` string, if any.
pub fn status_of(doc: &Document) -> Option<&str> {
    doc.get(FIELD_STATUS).and_then(FieldValue::as_str)
}

/// Grouping key for a free-text assignee name.
///
/// Assignment is a raw string match against employee names, with no stable
/// identifier anywhere in the data. To keep the unassigned and employee
/// reports consistent with each other, grouping happens on a normalized key
/// (trimmed, case-folded) while the first-seen raw spelling is kept for
/// display. This is NOT a foreign-key join and must not become one: no such
/// identifier exists upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssigneeKey(String);

impl AssigneeKey {
    /// Normalize a raw assignment string: trim surrounding whitespace and
    /// case-fold via Unicode-simple lowercasing.
    pub fn new(raw: &str) -> Self {
        AssigneeKey(raw.trim().to_lowercase())
    }

    /// The normalized key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
