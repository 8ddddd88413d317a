//! Collection naming conventions and filters.
//!
//! Inventory collections are not declared anywhere; they are discovered at
//! runtime by naming convention. Two scopes exist and are intentionally
//! different:
//!
//! - the canonical allow-list ([`CANONICAL_COLLECTIONS`]) guards writes and
//!   scopes the financial summary to the five known categories;
//! - the marker substring ([`INVENTORY_MARKER`]) is a looser net that also
//!   catches legacy and ad-hoc collections created by bulk ingestion, used
//!   by the unassigned-assets report.
//!
//! The store's collection catalog can grow at any time, so filters are
//! re-evaluated against a fresh enumeration on every call, never cached.

use serde::{Deserialize, Serialize};

/// Substring marking a collection as an inventory partition.
pub const INVENTORY_MARKER: &str = "Inventory_";

/// The five canonical inventory categories eligible for writes and included
/// in the full summary. Fixed at build time, not runtime-configurable.
pub const CANONICAL_COLLECTIONS: [&str; 5] = [
    "Inventory_Laptop",
    "Inventory_Furniture",
    "Inventory_Mouse+Keyboard",
    "Inventory_Non-Consumable",
    "Inventory_Others",
];

/// Scope restriction applied when enumerating stored collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionFilter {
    /// Every stored collection, whatever its name.
    All,
    /// Collections whose name contains [`INVENTORY_MARKER`].
    Marked,
    /// Only the canonical five-category allow-list.
    Canonical,
}

impl CollectionFilter {
    /// Whether a collection name falls inside this scope.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            CollectionFilter::All => true,
            CollectionFilter::Marked => name.contains(INVENTORY_MARKER),
            CollectionFilter::Canonical => CANONICAL_COLLECTIONS.contains(&name),
        }
    }
}

/// True when `name` is one of the canonical write-eligible collections.
pub fn is_canonical(name: &str) -> bool {
    CANONICAL_COLLECTIONS.contains(&name)
}
