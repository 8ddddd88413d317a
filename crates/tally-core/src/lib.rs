//! # tally-core
//!
//! Core types, traits, and abstractions for the tally asset inventory
//! service.
//!
//! This crate provides the schema-less document value model, the record
//! classification rules (assigned / available / unassigned), the JSON
//! sanitization policies, and the collection naming filters that every
//! other tally crate depends on.

pub mod collections;
pub mod error;
pub mod logging;
pub mod record;
pub mod sanitize;
pub mod value;

// Re-export commonly used types at crate root
pub use collections::{is_canonical, CollectionFilter, CANONICAL_COLLECTIONS, INVENTORY_MARKER};
pub use error::{Error, Result};
pub use record::{
    assignment_value, is_assigned, is_available, is_unassigned, status_of, AssigneeKey,
    ASSIGNMENT_FIELDS, FIELD_ISSUE_DATE, FIELD_MATERIAL_NAME, FIELD_REMARKS, FIELD_STATUS,
    FIELD_STOCK_ENTRY, FIELD_TOTAL_PRICE, STATUS_MAINTENANCE, STATUS_RETIRED,
};
pub use sanitize::{sanitize, sanitize_document, SanitizePolicy};
pub use value::{document_from_json, Document, FieldValue};
