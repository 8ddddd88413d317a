//! # tally-store
//!
//! Document store seam for tally.
//!
//! The production document store is an external keyed collection service
//! reached over the network; this crate defines the trait the rest of tally
//! programs against ([`DocumentStore`]), the typed filter language backends
//! interpret ([`RecordFilter`]), the [`CollectionRegistry`] that enumerates
//! and scopes collections, and an in-process [`MemoryStore`] backend used by
//! tests and local runs.
//!
//! The store's collection catalog is external, mutable, and unversioned:
//! nothing in this crate caches it beyond a single call.

pub mod memory;
pub mod registry;
pub mod store;

pub use memory::MemoryStore;
pub use registry::CollectionRegistry;
pub use store::{DocumentStore, RecordFilter, INTERNAL_ID_FIELD};
