//! # tally-report
//!
//! The read-path logic of tally: cross-collection summary statistics,
//! paginated asset listings, unassigned-asset classification, and the
//! per-employee asset index.
//!
//! Each report is an independent engine over an `Arc<dyn DocumentStore>`;
//! none depend on each other, and all re-discover the collection catalog on
//! every call. Every report is fail-fast: an error from any per-collection
//! store call aborts the whole response — a partial inventory or financial
//! report is worse than none.

pub mod employees;
pub mod pagination;
pub mod summary;
pub mod unassigned;

pub use employees::{EmployeeAssetIndexer, EmployeeIndex};
pub use pagination::{AssetPage, PageRequest, PaginatedAssetFetcher, SCOPE_ALL};
pub use summary::{SummaryAggregator, SummaryReport};
pub use unassigned::AssignmentClassifier;
