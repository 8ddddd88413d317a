//! Structured logging field name constants for tally.
//!
//! Every crate emits these field names so log aggregation tools can query
//! by one standardized name per concept across subsystems. `tracing` macros
//! only accept literal field names, so emitters spell the names inline; the
//! schema test below pins each constant to the spelled name and fails the
//! build's tests if the two drift apart.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-record iteration, high-volume data |

/// Collection being scanned or written.
pub const COLLECTION: &str = "collection";

/// Number of collections in scope for an operation.
pub const COLLECTION_COUNT: &str = "collection_count";

/// Number of records returned or grouped.
pub const RESULT_COUNT: &str = "result_count";
