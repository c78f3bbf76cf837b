//! Structured logging field name constants for termgraph.
//!
//! All crates use these names so log aggregation can query by the same
//! fields across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed on the primary path, operator attention needed |
//! | WARN  | Recoverable issue, e.g. a label source was skipped |
//! | INFO  | Lifecycle events (startup, shutdown), request completions |
//! | DEBUG | Decision points, rendered queries, config choices |
//! | TRACE | Per-row iteration (statements, label rows) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "sparql", "core"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "term_resolver", "label_aggregator", "sparql_client"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve", "aggregate", "select", "probe"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Vocabulary name.
pub const VOCABULARY: &str = "vocabulary";

/// Term identifier.
pub const TERM: &str = "term";

/// Repository URL a query was sent to.
pub const ENDPOINT: &str = "endpoint";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Label rows skipped because the subject was already indexed.
pub const DUPLICATE_COUNT: &str = "duplicate_count";

/// Label rows skipped because the subject is out of scope.
pub const REJECTED_COUNT: &str = "rejected_count";

/// Vocabularies whose label fetch failed.
pub const FAILED_SOURCES: &str = "failed_sources";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
