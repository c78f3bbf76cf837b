//! Centralized default constants for termgraph.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Maximum length of a term identifier, in characters.
pub const MAX_IDENTIFIER_LEN: usize = 100;

/// Maximum length of a vocabulary name, in characters.
pub const MAX_VOCABULARY_LEN: usize = 100;

/// Placeholder substituted by the query template renderer.
pub const TERM_PLACEHOLDER: &str = "${term}";

// =============================================================================
// TERM RECORD
// =============================================================================

/// First crumb of every breadcrumb path.
pub const BREADCRUMB_START_PAGE: &str = "Home";

/// Version label used when no release information is available.
pub const VERSION_UNAVAILABLE: &str = "No data for version.";

/// Default language display order.
pub const LANGUAGES: &[&str] = &["de", "fr", "it", "rm", "en"];

/// Minimum number of `/`-separated segments in a label subject URI.
pub const LABEL_SUBJECT_MIN_SEGMENTS: usize = 5;

// =============================================================================
// GRAPH STORE
// =============================================================================

/// Timeout for a single SPARQL query in seconds.
pub const QUERY_TIMEOUT_SECS: u64 = 30;

/// Timeout for the connectivity probe in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Media type requested from the graph store.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Media type of a raw SPARQL query body.
pub const SPARQL_QUERY: &str = "application/sparql-query";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default catalogue file path.
pub const CATALOGUE_PATH: &str = "catalogue.toml";

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

// =============================================================================
// RELEASES
// =============================================================================

/// Default GitHub API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Default GitHub owner of the vocabulary repositories.
pub const GITHUB_OWNER: &str = "swisstopo";

/// Timeout for a release lookup in seconds.
pub const RELEASE_TIMEOUT_SECS: u64 = 5;
