//! Error types for termgraph.

use thiserror::Error;

/// Result type alias using termgraph's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for term resolution.
///
/// Primary-path variants abort a request. `LabelSource` only ever travels
/// inside the label aggregator, which logs and discards it.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested term identifier failed sanitization
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A request parameter has the wrong shape or is missing
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No connection parameters or query template for a vocabulary
    #[error("Configuration missing: {0}")]
    ConfigMissing(String),

    /// The connectivity probe against a repository failed
    #[error("Store unreachable: {0}")]
    StoreUnreachable(String),

    /// A primary query failed or returned an undecodable result
    #[error("Query error: {0}")]
    Query(String),

    /// One vocabulary's all-labels fetch failed
    #[error("Label source failure: {0}")]
    LabelSource(String),

    /// Catalogue file unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable reason, safe to expose to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidIdentifier(_) => "invalid_identifier",
            Error::InvalidInput(_) => "invalid_input",
            Error::ConfigMissing(_) => "config_missing",
            Error::StoreUnreachable(_) => "store_unreachable",
            Error::Query(_) => "query_failed",
            Error::LabelSource(_) => "label_source_failure",
            Error::Config(_) => "config_unreadable",
            Error::Request(_) => "request_failed",
            Error::Serialization(_) => "serialization_failed",
            Error::Internal(_) => "internal_error",
            Error::Io(_) => "io_error",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
