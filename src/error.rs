//! Error types for search-bench

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`SearchClient`](crate::client::SearchClient)
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP/network error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("search backend error ({status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the backend
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("malformed search response: {0}")]
    Decode(String),
}

/// Configuration validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is empty
    #[error("missing required setting: {0}")]
    MissingField(&'static str),

    /// Port 0 cannot be dialed
    #[error("invalid port: {0}")]
    InvalidPort(u16),
}

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A search request failed; the run stops here
    #[error("query {seq} ({term:?}) failed: {source}")]
    Search {
        /// Sequence number the query would have received
        seq: u64,
        /// Query term that was submitted
        term: String,
        /// Underlying client error
        #[source]
        source: SearchError,
    },

    /// Output destination could not be created or written
    #[error("output error at {}: {source}", .path.display())]
    Output {
        /// File (or `<stdout>`) being written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
