//! Search backend clients
//!
//! The measurement loop only needs the hit count and the number of shards
//! that answered, so that is all a [`SearchClient`] has to report.

pub mod elasticsearch;

pub use elasticsearch::ElasticsearchClient;

use crate::error::SearchError;
use async_trait::async_trait;

/// Outcome of a single search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchResult {
    /// Number of documents matching the query
    pub total_entries: u64,
    /// Number of shards that contributed without error
    pub successful_shards: u64,
}

impl SearchResult {
    /// Create a result
    pub fn new(total_entries: u64, successful_shards: u64) -> Self {
        Self {
            total_entries,
            successful_shards,
        }
    }
}

/// Client trait that every search backend must implement
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run one query string against the configured index
    async fn search(&self, query: &str) -> Result<SearchResult, SearchError>;

    /// Get the client name
    fn name(&self) -> &str;
}
