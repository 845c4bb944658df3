//! Elasticsearch client implementation

use super::{SearchClient, SearchResult};
use crate::config::SearchTarget;
use crate::error::SearchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Elasticsearch URI-search client
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    client: Client,
    base_url: String,
    index: String,
    doc_type: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
    #[serde(rename = "_shards")]
    shards: Shards,
}

#[derive(Debug, Deserialize)]
struct Hits {
    total: HitTotal,
}

/// `hits.total` is a bare number before 7.0 and an object afterwards
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitTotal {
    Count(u64),
    Object { value: u64 },
}

impl HitTotal {
    fn value(&self) -> u64 {
        match self {
            HitTotal::Count(n) => *n,
            HitTotal::Object { value } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Shards {
    successful: u64,
}

impl ElasticsearchClient {
    /// Create a new client for `index`/`doc_type` on the node at `base_url`
    pub fn new(base_url: String, index: String, doc_type: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            index,
            doc_type,
        }
    }

    /// Create a client from a configured target
    pub fn from_target(target: &SearchTarget) -> Self {
        Self::new(
            target.base_url(),
            target.index.clone(),
            target.doc_type.clone(),
        )
    }

    /// Get the search endpoint URL
    fn search_url(&self) -> String {
        if self.doc_type.is_empty() {
            format!("{}/{}/_search", self.base_url, self.index)
        } else {
            format!("{}/{}/{}/_search", self.base_url, self.index, self.doc_type)
        }
    }

    /// Decode a search response body
    fn parse_response(body: &str) -> Result<SearchResult, SearchError> {
        let response: SearchResponse =
            serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(SearchResult {
            total_entries: response.hits.total.value(),
            successful_shards: response.shards.successful,
        })
    }
}

#[async_trait]
impl SearchClient for ElasticsearchClient {
    async fn search(&self, query: &str) -> Result<SearchResult, SearchError> {
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "elasticsearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ElasticsearchClient {
        ElasticsearchClient::new(
            "http://node1:9200/".to_string(),
            "tweet-201011".to_string(),
            "tweet".to_string(),
        )
    }

    #[test]
    fn test_client_creation() {
        assert_eq!(client().name(), "elasticsearch");
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            client().search_url(),
            "http://node1:9200/tweet-201011/tweet/_search"
        );

        let untyped = ElasticsearchClient::new(
            "http://node1:9200".to_string(),
            "logs".to_string(),
            String::new(),
        );
        assert_eq!(untyped.search_url(), "http://node1:9200/logs/_search");
    }

    #[test]
    fn test_from_target() {
        let target = SearchTarget {
            host: "es-3".into(),
            port: 9201,
            ..Default::default()
        };
        assert_eq!(
            ElasticsearchClient::from_target(&target).search_url(),
            "http://es-3:9201/tweet-201011/tweet/_search"
        );
    }

    #[test]
    fn test_parse_legacy_total() {
        let body = r#"{
            "took": 4,
            "timed_out": false,
            "_shards": {"total": 5, "successful": 4, "failed": 1},
            "hits": {"total": 1234, "max_score": 1.0, "hits": []}
        }"#;
        let result = ElasticsearchClient::parse_response(body).unwrap();
        assert_eq!(result, SearchResult::new(1234, 4));
    }

    #[test]
    fn test_parse_object_total() {
        let body = r#"{
            "_shards": {"total": 1, "successful": 1, "skipped": 0, "failed": 0},
            "hits": {"total": {"value": 10000, "relation": "gte"}, "hits": []}
        }"#;
        let result = ElasticsearchClient::parse_response(body).unwrap();
        assert_eq!(result, SearchResult::new(10000, 1));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            ElasticsearchClient::parse_response("not json"),
            Err(SearchError::Decode(_))
        ));
        assert!(matches!(
            ElasticsearchClient::parse_response(r#"{"hits": {"total": 3}}"#),
            Err(SearchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_search_unreachable_backend() {
        // port 1 on loopback is closed in any sane test environment
        let client = ElasticsearchClient::new(
            "http://127.0.0.1:1".to_string(),
            "idx".to_string(),
            String::new(),
        );
        assert!(matches!(
            client.search("text:cat").await,
            Err(SearchError::Http(_))
        ));
    }
}
