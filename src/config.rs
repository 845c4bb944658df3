//! Run configuration types
//!
//! Built once at startup (normally from the CLI) and passed by reference to
//! the pieces that need it.

use crate::error::ConfigError;
use crate::sampling::OffsetConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default word list shipped by most Linux distributions
pub const DEFAULT_WORDS_FILE: &str = "/usr/share/dict/words";

/// Default file holding this machine's node name
pub const DEFAULT_NODE_NAME_FILE: &str = "/etc/node_name";

/// Where and how to query the search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTarget {
    /// Host running the search node
    pub host: String,

    /// HTTP port of the search node
    pub port: u16,

    /// Index to query
    pub index: String,

    /// Document type path segment
    pub doc_type: String,

    /// Field each term is matched against
    pub field: String,
}

impl Default for SearchTarget {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 9200,
            index: "tweet-201011".into(),
            doc_type: "tweet".into(),
            field: "text".into(),
        }
    }
}

impl SearchTarget {
    /// Base URL of the search node, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Query string submitted for a single term
    pub fn query_for(&self, term: &str) -> String {
        format!("{}:{}", self.field, term)
    }
}

/// Complete configuration of one benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Word list the query terms are read from
    pub words_file: PathBuf,

    /// Random skip applied before the first term
    pub offsets: OffsetConfig,

    /// Query budget; the run stops after this many successful queries
    pub max_queries: u64,

    /// Search backend
    pub search: SearchTarget,

    /// Directory for the TSV log; `None` writes to stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Extra component appended to the log filename
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_slug: Option<String>,

    /// Identifier written into every record and the log filename
    pub node_name: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            words_file: PathBuf::from(DEFAULT_WORDS_FILE),
            offsets: OffsetConfig::default(),
            max_queries: 10,
            search: SearchTarget::default(),
            output_dir: None,
            comment_slug: None,
            node_name: "localhost".into(),
        }
    }
}

impl BenchConfig {
    /// Set the query budget
    pub fn with_max_queries(mut self, n: u64) -> Self {
        self.max_queries = n;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("words_file"));
        }
        if self.search.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host"));
        }
        if self.search.index.trim().is_empty() {
            return Err(ConfigError::MissingField("index"));
        }
        if self.search.field.trim().is_empty() {
            return Err(ConfigError::MissingField("field"));
        }
        if self.search.port == 0 {
            return Err(ConfigError::InvalidPort(self.search.port));
        }
        if self.node_name.trim().is_empty() {
            return Err(ConfigError::MissingField("node_name"));
        }
        Ok(())
    }
}
