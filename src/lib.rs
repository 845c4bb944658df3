//! search-bench - sequential query load generator for a search index
//!
//! Reads query terms from a word list, runs them one after another against a
//! search node, and appends one tab-separated latency record per query to a
//! log file or stdout.
//!
//! # Architecture
//!
//! - **Sampling**: word list reader with a random start offset
//! - **Client**: search backend clients (Elasticsearch)
//! - **Runner**: the measurement loop
//! - **Metrics**: run timing and per-query records
//! - **Output**: lazily opened TSV sink
//!
//! # Example
//!
//! ```rust,no_run
//! use search_bench::{BenchConfig, ElasticsearchClient, OutputSink, RunContext, StressRunner};
//! use search_bench::sampling::WordSource;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BenchConfig::default().with_max_queries(100);
//!     let words = WordSource::open(&config.words_file, 0)?;
//!     let client = ElasticsearchClient::from_target(&config.search);
//!
//!     let mut ctx = RunContext::new();
//!     let mut sink = OutputSink::for_run(&config, ctx.started_at());
//!     let summary = StressRunner::new(client, config)
//!         .run(&mut ctx, words, &mut sink)
//!         .await?;
//!     println!("{:.1} ms/query", summary.ms_per_query);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod node;
pub mod output;
pub mod runner;
pub mod sampling;

// Re-export commonly used types
pub use client::{ElasticsearchClient, SearchClient, SearchResult};
pub use config::{BenchConfig, SearchTarget};
pub use error::{ConfigError, Error, Result, SearchError};
pub use metrics::{QueryRecord, RunContext};
pub use output::OutputSink;
pub use runner::{RunSummary, StressRunner};
