//! CLI argument parsing and command handling

use crate::client::ElasticsearchClient;
use crate::config::{BenchConfig, SearchTarget, DEFAULT_NODE_NAME_FILE, DEFAULT_WORDS_FILE};
use crate::metrics::RunContext;
use crate::node;
use crate::output::OutputSink;
use crate::runner::StressRunner;
use crate::sampling::{OffsetConfig, WordSource};
use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// search-bench - sequential query load generator for a search index
///
/// Output columns: seq, datetime, secs, msec/query, hits, shards_successful,
/// node, query_term.
#[derive(Parser, Debug)]
#[command(name = "search-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Flat file with words to use as query terms
    #[arg(long, env = "SEARCH_BENCH_WORDS_FILE", default_value = DEFAULT_WORDS_FILE)]
    pub words_file: PathBuf,

    /// Where to start reading words
    #[arg(long, env = "SEARCH_BENCH_OFFSET_START", default_value_t = 50_000)]
    pub offset_start: u64,

    /// How far in the file to range
    #[arg(long, env = "SEARCH_BENCH_OFFSET_SCALE", default_value_t = 100)]
    pub offset_scale: u64,

    /// Number of queries to run
    #[arg(short, long, env = "SEARCH_BENCH_QUERIES", default_value_t = 10)]
    pub queries: u64,

    /// Index to query against
    #[arg(short, long, env = "SEARCH_BENCH_INDEX", default_value = "tweet-201011")]
    pub index: String,

    /// Document type path segment (empty for typeless indices)
    #[arg(long, env = "SEARCH_BENCH_DOC_TYPE", default_value = "tweet")]
    pub doc_type: String,

    /// Field each term is matched against
    #[arg(long, env = "SEARCH_BENCH_FIELD", default_value = "text")]
    pub field: String,

    /// Search node host [default: this machine's hostname]
    #[arg(long, env = "SEARCH_BENCH_HOST")]
    pub host: Option<String>,

    /// Search node HTTP port
    #[arg(short, long, env = "SEARCH_BENCH_PORT", default_value_t = 9200)]
    pub port: u16,

    /// If given, records go to {output_dir}/{date}/es-{datetime}-{node}[-{comment}].tsv
    #[arg(short, long, env = "SEARCH_BENCH_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// If given, it is included in the output filename
    #[arg(short, long, env = "SEARCH_BENCH_COMMENT")]
    pub comment_slug: Option<String>,

    /// File holding this machine's node name
    #[arg(long, env = "SEARCH_BENCH_NODE_NAME_FILE", default_value = DEFAULT_NODE_NAME_FILE)]
    pub node_name_file: PathBuf,

    /// Seed for the start offset (random when omitted)
    #[arg(long, env = "SEARCH_BENCH_SEED")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration, resolving node identity
    pub fn to_config(&self) -> Result<BenchConfig> {
        let node_name = node::resolve_node_name(&self.node_name_file);
        let host = match &self.host {
            Some(host) => host.clone(),
            None => node::hostname().unwrap_or_else(|| "localhost".to_string()),
        };

        let config = BenchConfig {
            words_file: self.words_file.clone(),
            offsets: OffsetConfig {
                start: Some(self.offset_start),
                scale: Some(self.offset_scale),
            },
            max_queries: self.queries,
            search: SearchTarget {
                host,
                port: self.port,
                index: self.index.clone(),
                doc_type: self.doc_type.clone(),
                field: self.field.clone(),
            },
            output_dir: self.output_dir.clone(),
            comment_slug: self.comment_slug.clone(),
            node_name,
        };

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run the benchmark based on CLI arguments
    pub async fn run(&self) -> Result<()> {
        let config = self.to_config()?;

        tracing::info!("Starting search-bench");
        tracing::info!("Target: {}/{}", config.search.base_url(), config.search.index);
        tracing::info!("Node: {}", config.node_name);
        tracing::info!("Queries: {}", config.max_queries);

        let skip = config.offsets.start_offset(&mut self.rng());
        tracing::info!("Skipping {} lines of {}", skip, config.words_file.display());

        let words = WordSource::open(&config.words_file, skip)?;
        let client = ElasticsearchClient::from_target(&config.search);

        let mut ctx = RunContext::new();
        let mut sink = OutputSink::for_run(&config, ctx.started_at());
        let mut runner = StressRunner::new(client, config);

        let summary = runner
            .run(&mut ctx, words, &mut sink)
            .await
            .context("Benchmark run aborted")?;

        tracing::info!(
            queries = summary.queries,
            elapsed_secs = summary.elapsed_secs,
            "Run complete: {:.1} ms/query",
            summary.ms_per_query
        );

        Ok(())
    }
}
