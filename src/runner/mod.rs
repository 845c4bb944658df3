//! Measurement loop
//!
//! The runner pulls terms one at a time, waits for each search to finish
//! before issuing the next, and writes one record per completed query.
//! There is exactly one request in flight at any time.

use crate::client::SearchClient;
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::metrics::{is_progress_marker, QueryRecord, RunContext};
use crate::output::OutputSink;
use chrono::Utc;
use std::io::{self, Write};

/// Totals of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of queries completed
    pub queries: u64,
    /// Seconds between run start and the end of the run
    pub elapsed_secs: f64,
    /// Mean milliseconds per query over the whole run
    pub ms_per_query: f64,
}

/// Runner for executing a sequential query load
pub struct StressRunner<C: SearchClient> {
    client: C,
    config: BenchConfig,
    progress: Box<dyn Write + Send>,
}

impl<C: SearchClient> StressRunner<C> {
    /// Create a runner reporting progress on stderr
    pub fn new(client: C, config: BenchConfig) -> Self {
        Self {
            client,
            config,
            progress: Box::new(io::stderr()),
        }
    }

    /// Report progress markers to `writer` instead of stderr
    pub fn with_progress_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.progress = writer;
        self
    }

    /// Query each term in order until the budget is spent or `words` runs dry
    ///
    /// A failed search aborts the run; records already written stay in the
    /// sink.
    pub async fn run<I>(
        &mut self,
        ctx: &mut RunContext,
        words: I,
        sink: &mut OutputSink,
    ) -> Result<RunSummary>
    where
        I: IntoIterator<Item = String>,
    {
        self.config.validate()?;

        let max_queries = self.config.max_queries;
        let mut words = words.into_iter();

        while ctx.queries() < max_queries {
            let Some(term) = words.next() else {
                tracing::info!(completed = ctx.queries(), "Word list exhausted");
                break;
            };

            let query = self.config.search.query_for(&term);
            let result = self
                .client
                .search(&query)
                .await
                .map_err(|source| Error::Search {
                    seq: ctx.queries() + 1,
                    term: term.clone(),
                    source,
                })?;

            let timing = ctx.complete_query(Utc::now());
            let record = QueryRecord::new(timing, result, &self.config.node_name, &term);
            sink.write_record(&record)?;

            tracing::debug!(
                seq = timing.seq,
                hits = result.total_entries,
                shards = result.successful_shards,
                "Query {:?} done",
                term
            );

            if is_progress_marker(timing.seq) {
                writeln!(self.progress, "{}", timing.seq)?;
            }
        }

        let elapsed_secs = ctx.elapsed_secs(Utc::now());
        let queries = ctx.queries();
        let ms_per_query = if queries > 0 {
            1000.0 * elapsed_secs / queries as f64
        } else {
            0.0
        };

        Ok(RunSummary {
            queries,
            elapsed_secs,
            ms_per_query,
        })
    }
}
