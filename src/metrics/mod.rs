//! Run timing and per-query records

use crate::client::SearchResult;
use chrono::{DateTime, Utc};

/// Progress is reported on the diagnostic stream every this many queries
pub const PROGRESS_INTERVAL: u64 = 20;

/// Timestamp format used in records and file names
pub const FLAT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Returns true if a progress marker is due after query `seq`
pub fn is_progress_marker(seq: u64) -> bool {
    seq > 0 && seq % PROGRESS_INTERVAL == 0
}

/// Start time and query counter of a run
#[derive(Debug, Clone)]
pub struct RunContext {
    started_at: DateTime<Utc>,
    queries: u64,
}

/// Timing of one completed query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryTiming {
    /// Sequence number, equal to the number of completed queries
    pub seq: u64,
    /// When the query completed
    pub timestamp: DateTime<Utc>,
    /// Seconds since the run started
    pub elapsed_secs: f64,
    /// Mean milliseconds per query since the run started
    pub ms_per_query: f64,
}

impl RunContext {
    /// Start a run now
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Start a run at a given instant
    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            queries: 0,
        }
    }

    /// Run start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of completed queries
    pub fn queries(&self) -> u64 {
        self.queries
    }

    /// Seconds between the run start and `now`, never negative
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        let micros = (now - self.started_at).num_microseconds().unwrap_or(i64::MAX);
        (micros as f64 / 1_000_000.0).max(0.0)
    }

    /// Count a completed query and compute its timing
    pub fn complete_query(&mut self, now: DateTime<Utc>) -> QueryTiming {
        let elapsed_secs = self.elapsed_secs(now);
        self.queries += 1;
        QueryTiming {
            seq: self.queries,
            timestamp: now,
            elapsed_secs,
            ms_per_query: 1000.0 * elapsed_secs / self.queries as f64,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of the latency log
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub ms_per_query: f64,
    pub hit_count: u64,
    pub successful_shards: u64,
    pub node_name: String,
    pub term: String,
}

impl QueryRecord {
    /// Build a record from the timing and the backend's answer
    pub fn new(timing: QueryTiming, result: SearchResult, node_name: &str, term: &str) -> Self {
        Self {
            seq: timing.seq,
            timestamp: timing.timestamp,
            elapsed_secs: timing.elapsed_secs,
            ms_per_query: timing.ms_per_query,
            hit_count: result.total_entries,
            successful_shards: result.successful_shards,
            node_name: node_name.to_string(),
            term: term.to_string(),
        }
    }

    /// Fields in log order, formatted for output
    pub fn fields(&self) -> [String; 8] {
        [
            self.seq.to_string(),
            self.timestamp.format(FLAT_TIME_FORMAT).to_string(),
            format!("{:7.1}", self.elapsed_secs),
            format!("{:7.1}", self.ms_per_query),
            self.hit_count.to_string(),
            self.successful_shards.to_string(),
            self.node_name.clone(),
            self.term.clone(),
        ]
    }

    /// Record as a single tab-separated line, without the newline
    pub fn to_line(&self) -> String {
        self.fields().join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2010, 11, 23, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_progress_marker() {
        let markers: Vec<u64> = (0..=100).filter(|&n| is_progress_marker(n)).collect();
        assert_eq!(markers, vec![20, 40, 60, 80, 100]);
    }

    #[test]
    fn test_complete_query_counts() {
        let mut ctx = RunContext::starting_at(start());
        assert_eq!(ctx.queries(), 0);

        let seqs: Vec<u64> = (1..=5)
            .map(|i| ctx.complete_query(start() + Duration::seconds(i)).seq)
            .collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
        assert_eq!(ctx.queries(), 5);
    }

    #[test]
    fn test_running_mean_is_cumulative() {
        let mut ctx = RunContext::starting_at(start());

        let first = ctx.complete_query(start() + Duration::milliseconds(500));
        assert_eq!(first.elapsed_secs, 0.5);
        assert_eq!(first.ms_per_query, 500.0);

        let second = ctx.complete_query(start() + Duration::milliseconds(600));
        assert_eq!(second.elapsed_secs, 0.6);
        assert!((second.ms_per_query - 300.0).abs() < 1e-9);

        let third = ctx.complete_query(start() + Duration::seconds(3));
        assert!((third.ms_per_query - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let ctx = RunContext::starting_at(start());
        assert_eq!(ctx.elapsed_secs(start() - Duration::seconds(5)), 0.0);
    }

    #[test]
    fn test_record_fields() {
        let mut ctx = RunContext::starting_at(start());
        let timing = ctx.complete_query(start() + Duration::milliseconds(12_345));
        let record = QueryRecord::new(timing, SearchResult::new(5, 1), "node-a", "cat");

        assert_eq!(
            record.fields(),
            [
                "1".to_string(),
                "20101123140521".to_string(),
                "   12.3".to_string(),
                "12345.0".to_string(),
                "5".to_string(),
                "1".to_string(),
                "node-a".to_string(),
                "cat".to_string(),
            ]
        );
        assert_eq!(
            record.to_line(),
            "1\t20101123140521\t   12.3\t12345.0\t5\t1\tnode-a\tcat"
        );
    }

    #[test]
    fn test_record_wide_values_are_not_truncated() {
        let mut ctx = RunContext::starting_at(start());
        let timing = ctx.complete_query(start() + Duration::seconds(123_456));
        let record = QueryRecord::new(timing, SearchResult::default(), "n", "w");
        assert_eq!(record.fields()[2], "123456.0");
    }
}
