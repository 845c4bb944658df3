//! Query term source
//!
//! Terms are read from a plain word list, one word per line. Each run starts
//! at a pseudo-random line so that repeated runs exercise different parts of
//! the index instead of replaying a warm cache.

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::path::Path;

/// Number of distinct skip positions the random offset picks from
pub const OFFSET_BUCKETS: u64 = 1000;

/// Parameters of the random skip applied before the first term
///
/// Either field may be absent; the offset is then undefined and
/// [`random_offset`](Self::random_offset) returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetConfig {
    /// Line number the random window starts at
    pub start: Option<u64>,
    /// Distance in lines between two candidate positions
    pub scale: Option<u64>,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            start: Some(50_000),
            scale: Some(100),
        }
    }
}

impl OffsetConfig {
    /// Pick `start + random(0..1000) * scale`
    ///
    /// Returns `None` when a parameter is missing or the result overflows.
    pub fn random_offset<R: Rng>(&self, rng: &mut R) -> Option<u64> {
        let start = self.start?;
        let scale = self.scale?;
        let bucket = rng.gen_range(0..OFFSET_BUCKETS);
        bucket.checked_mul(scale)?.checked_add(start)
    }

    /// Lines to skip before the first term, `0` when no offset can be drawn
    pub fn start_offset<R: Rng>(&self, rng: &mut R) -> u64 {
        self.random_offset(rng).unwrap_or_else(|| {
            tracing::warn!(
                "Cannot compute a start offset from {:?}, reading from the top of the word list",
                self
            );
            0
        })
    }
}

/// Returns true if every character of `token` is a word character
/// (ASCII letter, digit or underscore)
pub fn is_word(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Lazy, forward-only sequence of query terms read from a word list
///
/// The first call to `next` skips the configured number of lines. The
/// sequence ends at end of file or at the first line that cannot be read;
/// neither is reported as an error.
pub struct WordSource<R> {
    lines: Lines<R>,
    pending: VecDeque<String>,
    to_skip: u64,
    lines_read: u64,
    done: bool,
}

impl WordSource<BufReader<File>> {
    /// Open a word list file, skipping `skip` lines before the first term
    pub fn open(path: &Path, skip: u64) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open word list: {}", path.display()))?;
        Ok(Self::new(BufReader::new(file), skip))
    }
}

impl<R: BufRead> WordSource<R> {
    /// Wrap an already open reader
    pub fn new(reader: R, skip: u64) -> Self {
        Self {
            lines: reader.lines(),
            pending: VecDeque::new(),
            to_skip: skip,
            lines_read: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far, skipped lines included
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    fn next_line(&mut self) -> Option<String> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.lines_read += 1;
                Some(line)
            }
            Some(Err(e)) => {
                tracing::debug!(line = self.lines_read + 1, "Stopping word list read: {}", e);
                None
            }
            None => None,
        }
    }

    fn skip_lines(&mut self) -> bool {
        while self.to_skip > 0 {
            if self.next_line().is_none() {
                tracing::debug!(
                    skipped = self.lines_read,
                    remaining = self.to_skip,
                    "Word list ended before the start offset"
                );
                return false;
            }
            self.to_skip -= 1;
        }
        true
    }
}

impl<R: BufRead> Iterator for WordSource<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        if !self.skip_lines() {
            self.done = true;
            return None;
        }

        loop {
            if let Some(word) = self.pending.pop_front() {
                return Some(word);
            }
            let Some(line) = self.next_line() else {
                self.done = true;
                return None;
            };
            self.pending.extend(
                line.split_whitespace()
                    .filter(|token| is_word(token))
                    .map(str::to_string),
            );
        }
    }
}

impl<R: BufRead> FusedIterator for WordSource<R> {}
