//! TSV record sink

use super::path::output_path;
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::metrics::QueryRecord;
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where records end up once the sink is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Log file opened in append mode
    File(PathBuf),
    /// Process standard output
    Console,
}

impl Destination {
    fn label(&self) -> PathBuf {
        match self {
            Destination::File(path) => path.clone(),
            Destination::Console => PathBuf::from("<stdout>"),
        }
    }
}

struct OpenSink {
    destination: Destination,
    writer: Writer<Box<dyn Write + Send>>,
}

impl OpenSink {
    fn open(path: Option<&Path>) -> Result<Self> {
        let (destination, inner): (Destination, Box<dyn Write + Send>) = match path {
            Some(path) => {
                let file = open_append(path).map_err(|source| Error::Output {
                    path: path.to_path_buf(),
                    source,
                })?;
                (Destination::File(path.to_path_buf()), Box::new(file))
            }
            None => (Destination::Console, Box::new(io::stdout())),
        };
        tracing::info!("Writing records to {}", destination.label().display());
        Ok(Self {
            destination,
            writer: tsv_writer(inner),
        })
    }
}

/// Lazily opened destination for query records
///
/// Nothing is created until the first record is written (or
/// [`resolve`](Self::resolve) is called); from then on the destination is
/// fixed. Each record is flushed immediately.
pub struct OutputSink {
    path: Option<PathBuf>,
    open: Option<OpenSink>,
}

fn tsv_writer(inner: Box<dyn Write + Send>) -> Writer<Box<dyn Write + Send>> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(inner)
}

fn open_append(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl OutputSink {
    /// Sink writing to `path`, or to stdout when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path, open: None }
    }

    /// Sink writing to stdout
    pub fn console() -> Self {
        Self::new(None)
    }

    /// Sink for a run: a dated log file under the configured output
    /// directory, or stdout when there is none
    pub fn for_run(config: &BenchConfig, started_at: DateTime<Utc>) -> Self {
        Self::new(config.output_dir.as_deref().map(|dir| {
            output_path(
                dir,
                started_at,
                &config.node_name,
                config.comment_slug.as_deref(),
            )
        }))
    }

    /// Destination, if already resolved
    pub fn destination(&self) -> Option<&Destination> {
        self.open.as_ref().map(|open| &open.destination)
    }

    /// Open the destination if that has not happened yet
    pub fn resolve(&mut self) -> Result<&Destination> {
        Ok(&self.opened()?.destination)
    }

    fn opened(&mut self) -> Result<&mut OpenSink> {
        let open = match self.open.take() {
            Some(open) => open,
            None => OpenSink::open(self.path.as_deref())?,
        };
        Ok(self.open.insert(open))
    }

    /// Append one record as a tab-separated line
    pub fn write_record(&mut self, record: &QueryRecord) -> Result<()> {
        let OpenSink {
            destination,
            writer,
        } = self.opened()?;

        writer
            .write_record(record.fields())
            .map_err(io::Error::from)
            .and_then(|_| writer.flush())
            .map_err(|source| Error::Output {
                path: destination.label(),
                source,
            })
    }
}
