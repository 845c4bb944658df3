//! Log file naming

use crate::metrics::FLAT_TIME_FORMAT;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Log file for a run started at `started_at`
///
/// `{dir}/{YYYYMMDD}/es-{YYYYMMDDHHMMSS}-{node}[-{comment}].tsv`
pub fn output_path(
    dir: &Path,
    started_at: DateTime<Utc>,
    node_name: &str,
    comment_slug: Option<&str>,
) -> PathBuf {
    let date = started_at.format("%Y%m%d").to_string();
    let datetime = started_at.format(FLAT_TIME_FORMAT).to_string();

    let mut parts = vec!["es", datetime.as_str(), node_name];
    if let Some(slug) = comment_slug.filter(|s| !s.is_empty()) {
        parts.push(slug);
    }

    expand_home(dir)
        .join(date)
        .join(format!("{}.tsv", parts.join("-")))
}
