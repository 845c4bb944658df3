//! Node identity lookup
//!
//! Every lookup here is best effort and returns `None` on failure; callers
//! pick the fallback.

use std::fs;
use std::path::Path;
use sysinfo::System;

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Read the node name from the first line of `path`
pub fn read_node_name(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().next().and_then(non_empty),
        Err(e) => {
            tracing::debug!("Cannot read node name from {}: {}", path.display(), e);
            None
        }
    }
}

/// Network hostname of this machine
///
/// `$HOSTNAME` wins when set; otherwise the system is asked.
pub fn hostname() -> Option<String> {
    hostname_from(std::env::var("HOSTNAME").ok().as_deref())
}

fn hostname_from(env: Option<&str>) -> Option<String> {
    env.and_then(non_empty)
        .or_else(|| System::host_name().as_deref().and_then(non_empty))
}

/// Node name from `path`, falling back to the hostname and then `localhost`
pub fn resolve_node_name(path: &Path) -> String {
    if let Some(name) = read_node_name(path) {
        return name;
    }
    match hostname() {
        Some(host) => {
            tracing::warn!(
                "No node name in {}, using hostname {}",
                path.display(),
                host
            );
            host
        }
        None => {
            tracing::warn!(
                "No node name in {} and no hostname found, using localhost",
                path.display()
            );
            "localhost".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_node_name() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  es-node-04  ").unwrap();
        writeln!(file, "ignored").unwrap();

        assert_eq!(read_node_name(file.path()), Some("es-node-04".to_string()));
    }

    #[test]
    fn test_read_node_name_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert_eq!(read_node_name(file.path()), None);
    }

    #[test]
    fn test_read_node_name_missing_file() {
        assert_eq!(read_node_name(Path::new("/nonexistent/node_name")), None);
    }

    #[test]
    fn test_hostname_env_overrides_system() {
        assert_eq!(hostname_from(Some("  bench-7 ")), Some("bench-7".to_string()));
    }

    #[test]
    fn test_hostname_blank_env_asks_system() {
        let expected = System::host_name().as_deref().and_then(non_empty);
        assert_eq!(hostname_from(Some("   ")), expected);
        assert_eq!(hostname_from(None), expected);
    }

    #[test]
    fn test_resolve_node_name_prefers_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "worker-9").unwrap();
        assert_eq!(resolve_node_name(file.path()), "worker-9");
    }

    #[test]
    fn test_resolve_node_name_fallback_is_never_empty() {
        let name = resolve_node_name(Path::new("/nonexistent/node_name"));
        assert!(!name.is_empty());
        assert_eq!(name, name.trim());
    }
}
