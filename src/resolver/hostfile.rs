//! Host list file parsing.
//!
//! One hostname per line. Surrounding whitespace is ignored, as are blank
//! lines and lines starting with `#`.

use std::path::Path;
use tracing::{debug, info};

use crate::error::{ResolveError, Result};

/// Comment marker for the host list file.
const COMMENT_PREFIX: char = '#';

/// Extracts the hostnames from host list content, in file order.
#[must_use]
pub fn parse_host_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(String::from)
        .collect()
}

/// Reads the host list file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no hostnames.
pub fn read_host_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    info!("Reading host list file \"{}\"", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ResolveError::HostFileUnreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let hosts = parse_host_list(&content);
    if hosts.is_empty() {
        return Err(ResolveError::EmptyHostList {
            path: path.to_path_buf(),
        }
        .into());
    }

    debug!("Found {} hostnames in {}", hosts.len(), path.display());
    Ok(hosts)
}
