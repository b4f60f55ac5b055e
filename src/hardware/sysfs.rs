//! Helpers for single-value sysfs/procfs files.

use crate::error::SensorError;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a file and returns its trimmed content.
pub(crate) fn read_trimmed(path: &Path) -> Result<String, SensorError> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| SensorError::from_io(path, e))
}

/// Reads a file holding a single integer.
pub(crate) fn read_int(path: &Path) -> Result<i64, SensorError> {
    let content = read_trimmed(path)?;
    content
        .parse::<i64>()
        .map_err(|_| SensorError::parse_error(path, format!("expected integer, got '{content}'")))
}

/// Expands a glob pattern, dropping (and logging) entries that cannot be read.
///
/// An invalid pattern yields no paths.
pub(crate) fn expand(pattern: &str) -> Vec<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(err) => {
            tracing::warn!("Invalid sensor pattern `{}`: {}", pattern, err);
            return Vec::new();
        }
    };

    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::debug!("Skipping unreadable glob entry: {}", err);
                None
            }
        })
        .collect()
}
