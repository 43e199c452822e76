//! Operator list cache.
//!
//! The list is cached as a single pretty-printed JSON file. Freshness is judged
//! by the file's modification time.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tokio::fs;

use crate::error_handling::FetchError;
use crate::models::OperatorEntry;

/// Returns true if `path` exists and was written less than `ttl` ago.
///
/// A zero `ttl` disables the cache, so nothing is ever fresh.
pub(crate) async fn is_fresh(path: &Path, ttl: Duration) -> bool {
    if ttl.is_zero() {
        return false;
    }
    let Ok(metadata) = fs::metadata(path).await else {
        return false;
    };
    let Ok(modified) = metadata.modified() else {
        return false;
    };
    // A modification time in the future counts as just written
    SystemTime::now()
        .duration_since(modified)
        .map(|age| age < ttl)
        .unwrap_or(true)
}

/// Reads and parses an operator list from a local JSON file.
pub(crate) async fn read_entries(path: &Path) -> Result<Vec<OperatorEntry>, FetchError> {
    let json = fs::read_to_string(path).await.map_err(|source| FetchError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Writes the list to `path`, creating parent directories as needed.
pub(crate) async fn save_entries(path: &Path, entries: &[OperatorEntry]) -> Result<(), FetchError> {
    let io_error = |source| FetchError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json).await.map_err(io_error)?;
    Ok(())
}
