//! MCC-MNC reference list loading.
//!
//! The operator list is downloaded over HTTP and cached on disk. A fresh cache
//! is used as-is; a stale cache is only used when the download fails.

mod cache;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{DEFAULT_MCC_MNC_URL, MCC_MNC_CACHE_FILE, MCC_MNC_CACHE_TTL};
use crate::error_handling::FetchError;
use crate::models::OperatorEntry;

/// Loads the operator list from a URL with a time-based file cache.
#[derive(Debug, Clone)]
pub struct OperatorFetcher {
    client: Arc<reqwest::Client>,
    url: String,
    cache_dir: PathBuf,
    cache_ttl: Duration,
}

impl OperatorFetcher {
    /// Creates a fetcher for the default list URL, caching into `cache_dir`.
    pub fn new(client: Arc<reqwest::Client>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            url: DEFAULT_MCC_MNC_URL.to_string(),
            cache_dir: cache_dir.into(),
            cache_ttl: MCC_MNC_CACHE_TTL,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets how long a cached list is trusted. Zero always downloads.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(MCC_MNC_CACHE_FILE)
    }

    /// Returns the operator list, preferring a fresh cache over the network.
    ///
    /// After a successful download the cache is rewritten (failure to write it
    /// only warns). If the download fails but a cache file exists, however old,
    /// that file is used instead.
    ///
    /// # Errors
    ///
    /// Returns the download error when there is no cache to fall back to, or a
    /// read/parse error for the cache file itself.
    pub async fn fetch(&self) -> Result<Vec<OperatorEntry>, FetchError> {
        let cache_path = self.cache_path();

        if cache::is_fresh(&cache_path, self.cache_ttl).await {
            info!("Using cached MCC-MNC list from {}", cache_path.display());
            return cache::read_entries(&cache_path).await;
        }

        info!("Fetching MCC-MNC list from {}", self.url);
        let error = match self.download().await {
            Ok(entries) => {
                match cache::save_entries(&cache_path, &entries).await {
                    Ok(()) => debug!("Cached {} entries at {}", entries.len(), cache_path.display()),
                    Err(e) => warn!("Failed to save MCC-MNC cache: {e}"),
                }
                return Ok(entries);
            }
            Err(e) => e,
        };

        if tokio::fs::try_exists(&cache_path).await.unwrap_or(false) {
            warn!("MCC-MNC download failed, using stale cache: {error}");
            return cache::read_entries(&cache_path).await;
        }
        Err(error)
    }

    /// Downloads and parses the list, bypassing the cache entirely.
    pub async fn download(&self) -> Result<Vec<OperatorEntry>, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Reads the operator list from a local JSON file instead of fetching it.
pub async fn fetch_from_file(path: &Path) -> Result<Vec<OperatorEntry>, FetchError> {
    info!("Reading MCC-MNC list from {}", path.display());
    cache::read_entries(path).await
}
