use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::config::{DEFAULT_MCC_MNC_URL, MCC_MNC_CACHE_TTL};
use crate::fetch::{fetch_from_file, OperatorFetcher};
use crate::initialization::init_client;
use crate::models::OperatorEntry;

/// Where the operator list comes from.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Directory holding `mcc-mnc-list.json`
    pub cache_dir: PathBuf,
    /// List URL
    pub url: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("."),
            url: DEFAULT_MCC_MNC_URL.to_string(),
        }
    }
}

/// Results of a `fetch-mccmnc` run.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub entries: usize,
    pub cache_path: PathBuf,
}

fn fetcher(options: &FetchOptions, ttl: Duration) -> Result<OperatorFetcher> {
    let client = init_client().context("Failed to initialize HTTP client")?;
    Ok(OperatorFetcher::new(client, &options.cache_dir)
        .with_url(&options.url)
        .with_cache_ttl(ttl))
}

/// Loads operators from a local file if given, else from the cached download.
pub async fn load_operators(
    mccmnc_file: Option<&std::path::Path>,
    options: &FetchOptions,
) -> Result<Vec<OperatorEntry>> {
    let entries = match mccmnc_file {
        Some(path) => fetch_from_file(path).await,
        None => fetcher(options, MCC_MNC_CACHE_TTL)?.fetch().await,
    }
    .context("Failed to fetch MCC-MNC list")?;
    Ok(entries)
}

/// Downloads the operator list regardless of cache age and saves it.
///
/// A stale cache is still used if the download fails.
pub async fn run_fetch(options: &FetchOptions) -> Result<FetchReport> {
    let fetcher = fetcher(options, Duration::ZERO)?;
    let entries = fetcher
        .fetch()
        .await
        .context("Failed to fetch MCC-MNC list")?;
    let cache_path = fetcher.cache_path();
    info!("Successfully fetched {} entries", entries.len());
    info!("Saved to: {}", cache_path.display());
    Ok(FetchReport {
        entries: entries.len(),
        cache_path,
    })
}
