//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::HTTP_FETCH_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used to download the MCC-MNC reference list.
///
/// Creates a `reqwest::Client` with a fixed overall timeout and a user agent
/// naming this tool, on the rustls TLS backend.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(HTTP_FETCH_TIMEOUT_SECS))
        .user_agent(concat!("gpp_scanner/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(Arc::new(client))
}
