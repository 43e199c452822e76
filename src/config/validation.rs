//! Boundary validation for run configuration.
//!
//! Everything is checked here before a pool starts; the scanner and prober
//! assume validated input and never re-check it.

use std::path::Path;
use std::time::Duration;

use crate::config::types::{ProbeConfig, ScanConfig, ScanMode};
use crate::error_handling::ConfigError;

/// Validates scan settings.
///
/// Custom mode needs at least one label; concurrency must be positive. A
/// negative delay is unrepresentable (`Duration`), so no check is needed.
pub fn validate_scan(mode: ScanMode, config: &ScanConfig) -> Result<(), ConfigError> {
    if mode == ScanMode::Custom && config.subdomains.is_empty() {
        return Err(ConfigError::MissingSubdomains);
    }
    if config.concurrency == 0 {
        return Err(ConfigError::NonPositiveConcurrency);
    }
    Ok(())
}

/// Validates probe settings and the input file argument.
pub fn validate_probe(file: Option<&Path>, config: &ProbeConfig) -> Result<(), ConfigError> {
    if file.map_or(true, |f| f.as_os_str().is_empty()) {
        return Err(ConfigError::MissingFile);
    }
    if config.timeout == Duration::ZERO {
        return Err(ConfigError::NonPositiveTimeout);
    }
    if config.workers == 0 {
        return Err(ConfigError::NonPositiveWorkers);
    }
    Ok(())
}

/// Validates query arguments: a complete code pair, an operator name, or both.
pub fn validate_query(
    mnc: Option<u32>,
    mcc: Option<u32>,
    operator: Option<&str>,
) -> Result<(), ConfigError> {
    if mnc.is_some() != mcc.is_some() {
        return Err(ConfigError::IncompleteCodePair);
    }
    let has_operator = operator.is_some_and(|o| !o.is_empty());
    if mnc.is_none() && !has_operator {
        return Err(ConfigError::MissingQueryTarget);
    }
    Ok(())
}

/// Validates that exactly one statistics source was given.
pub fn validate_stats(file: Option<&Path>, db: Option<&Path>) -> Result<(), ConfigError> {
    match (file, db) {
        (None, None) => Err(ConfigError::MissingStatsSource),
        (Some(_), Some(_)) => Err(ConfigError::ConflictingStatsSources),
        _ => Ok(()),
    }
}
