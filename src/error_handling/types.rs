//! Error type definitions.
//!
//! This module defines the error enums returned at library boundaries and the
//! outcome categories counted while a pool runs.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Error types for loading the MCC-MNC reference list.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than 200 OK.
    #[error("unexpected status code: {0}")]
    Status(u16),

    /// Reading or writing a local file failed.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not a JSON array of entries.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure of a single A-record query against a single resolver endpoint.
///
/// Never escalated past the resolver client: the next endpoint is tried instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The endpoint did not answer within the per-query timeout.
    #[error("query timed out")]
    Timeout,

    /// The endpoint answered, but with no A records (NXDOMAIN or NODATA).
    #[error("no A records")]
    NoRecords,

    /// Any other transport or protocol failure.
    #[error("{0}")]
    Other(String),
}

/// Invalid command-line or programmatic configuration, rejected before any work starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--subdomains required for custom mode")]
    MissingSubdomains,

    #[error("--concurrency must be positive")]
    NonPositiveConcurrency,

    #[error("--file required")]
    MissingFile,

    #[error("--timeout must be positive")]
    NonPositiveTimeout,

    #[error("--workers must be positive")]
    NonPositiveWorkers,

    #[error("--mnc and --mcc must be used together")]
    IncompleteCodePair,

    #[error("either --mnc/--mcc or --operator required")]
    MissingQueryTarget,

    #[error("either --file or --db required")]
    MissingStatsSource,

    #[error("cannot specify both --file and --db")]
    ConflictingStatsSources,
}

/// Error types for writing results out.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported format (use {0})")]
    UnsupportedFormat(&'static str),
}

/// Terminal state of one resolution job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum JobOutcome {
    /// At least one address came back
    Resolved,
    /// Every endpoint failed or returned no addresses
    Empty,
    /// Abandoned because the run was cancelled
    Cancelled,
}

impl JobOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobOutcome::Resolved => "Resolved",
            JobOutcome::Empty => "No A record",
            JobOutcome::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable,
    Cancelled,
}

impl ProbeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Reachable => "Reachable",
            ProbeOutcome::Unreachable => "Unreachable",
            ProbeOutcome::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
