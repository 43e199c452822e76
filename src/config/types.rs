//! Configuration types.
//!
//! This module defines the enums and structs that carry run configuration into the
//! scanner and prober. They can be constructed programmatically without any CLI.

use std::net::SocketAddr;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    ALL_SUBDOMAINS, DEFAULT_CONCURRENCY, DEFAULT_PARENT_DOMAIN, DEFAULT_PROBE_TIMEOUT_MS,
    DEFAULT_PROBE_WORKERS, DEFAULT_QUERY_DELAY_MS, DEFAULT_RESOLVERS, DEFAULT_TCP_PORTS,
    DNS_QUERY_TIMEOUT_SECS,
};
use crate::models::ProbeMethod;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which service labels a scan covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScanMode {
    /// ims, epdg.epc, bsf, gan and xcap.ims
    All,
    /// epdg.epc only
    Epdg,
    /// ims only
    Ims,
    /// bsf only
    Bsf,
    /// gan only
    Gan,
    /// xcap.ims only
    Xcap,
    /// Labels given with `--subdomains`
    Custom,
}

impl ScanMode {
    /// Subdomain labels for this mode.
    ///
    /// `custom` is the comma-separated list, trimmed with empty entries dropped.
    pub fn subdomains(&self, custom: Option<&str>) -> Vec<String> {
        let fixed: &[&str] = match self {
            ScanMode::All => ALL_SUBDOMAINS,
            ScanMode::Epdg => &["epdg.epc"],
            ScanMode::Ims => &["ims"],
            ScanMode::Bsf => &["bsf"],
            ScanMode::Gan => &["gan"],
            ScanMode::Xcap => &["xcap.ims"],
            ScanMode::Custom => {
                return custom
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
        };
        fixed.iter().map(|s| s.to_string()).collect()
    }
}

/// Read-only configuration for one DNS scan.
///
/// # Examples
///
/// ```no_run
/// use gpp_scanner::ScanConfig;
/// use std::time::Duration;
///
/// let config = ScanConfig {
///     subdomains: vec!["epdg.epc".to_string()],
///     query_delay: Duration::from_millis(250),
///     concurrency: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Suffix appended after the `mcc` group
    pub parent_domain: String,

    /// Service labels, each combined with every operator
    pub subdomains: Vec<String>,

    /// Minimum spacing between queries across all workers (zero disables limiting)
    pub query_delay: Duration,

    /// Number of concurrent workers
    pub concurrency: usize,

    /// Log every discovered name at info level
    pub verbose: bool,

    /// Resolver endpoints, tried in order
    pub resolvers: Vec<SocketAddr>,

    /// Timeout for a single query against a single endpoint
    pub query_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parent_domain: DEFAULT_PARENT_DOMAIN.to_string(),
            subdomains: ScanMode::All.subdomains(None),
            query_delay: Duration::from_millis(DEFAULT_QUERY_DELAY_MS),
            concurrency: DEFAULT_CONCURRENCY,
            verbose: false,
            resolvers: DEFAULT_RESOLVERS.to_vec(),
            query_timeout: Duration::from_secs(DNS_QUERY_TIMEOUT_SECS),
        }
    }
}

/// Configuration for a connectivity probe run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub method: ProbeMethod,

    /// Per-attempt timeout (per port for TCP)
    pub timeout: Duration,

    /// Number of concurrent workers
    pub workers: usize,

    /// Ports tried in order by the TCP probe
    pub tcp_ports: Vec<u16>,

    /// Keep failed probes in the presented results
    pub verbose: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            method: ProbeMethod::Icmp,
            timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            workers: DEFAULT_PROBE_WORKERS,
            tcp_ports: DEFAULT_TCP_PORTS.to_vec(),
            verbose: false,
        }
    }
}
