//! gpp_scanner library: 3GPP operator infrastructure discovery
//!
//! Operators publish service endpoints (ePDG, IMS, BSF, GAN, XCAP) under the
//! 3GPP public domain as `<label>.mnc<MNC>.mcc<MCC>.pub.3gppnetwork.org`. This
//! library builds those names for every known operator, resolves them
//! concurrently under a global rate limit with resolver fallback, checks the
//! ones that exist for reachability, and stores, exports and summarizes the
//! results.
//!
//! # Example
//!
//! ```no_run
//! use gpp_scanner::{OperatorEntry, ScanConfig, Scanner};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = ScanConfig {
//!     subdomains: vec!["epdg.epc".to_string()],
//!     concurrency: 20,
//!     ..Default::default()
//! };
//! let operators = vec![OperatorEntry::new("310", "260", "T-Mobile USA")];
//!
//! let output = Scanner::new(config)
//!     .scan(&operators, &CancellationToken::new())
//!     .await;
//! for result in &output.results {
//!     println!("{} -> {:?}", result.fqdn, result.ips);
//! }
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
mod domain;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
mod models;
pub mod probe;
pub mod run;
pub mod scanner;
pub mod stats;
pub mod storage;

// Re-export public API
pub use cli::{execute, Cli, RunStatus};
pub use config::{ProbeConfig, ScanConfig, ScanMode};
pub use domain::{build_fqdn, parse_fqdn, FqdnParts};
pub use models::{OperatorEntry, ProbeMethod, ProbeResult, ResolutionResult, Stats};
pub use probe::{ProbeOutput, Prober};
pub use run::{run_fetch, run_probe, run_query, run_scan, run_stats};
pub use scanner::{ScanOutput, Scanner};
