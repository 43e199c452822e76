//! Command orchestration.
//!
//! One entry point per CLI command. Each takes a plain options struct, so
//! everything the binary does can also be driven from code. Status lines go to
//! the log; result listings go to stdout unless `quiet` is set.

mod fetch;
mod probe;
mod query;
mod scan;

pub use fetch::{load_operators, run_fetch, FetchOptions, FetchReport};
pub use probe::{run_probe, ProbeOptions, ProbeReport};
pub use query::{run_query, run_stats, QueryExport, QueryOptions, QueryTarget, StatsOptions};
pub use scan::{run_scan, run_scan_with, ScanOptions, ScanReport};
