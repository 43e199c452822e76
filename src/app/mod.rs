//! Application support used by the run layer.
//!
//! This module provides progress logging, shutdown handling, outcome summaries
//! and FQDN list input.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::{parse_fqdn_lines, read_fqdns_from_file};
pub use logging::{log_progress, spawn_progress_logger, Progress};
pub use shutdown::shutdown_gracefully;
pub use statistics::print_outcome_statistics;
