//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, timeouts, resolver endpoints)
//! - Run configuration types for scans and probes
//! - Boundary validation

mod constants;
mod types;
mod validation;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, ProbeConfig, ScanConfig, ScanMode};
pub use validation::{validate_probe, validate_query, validate_scan, validate_stats};
