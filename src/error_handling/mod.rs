//! Error handling and outcome statistics.
//!
//! This module provides:
//! - Error type definitions for each library boundary
//! - Outcome categories for resolution jobs and probes
//! - Thread-safe outcome counters
//!
//! Per-job failures never surface as errors: a DNS miss is counted and dropped,
//! a probe failure is recorded in its `ProbeResult`.

mod stats;
mod types;

// Re-export public API
pub use stats::OutcomeStats;
pub use types::{
    ConfigError, DatabaseError, EndpointError, ExportError, FetchError, InitializationError,
    JobOutcome, ProbeOutcome,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strum::IntoEnumIterator;

    #[test]
    fn test_outcome_stats_initialization() {
        let stats = OutcomeStats::<JobOutcome>::new();
        for outcome in JobOutcome::iter() {
            assert_eq!(stats.get(outcome), 0);
        }
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_outcome_stats_increment() {
        let stats = OutcomeStats::<JobOutcome>::new();
        stats.increment(JobOutcome::Resolved);
        stats.increment(JobOutcome::Empty);
        stats.increment(JobOutcome::Empty);
        assert_eq!(stats.get(JobOutcome::Resolved), 1);
        assert_eq!(stats.get(JobOutcome::Empty), 2);
        assert_eq!(stats.get(JobOutcome::Cancelled), 0);
        assert_eq!(stats.total(), 3);
    }

    #[tokio::test]
    async fn test_outcome_stats_concurrent_increments() {
        let stats = Arc::new(OutcomeStats::<ProbeOutcome>::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    stats.increment(ProbeOutcome::Reachable);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(stats.get(ProbeOutcome::Reachable), 800);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(JobOutcome::Empty.to_string(), "No A record");
        assert_eq!(ProbeOutcome::Unreachable.to_string(), "Unreachable");
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::MissingSubdomains.to_string(),
            "--subdomains required for custom mode"
        );
        assert_eq!(
            ConfigError::IncompleteCodePair.to_string(),
            "--mnc and --mcc must be used together"
        );
    }
}
