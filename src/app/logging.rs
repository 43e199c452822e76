//! Progress logging utilities.

use std::time::{Duration, Instant};

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A point-in-time view of a running pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Items that reached a terminal state
    pub completed: usize,
    /// Items that produced something worth keeping
    pub found: usize,
    /// Items in the run
    pub total: usize,
}

/// Logs progress information about a scan or probe run.
///
/// # Arguments
///
/// * `noun` - What is being processed ("names", "probes")
/// * `start_time` - The start time of processing
/// * `progress` - Current counts
pub fn log_progress(noun: &str, start_time: Instant, progress: Progress) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        progress.completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} {} ({} found) in {:.2} seconds (~{:.2} {}/sec)",
        progress.completed, progress.total, noun, progress.found, elapsed_secs, rate, noun
    );
}

/// Spawns a task that logs `snapshot()` every `interval` until `cancel` fires.
///
/// The first line is logged after one full interval, not immediately.
pub fn spawn_progress_logger<F>(
    noun: &'static str,
    start_time: Instant,
    interval: Duration,
    cancel: CancellationToken,
    snapshot: F,
) -> JoinHandle<()>
where
    F: Fn() -> Progress + Send + 'static,
{
    tokio::task::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    log_progress(noun, start_time, snapshot());
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}
