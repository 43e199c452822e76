//! DNS enumeration worker pool.
//!
//! A scan expands operator entries into (operator, subdomain) jobs, hands them
//! to a fixed number of workers, throttles every query through one global rate
//! limiter, and collects the names that resolved.
//!
//! Workers stop pulling jobs as soon as the cancellation token fires. Whatever
//! resolved before that point is returned, and the output is flagged as
//! cancelled.

mod aggregator;
mod jobs;
mod worker;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::config::ScanConfig;
use crate::dns::{FallbackResolver, Resolve};
use crate::error_handling::{JobOutcome, OutcomeStats};
use crate::initialization::{init_rate_limiter, Throttle, Unthrottled};
use crate::models::{OperatorEntry, ResolutionResult};

use aggregator::ResultAggregator;
use jobs::JobQueue;
use worker::{run_worker, WorkerContext};

pub use jobs::{build_jobs, ResolutionJob};

/// What a scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Successful resolutions in completion order
    pub results: Vec<ResolutionResult>,
    /// Number of jobs in the run
    pub total_jobs: usize,
    /// Jobs that reached a terminal resolved or empty state
    pub completed_jobs: usize,
    /// The run was cut short before every job finished
    pub cancelled: bool,
    /// Workers that panicked; their unfinished jobs are lost
    pub failed_workers: usize,
}

/// The scan engine. Cheap to share behind an `Arc`; each call to
/// [`Scanner::scan`] is an independent run.
pub struct Scanner {
    config: ScanConfig,
    resolver: Arc<dyn Resolve>,
    throttle: Arc<dyn Throttle>,
    outcomes: Arc<OutcomeStats<JobOutcome>>,
    total_jobs: Arc<AtomicUsize>,
}

impl Scanner {
    /// Builds a scanner with hickory endpoints and a rate limiter from `config`.
    pub fn new(config: ScanConfig) -> Self {
        let resolver = Arc::new(FallbackResolver::from_config(&config));
        Self::with_resolver(config, resolver)
    }

    /// Builds a scanner around an existing resolver, rate limited per `config`.
    pub fn with_resolver(config: ScanConfig, resolver: Arc<dyn Resolve>) -> Self {
        let throttle: Arc<dyn Throttle> = match init_rate_limiter(config.query_delay) {
            Some(limiter) => limiter as Arc<dyn Throttle>,
            None => Arc::new(Unthrottled),
        };
        Self {
            config,
            resolver,
            throttle,
            outcomes: Arc::new(OutcomeStats::new()),
            total_jobs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replaces the throttle every worker passes through before querying.
    pub fn with_throttle(mut self, throttle: Arc<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Outcome counters, cumulative across runs of this scanner.
    pub fn outcomes(&self) -> Arc<OutcomeStats<JobOutcome>> {
        Arc::clone(&self.outcomes)
    }

    /// Job count of the current (or last) run, for progress reporting.
    pub fn total_jobs(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.total_jobs)
    }

    /// Resolves every (entry, subdomain) name and returns those with A records.
    ///
    /// Never fails: per-job DNS failures are dropped, and cancellation returns
    /// the partial result set with [`ScanOutput::cancelled`] set.
    pub async fn scan(&self, entries: &[OperatorEntry], cancel: &CancellationToken) -> ScanOutput {
        let jobs = Arc::new(JobQueue::new(build_jobs(
            entries,
            &self.config.subdomains,
            &self.config.parent_domain,
        )));
        let total_jobs = jobs.len();
        self.total_jobs.store(total_jobs, Ordering::SeqCst);
        log::info!(
            "Scanning {} names ({} operators x {} subdomains) with {} workers",
            total_jobs,
            entries.len(),
            self.config.subdomains.len(),
            self.config.concurrency
        );

        let aggregator = Arc::new(ResultAggregator::new());
        let mut tasks = FuturesUnordered::new();
        for _ in 0..self.config.concurrency {
            let ctx = WorkerContext {
                jobs: Arc::clone(&jobs),
                aggregator: Arc::clone(&aggregator),
                resolver: Arc::clone(&self.resolver),
                throttle: Arc::clone(&self.throttle),
                outcomes: Arc::clone(&self.outcomes),
                cancel: cancel.clone(),
                verbose: self.config.verbose,
            };
            tasks.push(tokio::spawn(run_worker(ctx)));
        }

        let mut completed_jobs = 0;
        let mut failed_workers = 0;
        while let Some(task_result) = tasks.next().await {
            match task_result {
                Ok(finished) => completed_jobs += finished,
                Err(join_error) => {
                    failed_workers += 1;
                    log::error!("Scan worker panicked: {:?}", join_error);
                }
            }
        }

        let results = aggregator.take();
        // Jobs lost to a crashed worker are not an interruption
        let cancelled =
            completed_jobs < total_jobs && (failed_workers == 0 || cancel.is_cancelled());
        if cancelled {
            log::warn!(
                "Scan interrupted after {}/{} names ({} found)",
                completed_jobs,
                total_jobs,
                results.len()
            );
        }

        ScanOutput {
            results,
            total_jobs,
            completed_jobs,
            cancelled,
            failed_workers,
        }
    }
}

#[cfg(test)]
mod tests;
