//! Scan worker loop.

use std::sync::Arc;

use log::Level;
use tokio_util::sync::CancellationToken;

use crate::dns::Resolve;
use crate::error_handling::{JobOutcome, OutcomeStats};
use crate::initialization::Throttle;

use super::aggregator::ResultAggregator;
use super::jobs::{JobQueue, ResolutionJob};

/// Everything one worker needs, injected at spawn time.
pub(crate) struct WorkerContext {
    pub(crate) jobs: Arc<JobQueue>,
    pub(crate) aggregator: Arc<ResultAggregator>,
    pub(crate) resolver: Arc<dyn Resolve>,
    pub(crate) throttle: Arc<dyn Throttle>,
    pub(crate) outcomes: Arc<OutcomeStats<JobOutcome>>,
    pub(crate) cancel: CancellationToken,
    pub(crate) verbose: bool,
}

/// Pulls jobs until the queue is empty or the run is cancelled.
///
/// Returns how many jobs this worker finished (resolved or empty).
pub(crate) async fn run_worker(ctx: WorkerContext) -> usize {
    let mut finished = 0;
    while !ctx.cancel.is_cancelled() {
        let Some(job) = ctx.jobs.next() else {
            break;
        };
        let outcome = resolve_job(&ctx, job).await;
        ctx.outcomes.increment(outcome);
        match outcome {
            JobOutcome::Resolved | JobOutcome::Empty => finished += 1,
            JobOutcome::Cancelled => break,
        }
    }
    finished
}

async fn resolve_job(ctx: &WorkerContext, job: &ResolutionJob) -> JobOutcome {
    if ctx.throttle.until_ready(&ctx.cancel).await.is_err() {
        return JobOutcome::Cancelled;
    }

    let ips = tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => return JobOutcome::Cancelled,
        ips = ctx.resolver.resolve_a(&job.fqdn) => ips,
    };

    if ips.is_empty() {
        log::trace!("{}: no A record", job.fqdn);
        return JobOutcome::Empty;
    }

    let level = if ctx.verbose {
        Level::Info
    } else {
        Level::Debug
    };
    log::log!(
        level,
        "Found {} -> {}",
        job.fqdn,
        ips.iter()
            .map(|ip| ip.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    ctx.aggregator.push(job.to_result(ips));
    JobOutcome::Resolved
}
