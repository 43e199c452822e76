//! Connectivity probing.
//!
//! A flat list of names is checked by a fixed pool of workers, one liveness
//! probe per name, with no rate limiting. Unlike DNS misses, every failed probe
//! is kept as a `ProbeResult` with the reason in `error`.

mod icmp;
mod tcp;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::config::ProbeConfig;
use crate::error_handling::{OutcomeStats, ProbeOutcome};
use crate::models::{ProbeMethod, ProbeResult};

pub use icmp::probe_icmp;
pub use tcp::probe_tcp;

/// What a probe run produced.
#[derive(Debug, Clone, Default)]
pub struct ProbeOutput {
    /// One result per probed name, in completion order
    pub results: Vec<ProbeResult>,
    /// Number of names submitted
    pub total: usize,
    /// The run was cut short before every name was probed
    pub cancelled: bool,
    /// Workers that panicked; their unprobed names are lost
    pub failed_workers: usize,
}

/// One liveness check against one name.
///
/// Implementations report failure inside the `ProbeResult`, never by erroring.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, fqdn: &str) -> ProbeResult;
}

/// The configured TCP or ICMP check.
struct MethodProbe {
    config: Arc<ProbeConfig>,
}

#[async_trait]
impl Probe for MethodProbe {
    async fn probe(&self, fqdn: &str) -> ProbeResult {
        match self.config.method {
            ProbeMethod::Tcp => probe_tcp(fqdn, &self.config.tcp_ports, self.config.timeout).await,
            ProbeMethod::Icmp => probe_icmp(fqdn, self.config.timeout).await,
        }
    }
}

/// Runs ICMP or TCP probes over a worker pool.
pub struct Prober {
    config: Arc<ProbeConfig>,
    probe: Arc<dyn Probe>,
    outcomes: Arc<OutcomeStats<ProbeOutcome>>,
}

impl Prober {
    pub fn new(config: ProbeConfig) -> Self {
        let config = Arc::new(config);
        let probe = Arc::new(MethodProbe {
            config: Arc::clone(&config),
        });
        Self {
            config,
            probe,
            outcomes: Arc::new(OutcomeStats::new()),
        }
    }

    /// Builds a prober around an existing check; `config.method` is ignored.
    pub fn with_probe(config: ProbeConfig, probe: Arc<dyn Probe>) -> Self {
        Self {
            config: Arc::new(config),
            probe,
            outcomes: Arc::new(OutcomeStats::new()),
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Outcome counters, cumulative across runs of this prober.
    pub fn outcomes(&self) -> Arc<OutcomeStats<ProbeOutcome>> {
        Arc::clone(&self.outcomes)
    }

    /// Probes a single name with the configured method.
    pub async fn probe_one(&self, fqdn: &str) -> ProbeResult {
        self.probe.probe(fqdn).await
    }

    /// Probes every name, `config.workers` at a time.
    ///
    /// In-flight probes are abandoned when `cancel` fires; names never probed
    /// produce no result.
    pub async fn probe_all(&self, fqdns: &[String], cancel: &CancellationToken) -> ProbeOutput {
        let names: Arc<[String]> = fqdns.into();
        let cursor = Arc::new(AtomicUsize::new(0));
        log::info!(
            "Probing {} names via {} with {} workers",
            names.len(),
            self.config.method,
            self.config.workers
        );

        let mut tasks = FuturesUnordered::new();
        for _ in 0..self.config.workers {
            let names = Arc::clone(&names);
            let cursor = Arc::clone(&cursor);
            let probe = Arc::clone(&self.probe);
            let verbose = self.config.verbose;
            let outcomes = Arc::clone(&self.outcomes);
            let cancel = cancel.clone();
            tasks.push(tokio::spawn(async move {
                let mut results = Vec::new();
                while !cancel.is_cancelled() {
                    let Some(fqdn) = names.get(cursor.fetch_add(1, Ordering::Relaxed)) else {
                        break;
                    };
                    let result = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            outcomes.increment(ProbeOutcome::Cancelled);
                            break;
                        }
                        result = probe.probe(fqdn) => result,
                    };
                    outcomes.increment(if result.success {
                        ProbeOutcome::Reachable
                    } else {
                        ProbeOutcome::Unreachable
                    });
                    log_probe(&result, verbose);
                    results.push(result);
                }
                results
            }));
        }

        let mut results = Vec::with_capacity(names.len());
        let mut failed_workers = 0;
        while let Some(task_result) = tasks.next().await {
            match task_result {
                Ok(worker_results) => results.extend(worker_results),
                Err(join_error) => {
                    failed_workers += 1;
                    log::error!("Probe worker panicked: {:?}", join_error);
                }
            }
        }

        let cancelled =
            results.len() < names.len() && (failed_workers == 0 || cancel.is_cancelled());
        if cancelled {
            log::warn!("Probe interrupted after {}/{} names", results.len(), names.len());
        }
        ProbeOutput {
            results,
            total: names.len(),
            cancelled,
            failed_workers,
        }
    }
}

fn log_probe(result: &ProbeResult, verbose: bool) {
    if result.success {
        log::info!(
            "{} is up ({}, {:.2}ms)",
            result.fqdn,
            result.ip.as_deref().unwrap_or("-"),
            result.latency_ms()
        );
    } else if verbose {
        log::info!(
            "{} is down: {}",
            result.fqdn,
            result.error.as_deref().unwrap_or("unknown error")
        );
    } else {
        log::debug!(
            "{} is down: {}",
            result.fqdn,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
}

/// Applies the presentation policy: everything when `keep_all`, else successes only.
pub fn filter_probe_results(results: Vec<ProbeResult>, keep_all: bool) -> Vec<ProbeResult> {
    if keep_all {
        results
    } else {
        results.into_iter().filter(|r| r.success).collect()
    }
}
