//! Scanner tests, driven by stub resolvers.

use super::*;
use crate::initialization::{Cancelled, RateLimiter};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Deterministic resolver: fixed answers for known names, empty for the rest.
#[derive(Default)]
struct StubResolver {
    answers: HashMap<String, Vec<Ipv4Addr>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl StubResolver {
    fn with(answers: &[(&str, &[Ipv4Addr])]) -> Arc<Self> {
        Arc::new(Self {
            answers: answers
                .iter()
                .map(|(name, ips)| (name.to_string(), ips.to_vec()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_times(&self) -> Vec<Instant> {
        let mut times: Vec<Instant> = self.calls.lock().unwrap().iter().map(|c| c.1).collect();
        times.sort();
        times
    }
}

#[async_trait]
impl Resolve for StubResolver {
    async fn resolve_a(&self, fqdn: &str) -> Vec<Ipv4Addr> {
        self.calls
            .lock()
            .unwrap()
            .push((fqdn.to_string(), Instant::now()));
        self.answers.get(fqdn).cloned().unwrap_or_default()
    }
}

/// Resolver that never answers.
struct HangingResolver;

#[async_trait]
impl Resolve for HangingResolver {
    async fn resolve_a(&self, _fqdn: &str) -> Vec<Ipv4Addr> {
        std::future::pending().await
    }
}

/// Resolver whose lookups crash the worker.
struct PanickingResolver;

#[async_trait]
impl Resolve for PanickingResolver {
    async fn resolve_a(&self, fqdn: &str) -> Vec<Ipv4Addr> {
        panic!("resolver crashed on {fqdn}");
    }
}

/// Throttle that refuses every job.
struct ClosedThrottle;

#[async_trait]
impl Throttle for ClosedThrottle {
    async fn until_ready(&self, _cancel: &CancellationToken) -> Result<(), Cancelled> {
        Err(Cancelled)
    }
}

fn config(subdomains: &[&str], concurrency: usize) -> ScanConfig {
    ScanConfig {
        subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
        query_delay: Duration::ZERO,
        concurrency,
        ..Default::default()
    }
}

fn operators(count: u32) -> Vec<OperatorEntry> {
    (1..=count)
        .map(|mnc| OperatorEntry::new("310", format!("{mnc:03}"), format!("Operator {mnc}")))
        .collect()
}

fn result_set(results: &[ResolutionResult]) -> HashSet<(String, Vec<Ipv4Addr>, String)> {
    results
        .iter()
        .map(|r| (r.fqdn.clone(), r.ips.clone(), r.operator.clone()))
        .collect()
}

#[test]
fn test_build_jobs_is_full_cross_product() {
    let subdomains = vec!["ims".to_string(), "epdg.epc".to_string(), "bsf".to_string()];
    let jobs = build_jobs(&operators(4), &subdomains, "pub.3gppnetwork.org");
    assert_eq!(jobs.len(), 12);

    let unique: HashSet<&str> = jobs.iter().map(|j| j.fqdn.as_str()).collect();
    assert_eq!(unique.len(), 12);
    assert_eq!(jobs[0].fqdn, "ims.mnc001.mcc310.pub.3gppnetwork.org");
    assert_eq!(jobs[1].fqdn, "epdg.epc.mnc001.mcc310.pub.3gppnetwork.org");
    assert_eq!(jobs[0].operator, "Operator 1");
}

#[test]
fn test_build_jobs_skips_unparseable_codes() {
    let entries = vec![
        OperatorEntry::new("310", "1", "Good"),
        OperatorEntry::new("", "1", "No country"),
        OperatorEntry::new("310", "?", "Bad network"),
    ];
    let jobs = build_jobs(&entries, &["ims".to_string()], "example.org");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].operator, "Good");
}

#[test]
fn test_job_fqdn_matches_codes() {
    let jobs = build_jobs(
        &[OperatorEntry::new("0311", "0005", "Padded")],
        &["epdg.epc".to_string()],
        "pub.3gppnetwork.org",
    );
    let job = &jobs[0];
    assert_eq!(job.fqdn, "epdg.epc.mnc005.mcc311.pub.3gppnetwork.org");
    let parts = crate::domain::parse_fqdn(&job.fqdn).unwrap();
    assert_eq!((parts.mnc, parts.mcc), (job.mnc, job.mcc));
    assert_eq!(parts.label, job.subdomain);
}

#[tokio::test]
async fn test_end_to_end_single_operator() {
    let fqdn = "ims.mnc001.mcc310.pub.3gppnetwork.org";
    let resolver = StubResolver::with(&[(fqdn, &[Ipv4Addr::new(192, 0, 2, 1)])]);
    let scanner = Scanner::with_resolver(config(&["ims"], 4), resolver);

    let output = scanner
        .scan(
            &[OperatorEntry::new("310", "1", "Acme")],
            &CancellationToken::new(),
        )
        .await;

    assert!(!output.cancelled);
    assert_eq!(output.total_jobs, 1);
    assert_eq!(output.completed_jobs, 1);
    assert_eq!(output.results.len(), 1);
    let result = &output.results[0];
    assert_eq!(result.fqdn, fqdn);
    assert_eq!(result.ips, vec![Ipv4Addr::new(192, 0, 2, 1)]);
    assert_eq!(result.operator, "Acme");
    assert_eq!(result.subdomain, "ims");
    assert_eq!(result.mnc, 1);
    assert_eq!(result.mcc, 310);
}

#[tokio::test]
async fn test_empty_operator_list_terminates() {
    let scanner = Scanner::with_resolver(config(&["ims", "bsf"], 8), StubResolver::with(&[]));
    let output = tokio::time::timeout(
        Duration::from_secs(5),
        scanner.scan(&[], &CancellationToken::new()),
    )
    .await
    .expect("scan over an empty job stream must not hang");

    assert!(output.results.is_empty());
    assert_eq!(output.total_jobs, 0);
    assert!(!output.cancelled);
}

#[tokio::test]
async fn test_misses_are_dropped_not_errors() {
    let hit = "bsf.mnc002.mcc310.pub.3gppnetwork.org";
    let resolver = StubResolver::with(&[(hit, &[Ipv4Addr::new(198, 51, 100, 9)])]);
    let scanner = Scanner::with_resolver(config(&["ims", "bsf"], 3), resolver.clone());

    let output = scanner
        .scan(&operators(5), &CancellationToken::new())
        .await;

    assert_eq!(output.total_jobs, 10);
    assert_eq!(output.completed_jobs, 10);
    assert_eq!(output.results.len(), 1);
    assert_eq!(output.results[0].fqdn, hit);
    assert_eq!(resolver.calls.lock().unwrap().len(), 10);

    let outcomes = scanner.outcomes();
    assert_eq!(outcomes.get(JobOutcome::Resolved), 1);
    assert_eq!(outcomes.get(JobOutcome::Empty), 9);
    assert_eq!(outcomes.get(JobOutcome::Cancelled), 0);
}

#[tokio::test]
async fn test_concurrency_does_not_change_results() {
    let hits: Vec<(String, Vec<Ipv4Addr>)> = (1..=30u8)
        .step_by(3)
        .map(|mnc| {
            (
                format!("ims.mnc{mnc:03}.mcc310.pub.3gppnetwork.org"),
                vec![Ipv4Addr::new(192, 0, 2, mnc), Ipv4Addr::new(192, 0, 2, mnc + 100)],
            )
        })
        .collect();
    let answers: Vec<(&str, &[Ipv4Addr])> = hits
        .iter()
        .map(|(name, ips)| (name.as_str(), ips.as_slice()))
        .collect();

    let entries = operators(30);
    let serial = Scanner::with_resolver(config(&["ims", "gan"], 1), StubResolver::with(&answers))
        .scan(&entries, &CancellationToken::new())
        .await;
    let parallel =
        Scanner::with_resolver(config(&["ims", "gan"], 50), StubResolver::with(&answers))
            .scan(&entries, &CancellationToken::new())
            .await;

    assert_eq!(serial.results.len(), hits.len());
    assert_eq!(result_set(&serial.results), result_set(&parallel.results));
    assert_eq!(serial.results.len(), parallel.results.len(), "no duplicates");
}

#[tokio::test]
async fn test_scan_is_repeatable() {
    let fqdn = "gan.mnc003.mcc310.pub.3gppnetwork.org";
    let resolver = StubResolver::with(&[(fqdn, &[Ipv4Addr::new(203, 0, 113, 3)])]);
    let scanner = Scanner::with_resolver(config(&["gan"], 2), resolver);
    let cancel = CancellationToken::new();

    let first = scanner.scan(&operators(3), &cancel).await;
    let second = scanner.scan(&operators(3), &cancel).await;
    assert_eq!(result_set(&first.results), result_set(&second.results));
}

#[tokio::test]
async fn test_precancelled_scan_returns_without_work() {
    let resolver = StubResolver::with(&[]);
    let scanner = Scanner::with_resolver(config(&["ims"], 4), resolver.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let output = tokio::time::timeout(Duration::from_secs(5), scanner.scan(&operators(20), &cancel))
        .await
        .expect("cancelled scan must not hang");

    assert!(output.cancelled);
    assert!(output.results.len() <= output.completed_jobs);
    assert_eq!(output.completed_jobs, 0);
    assert!(resolver.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_abandons_in_flight_queries() {
    let scanner = Scanner::with_resolver(config(&["ims"], 4), Arc::new(HangingResolver));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let output = tokio::time::timeout(Duration::from_secs(5), scanner.scan(&operators(10), &cancel))
        .await
        .expect("workers blocked on the network must observe cancellation");

    assert!(output.cancelled);
    assert!(output.results.is_empty());
    assert_eq!(scanner.outcomes().get(JobOutcome::Cancelled), 4);
}

#[tokio::test]
async fn test_cancel_abandons_throttle_wait() {
    let scanner = Scanner::with_resolver(config(&["ims"], 3), StubResolver::with(&[]))
        .with_throttle(Arc::new(RateLimiter::new(Duration::from_secs(3600))));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let output = tokio::time::timeout(Duration::from_secs(5), scanner.scan(&operators(5), &cancel))
        .await
        .expect("workers waiting on the limiter must observe cancellation");

    // Only the first, immediate slot was granted
    assert_eq!(output.completed_jobs, 1);
    assert!(output.cancelled);
}

#[tokio::test]
async fn test_refused_throttle_counts_as_cancelled() {
    let resolver = StubResolver::with(&[]);
    let scanner = Scanner::with_resolver(config(&["ims"], 2), resolver.clone())
        .with_throttle(Arc::new(ClosedThrottle));

    let output = scanner
        .scan(&operators(4), &CancellationToken::new())
        .await;

    assert!(output.cancelled);
    assert!(resolver.calls.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_is_global_across_workers() {
    let delay = Duration::from_millis(100);
    let resolver = StubResolver::with(&[]);
    let scan_config = ScanConfig {
        query_delay: delay,
        ..config(&["ims", "bsf"], 6)
    };
    let scanner = Scanner::with_resolver(scan_config, resolver.clone());

    let output = scanner
        .scan(&operators(4), &CancellationToken::new())
        .await;
    assert_eq!(output.completed_jobs, 8);

    let times = resolver.call_times();
    assert_eq!(times.len(), 8);
    for pair in times.windows(2) {
        assert!(
            pair[1] - pair[0] >= delay,
            "queries {:?} apart with 6 workers",
            pair[1] - pair[0]
        );
    }
}

#[tokio::test]
async fn test_total_jobs_tracks_last_run() {
    let scanner = Scanner::with_resolver(config(&["ims", "bsf", "gan"], 2), StubResolver::with(&[]));
    scanner
        .scan(&operators(2), &CancellationToken::new())
        .await;
    assert_eq!(scanner.total_jobs().load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_worker_panic_is_not_reported_as_cancellation() {
    let scanner = Scanner::with_resolver(config(&["ims"], 2), Arc::new(PanickingResolver));

    let output = scanner
        .scan(&operators(3), &CancellationToken::new())
        .await;

    assert_eq!(output.failed_workers, 2);
    assert_eq!(output.completed_jobs, 0);
    assert!(!output.cancelled);
    assert!(output.results.is_empty());
}
