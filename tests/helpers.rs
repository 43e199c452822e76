// Shared test helpers for operator lists, stub resolvers and scratch files.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gpp_scanner::dns::Resolve;
use gpp_scanner::{ScanConfig, Scanner};
use serde_json::json;

/// Writes an MCC-MNC list in the upstream JSON shape and returns its path.
#[allow(dead_code)] // Used by other test files
pub fn write_operator_list(dir: &Path, operators: &[(&str, &str, &str)]) -> PathBuf {
    let entries: Vec<_> = operators
        .iter()
        .map(|(mcc, mnc, operator)| {
            json!({
                "type": "National",
                "countryName": "Testland",
                "countryCode": "TL",
                "mcc": mcc,
                "mnc": mnc,
                "brand": operator,
                "operator": operator,
                "status": "Operational",
                "bands": null,
                "notes": null
            })
        })
        .collect();
    let path = dir.join("mcc-mnc-list.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&entries).unwrap())
        .expect("Failed to write operator list");
    path
}

/// Resolver with fixed answers; every other name is a miss.
#[allow(dead_code)]
pub struct StubResolver {
    answers: HashMap<String, Vec<Ipv4Addr>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubResolver {
    pub fn new(answers: &[(&str, &[Ipv4Addr])]) -> Arc<Self> {
        Arc::new(Self {
            answers: answers
                .iter()
                .map(|(name, ips)| (name.to_string(), ips.to_vec()))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of lookups made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolve for StubResolver {
    async fn resolve_a(&self, fqdn: &str) -> Vec<Ipv4Addr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers.get(fqdn).cloned().unwrap_or_default()
    }
}

/// Scanner over `resolver` with no rate limit.
#[allow(dead_code)]
pub fn stub_scanner(subdomains: &[&str], resolver: Arc<StubResolver>) -> Scanner {
    let config = ScanConfig {
        subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
        query_delay: std::time::Duration::ZERO,
        concurrency: 4,
        ..Default::default()
    };
    Scanner::with_resolver(config, resolver)
}

/// Writes one line per name and returns the file path.
#[allow(dead_code)]
pub fn write_fqdn_file(dir: &Path, fqdns: &[&str]) -> PathBuf {
    let path = dir.join("fqdns.txt");
    std::fs::write(&path, fqdns.join("\n") + "\n").expect("Failed to write FQDN list");
    path
}
