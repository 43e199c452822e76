//! Job stream construction.
//!
//! The job set is the full cross-product of operator entries and subdomain
//! labels, materialized before any worker starts.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use crate::domain::build_fqdn;
use crate::models::{OperatorEntry, ResolutionResult};

/// One (operator, subdomain) pair to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionJob {
    pub fqdn: String,
    pub subdomain: String,
    pub mnc: u32,
    pub mcc: u32,
    pub operator: String,
}

impl ResolutionJob {
    /// Turns a successful lookup into a result, stamped now.
    pub(crate) fn to_result(&self, ips: Vec<std::net::Ipv4Addr>) -> ResolutionResult {
        ResolutionResult {
            fqdn: self.fqdn.clone(),
            ips,
            subdomain: self.subdomain.clone(),
            mnc: self.mnc,
            mcc: self.mcc,
            operator: self.operator.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Builds one job per (entry, subdomain) pair, entry-major.
///
/// Entries whose MCC or MNC is not a decimal number are skipped.
pub fn build_jobs(
    entries: &[OperatorEntry],
    subdomains: &[String],
    parent_domain: &str,
) -> Vec<ResolutionJob> {
    let mut jobs = Vec::with_capacity(entries.len() * subdomains.len());
    for entry in entries {
        let (Some(mcc), Some(mnc)) = (entry.mcc_code(), entry.mnc_code()) else {
            log::debug!(
                "Skipping operator {:?}: unparseable codes mcc={:?} mnc={:?}",
                entry.operator,
                entry.mcc,
                entry.mnc
            );
            continue;
        };
        for subdomain in subdomains {
            jobs.push(ResolutionJob {
                fqdn: build_fqdn(subdomain, mnc, mcc, parent_domain),
                subdomain: subdomain.clone(),
                mnc,
                mcc,
                operator: entry.operator.clone(),
            });
        }
    }
    jobs
}

/// Fixed job list shared by all workers; each job is handed out exactly once.
#[derive(Debug)]
pub(crate) struct JobQueue {
    jobs: Vec<ResolutionJob>,
    cursor: AtomicUsize,
}

impl JobQueue {
    pub(crate) fn new(jobs: Vec<ResolutionJob>) -> Self {
        Self {
            jobs,
            cursor: AtomicUsize::new(0),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Claims the next unclaimed job, or `None` once the list is exhausted.
    pub(crate) fn next(&self) -> Option<&ResolutionJob> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.jobs.get(index)
    }
}
