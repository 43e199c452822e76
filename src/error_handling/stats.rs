//! Outcome statistics tracking.
//!
//! This module provides thread-safe counters for per-job outcomes while a worker
//! pool runs.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

/// Thread-safe outcome counters keyed by an outcome enum.
///
/// Every variant of `K` is initialized to zero on creation, so counting never
/// allocates and can be shared across tasks behind an `Arc`.
#[derive(Debug)]
pub struct OutcomeStats<K>
where
    K: IntoEnumIterator + Copy + Eq + Hash,
{
    counts: HashMap<K, AtomicUsize>,
}

impl<K> OutcomeStats<K>
where
    K: IntoEnumIterator + Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        let counts = K::iter().map(|k| (k, AtomicUsize::new(0))).collect();
        OutcomeStats { counts }
    }

    /// Increment the counter for `outcome`.
    pub fn increment(&self, outcome: K) {
        if let Some(counter) = self.counts.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in OutcomeStats initialization.",
                outcome
            );
        }
    }

    pub fn get(&self, outcome: K) -> usize {
        self.counts
            .get(&outcome)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across all outcomes.
    pub fn total(&self) -> usize {
        self.counts.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }
}

impl<K> Default for OutcomeStats<K>
where
    K: IntoEnumIterator + Copy + Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
