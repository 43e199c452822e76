//! End-of-run outcome summaries.

use std::fmt::Display;
use std::hash::Hash;

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::OutcomeStats;

/// Logs the non-zero outcome counters under `title`.
pub fn print_outcome_statistics<K>(title: &str, stats: &OutcomeStats<K>)
where
    K: IntoEnumIterator + Copy + Eq + Hash + std::fmt::Debug + Display,
{
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("{} ({} total):", title, total);
    for outcome in K::iter() {
        let count = stats.get(outcome);
        if count > 0 {
            info!("   {}: {}", outcome, count);
        }
    }
}
