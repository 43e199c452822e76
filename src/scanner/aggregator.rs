//! Shared result collection.

use std::sync::Mutex;

use crate::models::ResolutionResult;

/// Append-only result list guarded by a single mutex.
///
/// Results arrive in completion order. Each successful job appends exactly once.
#[derive(Debug, Default)]
pub(crate) struct ResultAggregator {
    results: Mutex<Vec<ResolutionResult>>,
}

impl ResultAggregator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, result: ResolutionResult) {
        // A panicking worker can't leave a half-written element behind, so a
        // poisoned list is still consistent.
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(result);
    }

    /// Takes everything collected so far.
    pub(crate) fn take(&self) -> Vec<ResolutionResult> {
        std::mem::take(
            &mut *self
                .results
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}
