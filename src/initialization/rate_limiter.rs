//! Rate limiter initialization.
//!
//! This module provides the global query throttle shared by every scan worker.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Returned when a wait is abandoned because the run was cancelled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled")]
pub struct Cancelled;

/// A shared gate that workers pass through before every outbound query.
///
/// Implementations must return promptly with [`Cancelled`] once `cancel` fires,
/// even while waiting.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn until_ready(&self, cancel: &CancellationToken) -> Result<(), Cancelled>;
}

/// Interval rate limiter: at most one grant per `interval`, across all callers.
///
/// Equivalent to a token bucket of capacity one refilled every `interval`. Each
/// caller reserves the next free slot under a short lock, then sleeps outside the
/// lock until that slot arrives, so the spacing between any two grants is at
/// least `interval` no matter how many workers are waiting. The first grant is
/// immediate.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn reserve(&self) -> Instant {
        let now = Instant::now();
        // A poisoned lock only means another worker panicked mid-reservation;
        // the stored instant is still a valid slot.
        let mut next = self
            .next_slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let slot = (*next).max(now);
        *next = slot + self.interval;
        slot
    }

    /// Waits for the next grant, or returns [`Cancelled`] if `cancel` fires first.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        let slot = self.reserve();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Cancelled),
            _ = sleep_until(slot) => Ok(()),
        }
    }
}

#[async_trait]
impl Throttle for RateLimiter {
    async fn until_ready(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
        self.acquire(cancel).await
    }
}

/// Pass-through throttle used when the configured delay is zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unthrottled;

#[async_trait]
impl Throttle for Unthrottled {
    async fn until_ready(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
        if cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Initializes the global query rate limiter.
///
/// `delay` is the minimum spacing between queries for the whole pool (500ms means
/// roughly two queries per second in total, not per worker). A zero delay
/// disables limiting and returns `None`.
pub fn init_rate_limiter(delay: Duration) -> Option<Arc<RateLimiter>> {
    if delay.is_zero() {
        return None;
    }
    log::debug!(
        "Rate limiter: one query every {}ms across all workers",
        delay.as_millis()
    );
    Some(Arc::new(RateLimiter::new(delay)))
}
