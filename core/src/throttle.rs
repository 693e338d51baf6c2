//! Minimum spacing between outbound requests.
//!
//! # Design
//! The slot computation runs under a mutex and the sleep happens after the
//! lock is released. Each caller therefore reserves the next free slot and
//! waits for it on its own, and concurrent callers end up spaced by
//! `min_interval` in lock order. The guarantee holds per `Throttle` value
//! inside one process only.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Four requests per second, the ceiling OMIM publishes for its API.
pub const MIN_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MIN_INTERVAL)
    }
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Claim the next dispatch slot and return how long to wait for it.
    ///
    /// With `wait = last + min_interval - now`, the recorded dispatch time
    /// becomes `now + wait` when `wait` is positive and `now` otherwise.
    pub fn reserve(&self) -> Duration {
        let mut last = self.last_request.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let wait = match *last {
            Some(previous) => (previous + self.min_interval).saturating_duration_since(now),
            None => Duration::ZERO,
        };
        *last = Some(now + wait);
        wait
    }

    /// Block the calling thread until a request may be dispatched.
    pub fn wait(&self) {
        let wait = self.reserve();
        if !wait.is_zero() {
            tracing::trace!(wait_ms = wait.as_millis() as u64, "throttling request");
            thread::sleep(wait);
        }
    }
}
