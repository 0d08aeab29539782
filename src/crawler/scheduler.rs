//! Request pacing
//!
//! The extraction pool dispatches one task per product URL, but outbound
//! requests must still respect the configured minimum interval. The pacer
//! hands out monotonically increasing time slots: every task reserves the
//! next slot before fetching, so the interval bounds the request rate no
//! matter how many workers are running.

use std::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Shared rate limiter for one crawl session
pub(crate) struct Pacer {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl Pacer {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Reserves the next request slot and waits until it arrives
    ///
    /// A zero interval disables pacing entirely.
    pub(crate) async fn wait_turn(&self) {
        if self.interval.is_zero() {
            return;
        }

        let slot = {
            let mut next = self.next_slot.lock().unwrap();
            let now = Instant::now();
            let slot = (*next).max(now);
            *next = slot + self.interval;
            slot
        };

        sleep_until(slot).await;
    }
}
