//! Random pacing between documents.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Mixed into the run seed so pacing draws never disturb document content.
const THROTTLE_STREAM: u64 = 0x7468_726f_7474_6c65;

/// Sleeps a uniformly random time in `[0, max_millis)` between documents.
///
/// This bounds throughput statistically; it is not a rate limiter.
pub struct Throttle {
    rng: StdRng,
    max_millis: u64,
}

impl Throttle {
    pub fn new(max_millis: u64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed ^ THROTTLE_STREAM),
            max_millis,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        if self.max_millis == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.rng.gen_range(0..self.max_millis))
    }

    /// Sleep for the next delay unless `cancel` fires first.
    ///
    /// Returns the delay slept, or `None` when cancellation cut it short.
    pub async fn pause(&mut self, cancel: &CancellationToken) -> Option<Duration> {
        let delay = self.next_delay();
        trace!("Pausing for {} ms", delay.as_millis());
        if delay.is_zero() {
            return (!cancel.is_cancelled()).then_some(delay);
        }

        tokio::select! {
            _ = cancel.cancelled() => None,
            _ = tokio::time::sleep(delay) => Some(delay),
        }
    }
}
