//! Pacing policies applied between groups of requests.
//!
//! The orchestrator calls [`Pacer::pause`] once between consecutive groups.
//! Production runs use [`FixedDelay`]; tests use [`NoDelay`] so they do not
//! sleep for real.

use std::future::Future;
use std::time::Duration;

/// Strategy deciding how long to wait before dispatching the next group.
pub trait Pacer {
    /// Wait before the next group. `concurrency` is the batch's group size.
    fn pause(&self, concurrency: usize) -> impl Future<Output = ()> + Send;
}

/// Unconditional fixed pause.
///
/// Grouped runs wait `between_groups`; sequential runs (`concurrency == 1`)
/// wait the longer `between_requests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    pub between_groups: Duration,
    pub between_requests: Duration,
}

impl FixedDelay {
    pub fn new(between_groups: Duration, between_requests: Duration) -> Self {
        Self {
            between_groups,
            between_requests,
        }
    }

    /// Delay applied for a given group size.
    pub fn delay_for(&self, concurrency: usize) -> Duration {
        if concurrency <= 1 {
            self.between_requests
        } else {
            self.between_groups
        }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(1))
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self, concurrency: usize) {
        let delay = self.delay_for(concurrency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Pacer for NoDelay {
    async fn pause(&self, _concurrency: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_delay_for_mode() {
        let pacer = FixedDelay::default();
        assert_eq!(pacer.delay_for(5), Duration::from_millis(500));
        assert_eq!(pacer.delay_for(1), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let pacer = FixedDelay::default();

        let start = Instant::now();
        pacer.pause(5).await;
        assert!(start.elapsed() >= Duration::from_millis(500));

        let start = Instant::now();
        pacer.pause(1).await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.pause(5).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_zero_delay_needs_no_timer() {
        // Zero pauses never touch the tokio timer, so a bare executor is enough.
        let pacer = FixedDelay::new(Duration::ZERO, Duration::ZERO);
        tokio_test::block_on(pacer.pause(1));
        tokio_test::block_on(pacer.pause(8));
        tokio_test::block_on(NoDelay.pause(8));
    }
}
