//! Frame scheduling: the display refresh signal as an awaitable.

use std::time::Duration;

use async_trait::async_trait;

/// The display's refresh signal.
///
/// The detection loop awaits `next_frame` between cycles, which throttles it
/// to display cadence and, because the inference step is awaited first, to
/// inference latency as well. Cancellation is not the scheduler's concern;
/// the loop re-checks its own state after every wait.
#[async_trait]
pub trait FrameScheduler: Send + Sync {
    /// Resolve when the next frame should be processed.
    async fn next_frame(&self);
}

/// Fixed-cadence scheduler backed by the tokio timer.
///
/// Stands in for a per-paint callback on targets without one. Missed ticks
/// are skipped, not bursted, so a slow cycle lowers the effective frame rate
/// instead of queuing work.
pub struct IntervalScheduler {
    period: Duration,
}

impl IntervalScheduler {
    /// Create a scheduler firing at the given period.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

#[async_trait]
impl FrameScheduler for IntervalScheduler {
    async fn next_frame(&self) {
        tokio::time::sleep(self.period).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn interval_scheduler_waits_the_period() {
        let scheduler = IntervalScheduler::new(Duration::from_millis(10));
        let start = Instant::now();
        scheduler.next_frame().await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
