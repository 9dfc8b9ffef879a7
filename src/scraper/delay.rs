//! Politeness delay between page fetches
//!
//! The delay is the scraper's only concurrency-control mechanism: requests
//! stay strictly sequential and each one is separated by a randomized pause
//! so the target never sees a machine-gun request pattern. The policy is
//! injectable so tests can run with no delay without altering orchestration.

use rand::Rng;
use std::time::Duration;

/// Lower bound of the randomized politeness interval (milliseconds)
pub const MIN_SLEEP_MS: u64 = 2000;

/// Strategy for waiting between successive page fetches
#[derive(Debug, Clone)]
pub enum DelayPolicy {
    /// Uniformly random whole-millisecond pause in `[MIN_SLEEP_MS, max_ms]`
    Random { max_ms: u64 },

    /// No pause at all (tests)
    Disabled,
}

impl DelayPolicy {
    /// Draws the next pause duration, or None when delays are disabled
    fn next_delay(&self) -> Option<Duration> {
        match self {
            DelayPolicy::Random { max_ms } => {
                let upper = (*max_ms).max(MIN_SLEEP_MS);
                let ms = rand::thread_rng().gen_range(MIN_SLEEP_MS..=upper);
                Some(Duration::from_millis(ms))
            }
            DelayPolicy::Disabled => None,
        }
    }

    /// Sleeps for one politeness interval
    ///
    /// Blocks the single logical thread of control; there is no cancellation
    /// path within an interval.
    pub async fn wait(&self) {
        if let Some(delay) = self.next_delay() {
            tracing::info!(
                "Safety random sleep has started for {:.3} sec",
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
            tracing::debug!("Safety random sleep is over");
        }
    }
}
