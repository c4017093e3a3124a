//! TVmaze request pacing.

use std::time::{Duration, Instant};

/// Default minimum interval between requests.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(50);

/// Minimum-interval limiter shared by all requests of one client.
///
/// TVmaze allows at least 20 calls per 10 seconds per IP and answers 429
/// beyond that; concurrent page fetches queue here before hitting the wire.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvMazeRateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// Timestamp of the last released request.
    last_request: Option<Instant>,
}

impl TvMazeRateLimiter {
    /// Creates a limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Creates a limiter with the default interval (50ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Sleeps until the next request may be sent, then records it.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval.saturating_sub(elapsed)).await;
            }
        }

        self.last_request = Some(Instant::now());
    }
}
