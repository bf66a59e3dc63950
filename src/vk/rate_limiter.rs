// Request spacing for the VK API.
//
// VK allows roughly three calls per second per access token and answers
// bursts with error 6 ("too many requests per second"). Nothing here
// retries; each `acquire` waits until at least one interval has passed
// since the previous call was let through.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// VK's documented per-token limit for user access tokens.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 3.0;

/// Spaces requests at a fixed minimum interval. Cheap to clone; clones
/// share the same schedule.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
}

struct RateLimiterInner {
    interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second` calls per second.
    /// A non-positive rate disables throttling.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            inner: Arc::new(Mutex::new(RateLimiterInner {
                interval,
                last_request: None,
            })),
        }
    }

    /// Wait until the next request is allowed.
    ///
    /// The lock is held across the sleep so concurrent callers queue up
    /// behind each other instead of all waking at the same instant.
    pub async fn acquire(&self) {
        let mut inner = self.inner.lock().await;

        if let Some(last) = inner.last_request {
            let elapsed = last.elapsed();
            if elapsed < inner.interval {
                tokio::time::sleep(inner.interval - elapsed).await;
            }
        }

        inner.last_request = Some(Instant::now());
    }
}
