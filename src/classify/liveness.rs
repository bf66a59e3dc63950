// Liveness check: is a page still posting?
//
// A page is dead when its newest post is a day old or more. Recency alone
// misses pages that dump a burst of posts and then go quiet, so the older
// part of the sample is checked for day-long gaps as well. The two newest
// posts are left out of that gap check to tolerate a fresh burst.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::traits::PageClassifier;
use crate::vk::error::Result;
use crate::vk::{PageGateway, PageId, PostRecord};

/// One day in seconds. Gaps at or above this count as silence.
pub const DAY_SECONDS: i64 = 24 * 60 * 60;

/// How many recent posts are sampled per page.
pub const DEFAULT_SAMPLE_SIZE: u32 = 5;

/// Number of newest posts exempt from the pairwise gap check.
const EXEMPT_NEWEST: usize = 2;

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn is_less_than_day(seconds: u64) -> bool {
    seconds < DAY_SECONDS as u64
}

/// Apply the liveness rule to `posts` (in API order, newest first) at time `now`.
///
/// 1. Dead if the newest post, by timestamp, is `DAY_SECONDS` or more before `now`.
/// 2. Dead if any two adjacent posts from index 2 onward are `DAY_SECONDS`
///    or more apart.
/// 3. Live otherwise.
///
/// A page with no posts at all is dead. With three or fewer posts only
/// rule 1 can fire. A newest post stamped in the future counts as fresh.
pub fn is_dead_at(posts: &[PostRecord], now: i64) -> bool {
    let Some(newest) = posts.iter().map(|p| p.timestamp).max() else {
        return true;
    };

    let since_newest = now.saturating_sub(newest).max(0).unsigned_abs();
    if !is_less_than_day(since_newest) {
        return true;
    }

    posts
        .get(EXEMPT_NEWEST..)
        .unwrap_or_default()
        .windows(2)
        .any(|pair| !is_less_than_day(pair[0].timestamp.abs_diff(pair[1].timestamp)))
}

/// Rejects pages that look abandoned.
pub struct LivenessClassifier {
    gateway: Arc<dyn PageGateway>,
    sample_size: u32,
    clock: fn() -> i64,
}

impl LivenessClassifier {
    pub fn new(gateway: Arc<dyn PageGateway>, sample_size: u32) -> Self {
        Self {
            gateway,
            sample_size,
            clock: unix_now,
        }
    }

    /// Replace the wall clock, e.g. to pin "now" in tests.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Fetch the page's recent posts and apply `is_dead_at`.
    pub async fn is_dead(&self, page: PageId) -> Result<bool> {
        let posts = self.gateway.wall_posts(page, self.sample_size).await?;
        let dead = is_dead_at(&posts, (self.clock)());
        debug!(page = %page, sampled = posts.len(), dead, "Liveness checked");
        Ok(dead)
    }
}

#[async_trait]
impl PageClassifier for LivenessClassifier {
    fn name(&self) -> &str {
        "liveness"
    }

    async fn is_rejected(&self, page: PageId) -> Result<bool> {
        self.is_dead(page).await
    }
}
