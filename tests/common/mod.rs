// Shared test fixtures: an in-memory gateway with call recording.
//
// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use pagescout::vk::error::Result;
use pagescout::vk::{PageGateway, PageId, PageMetadata, PostRecord, VkError};

/// Fixed "now" for liveness tests.
pub const NOW: i64 = 1_700_000_000;

pub fn fixed_now() -> i64 {
    NOW
}

/// A community-authored post with the given id and timestamp.
pub fn post(page: u64, id: u64, timestamp: i64) -> PostRecord {
    PostRecord {
        id,
        author_id: -(page as i64),
        text: format!("post {id} of {page}"),
        timestamp,
    }
}

/// Posts for `page` at the given timestamps, newest first as listed.
pub fn wall(page: u64, timestamps: &[i64]) -> Vec<PostRecord> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| post(page, 100 - i as u64, ts))
        .collect()
}

pub fn ids(raw: &[u64]) -> pagescout::vk::PageSet {
    raw.iter().copied().map(PageId).collect()
}

/// In-memory `PageGateway`. Unknown walls are empty; unknown metadata is
/// a request error, the same way VK answers for a missing group.
#[derive(Default)]
pub struct MockGateway {
    searches: HashMap<String, Vec<u64>>,
    walls: HashMap<u64, Vec<PostRecord>>,
    metadata: HashMap<u64, PageMetadata>,
    failing_searches: HashSet<String>,
    failing_walls: HashSet<u64>,
    failing_metadata: HashSet<u64>,
    pub search_calls: Mutex<Vec<(String, u32)>>,
    pub wall_calls: Mutex<Vec<(u64, u32)>>,
    pub metadata_calls: Mutex<Vec<u64>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, pages: &[u64]) -> Self {
        self.searches.insert(query.to_string(), pages.to_vec());
        self
    }

    pub fn with_wall(mut self, page: u64, posts: Vec<PostRecord>) -> Self {
        self.walls.insert(page, posts);
        self
    }

    pub fn with_page(mut self, page: u64, name: &str, description: &str) -> Self {
        self.metadata.insert(
            page,
            PageMetadata {
                id: PageId(page),
                name: name.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    /// Make the search for `query` fail at the transport level.
    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    /// Make `wall.get` for `page` fail with an API error.
    pub fn failing_wall(mut self, page: u64) -> Self {
        self.failing_walls.insert(page);
        self
    }

    pub fn failing_metadata(mut self, page: u64) -> Self {
        self.failing_metadata.insert(page);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.lock().unwrap().len()
            + self.wall_calls.lock().unwrap().len()
            + self.metadata_calls.lock().unwrap().len()
    }

    pub fn metadata_pages(&self) -> HashSet<u64> {
        self.metadata_calls.lock().unwrap().iter().copied().collect()
    }
}

#[async_trait]
impl PageGateway for MockGateway {
    async fn search_pages(&self, query: &str, count: u32) -> Result<Vec<PageId>> {
        self.search_calls
            .lock()
            .unwrap()
            .push((query.to_string(), count));

        if self.failing_searches.contains(query) {
            return Err(VkError::Transport("connection refused".to_string()));
        }

        Ok(self
            .searches
            .get(query)
            .map(|pages| {
                pages
                    .iter()
                    .take(count as usize)
                    .copied()
                    .map(PageId)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn wall_posts(&self, page: PageId, count: u32) -> Result<Vec<PostRecord>> {
        self.wall_calls.lock().unwrap().push((page.0, count));

        if self.failing_walls.contains(&page.0) {
            return Err(VkError::Request {
                code: 15,
                message: "Access denied: wall is disabled".to_string(),
            });
        }

        Ok(self
            .walls
            .get(&page.0)
            .map(|posts| posts.iter().take(count as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn page_metadata(&self, page: PageId) -> Result<PageMetadata> {
        self.metadata_calls.lock().unwrap().push(page.0);

        if self.failing_metadata.contains(&page.0) {
            return Err(VkError::Transport("operation timed out".to_string()));
        }

        self.metadata
            .get(&page.0)
            .cloned()
            .ok_or_else(|| VkError::invalid_parameter(format!("group {page} not found")))
    }
}
