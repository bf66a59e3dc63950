// Read-only post store backed by the JSON file `collect` writes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A post as kept in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPost {
    /// Seconds since the Unix epoch.
    pub date: i64,
    pub text: String,
    pub link: String,
}

/// Posts addressed by sequential 1-based ids in file order.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<StoredPost>,
}

impl PostStore {
    pub fn new(posts: Vec<StoredPost>) -> Self {
        Self { posts }
    }

    /// Load a store from a JSON array of posts.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open post store {}", path.display()))?;
        let posts: Vec<StoredPost> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse post store {}", path.display()))?;
        Ok(Self { posts })
    }

    pub fn size(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by its 1-based id.
    pub fn load_by_id(&self, id: usize) -> Option<&StoredPost> {
        id.checked_sub(1).and_then(|index| self.posts.get(index))
    }

    /// Pick a post uniformly at random, or `None` when the store is empty.
    pub fn random_post(&self) -> Option<&StoredPost> {
        if self.is_empty() {
            return None;
        }
        let id = rand::rng().random_range(1..=self.size());
        self.load_by_id(id)
    }
}
