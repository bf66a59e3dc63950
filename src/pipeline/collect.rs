// Post collection: pull recent posts from accepted pages into a store.
//
// Each post is reduced to what the bot needs to show it: when it was
// posted, its text, and a link back to it on VK.

use tracing::{debug, info};

use crate::bot::store::StoredPost;
use crate::vk::error::Result;
use crate::vk::{PageGateway, PageSet, PostRecord};

/// Posts fetched per page when collecting.
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;

/// Public URL of a wall post. `author_id` keeps VK's sign convention,
/// so community posts link as `wall-<id>_<post>`.
pub fn post_link(author_id: i64, post_id: u64) -> String {
    format!("https://vk.com/wall{author_id}_{post_id}")
}

/// Reduce a post to its stored form.
pub fn strip_post(post: &PostRecord) -> StoredPost {
    StoredPost {
        date: post.timestamp,
        text: post.text.clone(),
        link: post_link(post.author_id, post.id),
    }
}

/// Fetch up to `posts_per_page` recent posts from every page.
///
/// Posts without text are skipped. Pages are visited in ascending id
/// order and the first failed fetch aborts the collection.
pub async fn collect_posts(
    gateway: &dyn PageGateway,
    pages: &PageSet,
    posts_per_page: u32,
) -> Result<Vec<StoredPost>> {
    let mut stored = Vec::new();

    for &page in pages {
        let posts = gateway.wall_posts(page, posts_per_page).await?;
        let before = stored.len();
        stored.extend(
            posts
                .iter()
                .filter(|p| !p.text.trim().is_empty())
                .map(strip_post),
        );
        debug!(page = %page, fetched = posts.len(), kept = stored.len() - before, "Collected posts");
    }

    info!(pages = pages.len(), posts = stored.len(), "Post collection complete");

    Ok(stored)
}
