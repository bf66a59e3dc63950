// Gateway trait: the seam between the pipeline and the remote API.
//
// `VkClient` is the production implementation. Tests substitute an
// in-memory gateway so discovery and the classifiers run without network
// access. The access token is bound into the implementation at
// construction time, so no pipeline function has to thread it through.

use async_trait::async_trait;

use super::error::Result;
use super::types::{PageId, PageMetadata, PostRecord};

#[async_trait]
pub trait PageGateway: Send + Sync {
    /// Search for community pages matching `query`, returning at most
    /// `count` ids. One outbound call.
    async fn search_pages(&self, query: &str, count: u32) -> Result<Vec<PageId>>;

    /// Fetch up to `count` most recent posts authored by the page itself,
    /// in API order (newest first). May return fewer than requested.
    async fn wall_posts(&self, page: PageId, count: u32) -> Result<Vec<PostRecord>>;

    /// Fetch the name and description of a page.
    async fn page_metadata(&self, page: PageId) -> Result<PageMetadata>;
}
