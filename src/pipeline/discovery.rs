// Page discovery: union the results of a fixed list of search queries.

use tracing::{debug, info};

use crate::vk::error::Result;
use crate::vk::{PageGateway, PageSet};

/// Default search terms.
pub const DEFAULT_QUERIES: &[&str] = &["программист", "программирование", "Python"];

/// How many search results are requested per query.
pub const DEFAULT_RESULTS_PER_QUERY: u32 = 20;

/// Run every query once and collect the distinct page ids.
///
/// Pages found by several queries appear once. The first failing query
/// aborts discovery: a silently incomplete candidate set would look
/// plausible downstream while being wrong.
pub async fn discover_pages(
    gateway: &dyn PageGateway,
    queries: &[String],
    results_per_query: u32,
) -> Result<PageSet> {
    let mut pages = PageSet::new();

    for query in queries {
        let found = gateway.search_pages(query, results_per_query).await?;
        debug!(query = %query, found = found.len(), "Search query returned");
        pages.extend(found);
    }

    info!(
        queries = queries.len(),
        pages = pages.len(),
        "Discovery complete"
    );

    Ok(pages)
}
