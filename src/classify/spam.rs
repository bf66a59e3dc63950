// Spam check: does a page advertise services?
//
// Pages selling coursework, "help" or custom orders crowd out real
// communities in search results. A single stop word in the page name or
// description is enough to reject it; there is no scoring.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::traits::PageClassifier;
use crate::vk::error::Result;
use crate::vk::{PageGateway, PageId, PageMetadata};

/// Marketing terms that mark a page as a service storefront.
pub const DEFAULT_STOP_WORDS: &[&str] = &["курсов", "помощь", "на заказ"];

/// Return the first stop word found in the page's name or description.
///
/// Matching is a case-insensitive substring test, so an empty stop word
/// matches every page. Configuration drops blank entries before they get
/// here.
pub fn find_stop_word<'a>(page: &PageMetadata, stop_words: &'a [String]) -> Option<&'a str> {
    let name = page.name.to_lowercase();
    let description = page.description.to_lowercase();

    stop_words
        .iter()
        .map(|w| w.as_str())
        .find(|w| {
            let w = w.to_lowercase();
            name.contains(&w) || description.contains(&w)
        })
}

/// Rejects pages whose name or description contains a stop word.
pub struct SpamClassifier {
    gateway: Arc<dyn PageGateway>,
    stop_words: Vec<String>,
}

impl SpamClassifier {
    pub fn new(gateway: Arc<dyn PageGateway>, stop_words: Vec<String>) -> Self {
        Self {
            gateway,
            stop_words,
        }
    }

    pub async fn is_spam(&self, page: PageId) -> Result<bool> {
        let metadata = self.gateway.page_metadata(page).await?;
        let hit = find_stop_word(&metadata, &self.stop_words);
        debug!(page = %page, name = %metadata.name, stop_word = ?hit, "Spam checked");
        Ok(hit.is_some())
    }
}

#[async_trait]
impl PageClassifier for SpamClassifier {
    fn name(&self) -> &str {
        "spam"
    }

    async fn is_rejected(&self, page: PageId) -> Result<bool> {
        self.is_spam(page).await
    }
}
