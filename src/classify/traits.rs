// Classifier trait: the swap-ready abstraction behind `filter_pages`.
//
// The filter pipeline only knows this trait, so liveness, spam, or any
// future check plugs in without touching the pipeline itself.

use async_trait::async_trait;

use crate::vk::error::Result;
use crate::vk::PageId;

/// A rejection predicate over pages.
#[async_trait]
pub trait PageClassifier: Send + Sync {
    /// Short label for logs and progress output (e.g. "liveness").
    fn name(&self) -> &str;

    /// Decide whether `page` should be dropped. Errors are never treated
    /// as a decision; they abort the stage.
    async fn is_rejected(&self, page: PageId) -> Result<bool>;
}

/// Adapts a plain function into a classifier.
///
/// Handy for ad-hoc filters and for exercising the pipeline in tests.
pub struct Predicate<F> {
    name: String,
    check: F,
}

impl<F> Predicate<F>
where
    F: Fn(PageId) -> Result<bool> + Send + Sync,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

#[async_trait]
impl<F> PageClassifier for Predicate<F>
where
    F: Fn(PageId) -> Result<bool> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_rejected(&self, page: PageId) -> Result<bool> {
        (self.check)(page)
    }
}
