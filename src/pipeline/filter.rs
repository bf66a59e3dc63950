// Filter stage: keep the pages a classifier does not reject.
//
// Calls run through a bounded `buffer_unordered` pool. With a concurrency
// of 1 this is the plain sequential loop. Each page is checked exactly
// once, and `try_collect` stops at the first error and drops whatever is
// still in flight, so a failed check never turns into a silent omission.

use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::classify::traits::PageClassifier;
use crate::vk::error::Result;
use crate::vk::{PageId, PageSet, VkError};

/// Apply `classifier` to every page and return the survivors.
pub async fn filter_pages(
    pages: &PageSet,
    classifier: &dyn PageClassifier,
    concurrency: usize,
) -> Result<PageSet> {
    filter_pages_with_progress(pages, classifier, concurrency, &ProgressBar::hidden()).await
}

/// Same as `filter_pages`, ticking `progress` once per checked page.
pub async fn filter_pages_with_progress(
    pages: &PageSet,
    classifier: &dyn PageClassifier,
    concurrency: usize,
    progress: &ProgressBar,
) -> Result<PageSet> {
    let verdicts: Vec<(PageId, bool)> = stream::iter(pages.iter().copied().map(|page| async move {
        let rejected = classifier.is_rejected(page).await?;
        progress.inc(1);
        Ok::<_, VkError>((page, rejected))
    }))
    .buffer_unordered(concurrency.max(1))
    .try_collect()
    .await?;

    let mut kept = PageSet::new();
    for (page, rejected) in verdicts {
        if rejected {
            warn!(page = %page, classifier = classifier.name(), "Page rejected");
        } else {
            kept.insert(page);
        }
    }

    info!(
        classifier = classifier.name(),
        checked = pages.len(),
        kept = kept.len(),
        "Filter stage complete"
    );

    Ok(kept)
}
