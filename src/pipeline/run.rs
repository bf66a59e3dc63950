// Full discovery run: discover -> drop dead pages -> drop spam pages.
//
// The liveness stage runs first so the spam stage only fetches metadata
// for pages that are still active. Either order gives the same accepted
// set; this one makes fewer calls.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::discovery::{discover_pages, DEFAULT_QUERIES, DEFAULT_RESULTS_PER_QUERY};
use super::filter::filter_pages_with_progress;
use crate::classify::liveness::{LivenessClassifier, DEFAULT_SAMPLE_SIZE};
use crate::classify::spam::{SpamClassifier, DEFAULT_STOP_WORDS};
use crate::classify::traits::PageClassifier;
use crate::vk::error::Result;
use crate::vk::{PageGateway, PageSet};

/// Tunables for one run. The defaults are the stock query and stop-word lists.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub queries: Vec<String>,
    pub results_per_query: u32,
    pub sample_size: u32,
    pub stop_words: Vec<String>,
    /// Classifier calls in flight per stage. 1 means strictly sequential.
    pub concurrency: usize,
    /// Draw progress bars on stderr.
    pub show_progress: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            results_per_query: DEFAULT_RESULTS_PER_QUERY,
            sample_size: DEFAULT_SAMPLE_SIZE,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            concurrency: 1,
            show_progress: false,
        }
    }
}

/// What a successful run produced, stage by stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub discovered: usize,
    pub live: usize,
    pub accepted: PageSet,
}

/// Run discovery and both filter stages with the stock classifiers.
pub async fn discover_and_filter(
    gateway: Arc<dyn PageGateway>,
    settings: &PipelineSettings,
) -> Result<RunReport> {
    let liveness = LivenessClassifier::new(gateway.clone(), settings.sample_size);
    let spam = SpamClassifier::new(gateway.clone(), settings.stop_words.clone());
    run_stages(gateway.as_ref(), &liveness, &spam, settings).await
}

/// Run discovery followed by the two given filter stages in order.
pub async fn run_stages(
    gateway: &dyn PageGateway,
    first: &dyn PageClassifier,
    second: &dyn PageClassifier,
    settings: &PipelineSettings,
) -> Result<RunReport> {
    let discovered =
        discover_pages(gateway, &settings.queries, settings.results_per_query).await?;

    let live = run_stage(&discovered, first, settings).await?;
    let accepted = run_stage(&live, second, settings).await?;

    info!(
        discovered = discovered.len(),
        live = live.len(),
        accepted = accepted.len(),
        "Discovery run complete"
    );

    Ok(RunReport {
        discovered: discovered.len(),
        live: live.len(),
        accepted,
    })
}

async fn run_stage(
    pages: &PageSet,
    classifier: &dyn PageClassifier,
    settings: &PipelineSettings,
) -> Result<PageSet> {
    let pb = stage_progress(classifier.name(), pages.len(), settings.show_progress);
    let kept = filter_pages_with_progress(pages, classifier, settings.concurrency, &pb).await;
    pb.finish_and_clear();
    kept
}

fn stage_progress(label: &str, len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    let template = format!("  {label:<9} [{{bar:30}}] {{pos}}/{{len}} ({{eta}})");
    pb.set_style(
        ProgressStyle::with_template(&template).unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
