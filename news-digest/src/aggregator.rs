use crate::config::FilterConfig;
use crate::normalizer;
use crate::pipeline::AggregationPipeline;
use crate::traits::FeedSource;
use crate::types::{NewsItem, Result};
use std::time::Duration;
use tracing::{info, warn};

/// What one source contributed to a run.
#[derive(Debug)]
pub struct SourceReport {
    pub source_name: String,
    /// Number of normalized items, or why the source contributed nothing.
    pub outcome: Result<usize>,
}

impl SourceReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug)]
pub struct CollectOutcome {
    pub items: Vec<NewsItem>,
    pub reports: Vec<SourceReport>,
}

impl CollectOutcome {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.reports.iter().filter(|report| !report.succeeded())
    }
}

/// Pulls every source in order and runs the aggregation pipeline over the result.
pub struct NewsAggregator {
    sources: Vec<Box<dyn FeedSource>>,
    pipeline: AggregationPipeline,
    pause: Duration,
}

impl NewsAggregator {
    pub fn new(sources: Vec<Box<dyn FeedSource>>, filter: &FilterConfig, pause: Duration) -> Self {
        Self {
            sources,
            pipeline: AggregationPipeline::new(filter),
            pause,
        }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub async fn collect(&self) -> CollectOutcome {
        let mut per_source = Vec::with_capacity(self.sources.len());
        let mut reports = Vec::with_capacity(self.sources.len());

        info!("Fetching {} sources", self.sources.len());

        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let source_name = source.source_name();
            let outcome = match source.pull().await {
                Ok(entries) => {
                    let items = normalizer::normalize_all(&entries, &source_name);
                    info!("{}: {} entries, {} usable items", source_name, entries.len(), items.len());
                    let count = items.len();
                    per_source.push(items);
                    Ok(count)
                }
                Err(e) => {
                    warn!("{}: fetch failed, contributing nothing: {}", source_name, e);
                    per_source.push(Vec::new());
                    Err(e)
                }
            };

            reports.push(SourceReport { source_name, outcome });
        }

        let succeeded = reports.iter().filter(|r| r.succeeded()).count();
        info!("Fetched {}/{} sources successfully", succeeded, reports.len());

        CollectOutcome {
            items: self.pipeline.run(per_source),
            reports,
        }
    }
}
