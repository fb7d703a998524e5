pub mod rss_feed;

pub use rss_feed::RssFeedSource;

use crate::fetcher::Fetcher;
use crate::traits::FeedSource;
use crate::types::FeedEndpoint;
use std::sync::Arc;
use tracing::debug;

/// Build one source per enabled endpoint, sharing a single HTTP client.
pub fn from_endpoints(endpoints: &[FeedEndpoint], fetcher: Arc<Fetcher>) -> Vec<Box<dyn FeedSource>> {
    endpoints
        .iter()
        .filter(|endpoint| {
            if !endpoint.enabled {
                debug!("Source disabled, skipping: {}", endpoint.name);
            }
            endpoint.enabled
        })
        .map(|endpoint| Box::new(RssFeedSource::new(endpoint.clone(), fetcher.clone())) as Box<dyn FeedSource>)
        .collect()
}
