use crate::traits::FeedSource;
use crate::types::{DigestError, FeedEndpoint, RawEntry, Result};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Generic RSS / Atom feed source
pub struct RssFeedSource {
    endpoint: FeedEndpoint,
    fetcher: Arc<Fetcher>,
}

impl RssFeedSource {
    pub fn new(endpoint: FeedEndpoint, fetcher: Arc<Fetcher>) -> Self {
        Self { endpoint, fetcher }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn source_name(&self) -> String {
        self.endpoint.name.clone()
    }

    async fn pull(&self) -> Result<Vec<RawEntry>> {
        info!("Pulling RSS feed: {} ({})", self.endpoint.name, self.endpoint.url);

        let content = self.fetcher.fetch_feed(&self.endpoint.url).await?;

        if !FeedParser::is_valid_feed_content(&content) {
            return Err(DigestError::Parse(format!(
                "{} did not return a feed document",
                self.endpoint.url
            )));
        }

        let parsed_feed = FeedParser::parse_feed(&content)?;
        info!(
            "{}: feed \"{}\" with {} entries",
            self.endpoint.name,
            parsed_feed.title.as_deref().unwrap_or("untitled"),
            parsed_feed.entries.len()
        );
        Ok(parsed_feed.entries)
    }
}
