use crate::types::{Digest, RawEntry, Result};
use async_trait::async_trait;

/// A place news entries are pulled from (an RSS feed, an API, a fixture).
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name, carried into every item as `source_name`
    fn source_name(&self) -> String;

    /// Fetch the current entries. One attempt, no retries.
    async fn pull(&self) -> Result<Vec<RawEntry>>;
}

/// A sink a rendered digest is pushed to (chat webhook, email).
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    fn channel_name(&self) -> String;

    async fn deliver(&self, digest: &Digest) -> Result<()>;
}
