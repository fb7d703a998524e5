use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named syndication endpoint from the source registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEndpoint {
    pub name: String,
    pub url: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl FeedEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// One entry as handed over by a feed source, before normalization.
///
/// Every field is optional: feeds in the wild omit anything and everything.
/// Timestamps stay textual here (RFC 3339 or RFC 2822) so that a malformed
/// value can be dropped by the normalizer instead of failing the whole feed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub source_name: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItem {
    /// Lower-cased `title + " " + summary`, the text keyword filters look at.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }
}

/// The rendered output of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Digest {
    pub text: String,
    pub html: String,
    pub card: serde_json::Value,
    pub item_count: usize,
    pub date_label: String,
}

impl Digest {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

// Object style note:
// Everything here lives for a single run of a short lived process. Items are
// created from collaborator output, flow through the pipeline by value and
// are dropped once the digest has been delivered. Nothing is persisted.
