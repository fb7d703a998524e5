pub mod card;
pub mod html;
pub mod text;

use crate::types::NewsItem;
use crate::utils::time;
use chrono::{DateTime, FixedOffset};

/// Shown instead of the item list when a run found nothing.
pub const EMPTY_MESSAGE: &str = "No major automotive news today.";

/// Everything a format renderer needs besides the items themselves.
pub struct ReportContext<'a> {
    pub title: &'a str,
    pub source_label: &'a str,
    pub card_template: &'a str,
    pub now: DateTime<FixedOffset>,
}

impl ReportContext<'_> {
    pub fn date_label(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }

    /// `"<title> - <date>"`
    pub fn headline(&self) -> String {
        format!("{} - {}", self.title, self.date_label())
    }

    pub fn published_label(&self, item: &NewsItem) -> String {
        time::relative_label(item.published_at, self.now)
    }
}
