use crate::types::{NewsItem, RawEntry};
use crate::utils::{markup, text};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Maximum summary length in characters.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Turn a raw feed entry into a [`NewsItem`], or `None` when the entry has no
/// usable title or link. Optional fields that fail to parse are dropped.
pub fn normalize(entry: &RawEntry, source_name: &str) -> Option<NewsItem> {
    let title = non_blank(entry.title.as_deref())?;
    let Some(link) = non_blank(entry.link.as_deref()) else {
        debug!("Skipping entry '{}' from {}: no link", title, source_name);
        return None;
    };

    let summary = non_blank(entry.summary.as_deref())
        .or_else(|| non_blank(entry.description.as_deref()))
        .map(|raw| text::truncate_chars(&markup::strip_tags(&raw), SUMMARY_MAX_CHARS))
        .unwrap_or_default();

    Some(NewsItem {
        title,
        link,
        summary,
        source_name: source_name.to_string(),
        published_at: pick_timestamp(entry.published.as_deref(), entry.updated.as_deref()),
    })
}

/// Normalize a whole feed, keeping feed order.
pub fn normalize_all(entries: &[RawEntry], source_name: &str) -> Vec<NewsItem> {
    let items: Vec<NewsItem> = entries
        .iter()
        .filter_map(|entry| normalize(entry, source_name))
        .collect();

    let skipped = entries.len() - items.len();
    if skipped > 0 {
        debug!("{}: skipped {} entries without title or link", source_name, skipped);
    }
    items
}

/// The published timestamp, unless the updated one is later.
fn pick_timestamp(published: Option<&str>, updated: Option<&str>) -> Option<DateTime<Utc>> {
    let published = published.and_then(parse_timestamp);
    let updated = updated.and_then(parse_timestamp);

    match (published, updated) {
        (Some(p), Some(u)) if u > p => Some(u),
        (Some(p), _) => Some(p),
        (None, u) => u,
    }
}

/// Parse an RFC 3339 or RFC 2822 timestamp; anything else is treated as absent.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| debug!("Ignoring malformed timestamp '{}': {}", value, e))
        .ok()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
