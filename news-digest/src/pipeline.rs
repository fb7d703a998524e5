use crate::config::{ExclusionMode, FilterConfig};
use crate::types::NewsItem;
use std::collections::HashSet;
use tracing::{debug, info};

/// Merge, deduplicate, filter, sort and truncate the items of one run.
///
/// The steps always run in that order; changing it changes which duplicate
/// survives and which items make the cut.
pub struct AggregationPipeline {
    filter: KeywordFilter,
    max_items: usize,
}

impl AggregationPipeline {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: KeywordFilter::new(&config.include, &config.exclude, config.exclusion_mode),
            max_items: config.max_items,
        }
    }

    pub fn run(&self, per_source: Vec<Vec<NewsItem>>) -> Vec<NewsItem> {
        let merged: Vec<NewsItem> = per_source.into_iter().flatten().collect();
        let total = merged.len();

        let unique = deduplicate(merged);
        let unique_count = unique.len();

        let mut kept = self.filter.apply(unique);
        let kept_count = kept.len();

        sort_by_recency(&mut kept);
        kept.truncate(self.max_items);

        info!(
            "Aggregated {} items: {} unique, {} after keyword filter, {} kept (max {})",
            total,
            unique_count,
            kept_count,
            kept.len(),
            self.max_items
        );
        kept
    }
}

/// Drop items whose trimmed, lower-cased link (or title, if the link is
/// empty) was already seen. First occurrence wins; items with no key at all
/// are dropped too.
pub fn deduplicate(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());

    for item in items {
        let key = dedup_key(&item);
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            unique.push(item);
        } else {
            debug!("Removing duplicate entry: {} ({})", item.title, item.link);
        }
    }

    unique
}

fn dedup_key(item: &NewsItem) -> String {
    let key = if item.link.trim().is_empty() {
        &item.title
    } else {
        &item.link
    };
    key.trim().to_lowercase()
}

/// Stable sort, newest first, undated items last.
pub fn sort_by_recency(items: &mut [NewsItem]) {
    // `None` orders below every `Some`, so a descending sort puts it last.
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Case-insensitive substring filter over `title + " " + summary`.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    mode: ExclusionMode,
}

impl KeywordFilter {
    pub fn new(include: &[String], exclude: &[String], mode: ExclusionMode) -> Self {
        Self {
            include: lowercase_keywords(include),
            exclude: lowercase_keywords(exclude),
            mode,
        }
    }

    pub fn apply(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        items.into_iter().filter(|item| self.accepts(item)).collect()
    }

    pub fn accepts(&self, item: &NewsItem) -> bool {
        let text = item.searchable_text();

        if !self.include.is_empty() && !contains_any(&text, &self.include) {
            return false;
        }

        let check_exclusion = match self.mode {
            ExclusionMode::Independent => true,
            ExclusionMode::WithinInclusion => !self.include.is_empty(),
        };

        if check_exclusion && contains_any(&text, &self.exclude) {
            debug!("Excluding '{}' by keyword", item.title);
            return false;
        }

        true
    }
}

fn lowercase_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
