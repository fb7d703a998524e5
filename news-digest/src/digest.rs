use crate::config::ReportConfig;
use crate::render::{self, ReportContext};
use crate::types::{Digest, NewsItem};
use chrono::{DateTime, FixedOffset};
use tracing::{debug, info};

/// Renders the final item list into every output format of a [`Digest`].
///
/// The clock is injected so that rendering the same list twice with the same
/// renderer yields identical bytes.
pub struct DigestRenderer {
    title: String,
    source_label: String,
    card_template: String,
    now: DateTime<FixedOffset>,
}

impl DigestRenderer {
    pub fn new(report: &ReportConfig, source_label: impl Into<String>, now: DateTime<FixedOffset>) -> Self {
        Self {
            title: report.title.clone(),
            source_label: source_label.into(),
            card_template: report.card_template.clone(),
            now,
        }
    }

    /// Report date, e.g. `2026-10-17`.
    pub fn date_label(&self) -> String {
        self.context().date_label()
    }

    fn context(&self) -> ReportContext<'_> {
        ReportContext {
            title: &self.title,
            source_label: &self.source_label,
            card_template: &self.card_template,
            now: self.now,
        }
    }

    pub fn render(&self, items: &[NewsItem]) -> Digest {
        let ctx = self.context();

        let text = render::text::render(&ctx, items);
        let html = render::html::render(&ctx, items);
        let card = render::card::render(&ctx, items);

        debug!(
            "Rendered text ({} bytes), html ({} bytes) and card payload",
            text.len(),
            html.len()
        );
        info!("Rendered digest for {} with {} items", ctx.date_label(), items.len());

        Digest {
            text,
            html,
            card,
            item_count: items.len(),
            date_label: ctx.date_label(),
        }
    }
}
