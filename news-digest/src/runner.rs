use crate::aggregator::{NewsAggregator, SourceReport};
use crate::digest::DigestRenderer;
use crate::notifier::{DeliveryReport, Notifier};
use crate::types::Digest;
use tracing::{info, warn};

/// Number of report lines echoed to the log after rendering.
const PREVIEW_LINES: usize = 20;

#[derive(Debug)]
pub struct RunSummary {
    pub sources: Vec<SourceReport>,
    pub digest: Digest,
    /// `None` when delivery was skipped (dry run, preview).
    pub delivery: Option<DeliveryReport>,
}

/// One pass: collect, render, and deliver when a notifier is given.
///
/// An empty collection still produces a digest, and that digest is still
/// delivered.
pub async fn run_digest(
    aggregator: &NewsAggregator,
    renderer: &DigestRenderer,
    notifier: Option<&Notifier>,
) -> RunSummary {
    info!("Step 1: collecting news from {} sources", aggregator.source_count());
    let collected = aggregator.collect().await;
    if collected.items.is_empty() {
        if notifier.is_some() {
            warn!("No news items collected, sending the empty digest");
        } else {
            warn!("No news items collected, rendering the empty digest");
        }
    }

    info!("Step 2: rendering {} items", collected.items.len());
    let digest = renderer.render(&collected.items);
    log_preview(&digest);

    let delivery = match notifier {
        Some(notifier) => {
            info!("Step 3: delivering to {} channels", notifier.channel_count());
            Some(notifier.deliver_all(&digest).await)
        }
        None => {
            info!("Step 3: delivery skipped");
            None
        }
    };

    RunSummary {
        sources: collected.reports,
        digest,
        delivery,
    }
}

fn log_preview(digest: &Digest) {
    info!("Report preview:");
    for line in digest.text.lines().take(PREVIEW_LINES) {
        info!("  {}", line);
    }
    if digest.text.lines().count() > PREVIEW_LINES {
        info!("  ...");
    }
}
