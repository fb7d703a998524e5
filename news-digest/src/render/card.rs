//! Feishu interactive-card payload for the chat webhook.

use super::{ReportContext, EMPTY_MESSAGE};
use crate::types::NewsItem;
use crate::utils::markup::escape_brackets;
use crate::utils::text::ellipsize;
use serde_json::{json, Value};

/// Cards stop after this many items, whatever the overall maximum is.
pub const CARD_MAX_ITEMS: usize = 10;
/// Per-item summary length inside a card.
pub const CARD_SUMMARY_MAX_CHARS: usize = 100;

pub fn render(ctx: &ReportContext<'_>, items: &[NewsItem]) -> Value {
    if items.is_empty() {
        return render_empty(ctx);
    }

    let mut elements = Vec::with_capacity(items.len().min(CARD_MAX_ITEMS) + 2);
    elements.push(markdown_element(format!("Top stories ({})\n", items.len())));

    for (i, item) in items.iter().take(CARD_MAX_ITEMS).enumerate() {
        let mut content = format!(
            "**{}. {}**\n{} | {}\n",
            i + 1,
            escape_brackets(&item.title),
            escape_brackets(&item.source_name),
            ctx.published_label(item)
        );
        if !item.summary.is_empty() {
            content.push_str(&escape_brackets(&ellipsize(&item.summary, CARD_SUMMARY_MAX_CHARS)));
            content.push('\n');
        }
        content.push_str(&format!("[Read more]({})", item.link));

        elements.push(markdown_element(content));
    }

    elements.push(markdown_element(format!(
        "---\n*Sources: {}*\n*Generated at: {}*",
        ctx.source_label,
        ctx.now.format("%H:%M")
    )));

    json!({
        "msg_type": "interactive",
        "card": {
            "header": {
                "title": {
                    "tag": "plain_text",
                    "content": ctx.headline(),
                },
                "template": ctx.card_template,
            },
            "elements": elements,
        }
    })
}

fn render_empty(ctx: &ReportContext<'_>) -> Value {
    text_message(&format!("{}\n\n{}", ctx.headline(), EMPTY_MESSAGE))
}

/// A plain text webhook message.
pub fn text_message(text: &str) -> Value {
    json!({
        "msg_type": "text",
        "content": {
            "text": text,
        }
    })
}

fn markdown_element(content: String) -> Value {
    json!({
        "tag": "div",
        "text": {
            "tag": "lark_md",
            "content": content,
        }
    })
}
