//! Markdown-flavoured plain-text report.

use super::{ReportContext, EMPTY_MESSAGE};
use crate::types::NewsItem;

pub fn render(ctx: &ReportContext<'_>, items: &[NewsItem]) -> String {
    if items.is_empty() {
        return render_empty(ctx);
    }

    let mut report = Vec::new();
    report.push(format!("# {}", ctx.headline()));
    report.push(String::new());
    report.push(format!("**Top stories ({})**", items.len()));
    report.push(String::new());

    for (i, item) in items.iter().enumerate() {
        report.push(format!("### {}. {}", i + 1, item.title));
        report.push(String::new());
        report.push(format!("{} | {}", item.source_name, ctx.published_label(item)));
        report.push(String::new());

        if !item.summary.is_empty() {
            report.push(format!("> {}", item.summary));
            report.push(String::new());
        }

        report.push(format!("[Read more]({})", item.link));
        report.push(String::new());
        report.push("---".to_string());
        report.push(String::new());
    }

    report.push(footer(ctx));
    report.join("\n")
}

fn render_empty(ctx: &ReportContext<'_>) -> String {
    format!("# {}\n\n{}\n\n{}", ctx.headline(), EMPTY_MESSAGE, footer(ctx))
}

fn footer(ctx: &ReportContext<'_>) -> String {
    format!(
        "---\n*Sources: {}*\n*Generated at: {}*\n",
        ctx.source_label,
        ctx.now.format("%H:%M:%S")
    )
}
