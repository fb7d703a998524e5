//! Self-contained HTML document, used as the email body.

use super::{ReportContext, EMPTY_MESSAGE};
use crate::types::NewsItem;
use crate::utils::markup::escape_html;

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
        .header { background: linear-gradient(135deg, #1a73e8, #4285f4); color: white; padding: 20px; border-radius: 10px; margin-bottom: 20px; }
        .header h1 { margin: 0; font-size: 24px; }
        .header .date { opacity: 0.9; margin-top: 5px; }
        .news-card { background: white; border-radius: 8px; padding: 20px; margin-bottom: 15px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .news-title { font-size: 18px; font-weight: 600; color: #1a73e8; margin-bottom: 10px; }
        .news-meta { font-size: 13px; color: #666; margin-bottom: 10px; }
        .news-summary { font-size: 14px; color: #333; line-height: 1.6; }
        .news-link { display: inline-block; margin-top: 10px; color: #1a73e8; text-decoration: none; }
        .footer { text-align: center; color: #999; font-size: 12px; margin-top: 20px; }
"#;

pub fn render(ctx: &ReportContext<'_>, items: &[NewsItem]) -> String {
    if items.is_empty() {
        return render_empty(ctx);
    }

    let title = escape_html(ctx.title);
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title} - {date}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="header">
        <h1>{title}</h1>
        <div class="date">{date} | Top stories ({count})</div>
    </div>
"#,
        title = title,
        date = ctx.date_label(),
        count = items.len(),
        STYLE = STYLE,
    ));

    for (i, item) in items.iter().enumerate() {
        html.push_str(&format!(
            r#"
    <div class="news-card">
        <div class="news-title">{index}. {title}</div>
        <div class="news-meta">{source} | {published}</div>
        <div class="news-summary">{summary}</div>
        <a class="news-link" href="{link}" target="_blank">Read more &rarr;</a>
    </div>
"#,
            index = i + 1,
            title = escape_html(&item.title),
            source = escape_html(&item.source_name),
            published = escape_html(&ctx.published_label(item)),
            summary = escape_html(&item.summary),
            link = escape_html(&item.link),
        ));
    }

    html.push_str(&format!(
        r#"
    <div class="footer">
        <p>Sources: {sources}</p>
        <p>Generated at: {generated}</p>
    </div>
</body>
</html>
"#,
        sources = escape_html(ctx.source_label),
        generated = ctx.now.format("%Y-%m-%d %H:%M:%S"),
    ));

    html
}

fn render_empty(ctx: &ReportContext<'_>) -> String {
    let title = escape_html(ctx.title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>{title}</title></head>
<body>
    <h1>{title} - {date}</h1>
    <p>{message}</p>
</body>
</html>
"#,
        title = title,
        date = ctx.date_label(),
        message = EMPTY_MESSAGE,
    )
}
