/// Text processing utilities
pub mod text {
    /// Keep at most `max_chars` characters. Counts chars, never splits a code point.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => text[..byte_index].to_string(),
            None => text.to_string(),
        }
    }

    /// Collapse every whitespace run into a single space and trim the ends.
    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Truncate for compact displays, appending `...` only when something was cut.
    pub fn ellipsize(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            format!("{}...", truncate_chars(text, max_chars))
        }
    }
}

/// Markup utilities
pub mod markup {
    use regex::Regex;
    use std::sync::LazyLock;

    static TAG_PATTERN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

    /// Remove markup tags and collapse the remaining whitespace.
    pub fn strip_tags(html: &str) -> String {
        let without_tags = TAG_PATTERN.replace_all(html, "");
        super::text::collapse_whitespace(&decode_entities(&without_tags))
    }

    /// Decode the handful of entities feeds actually put into descriptions.
    pub fn decode_entities(text: &str) -> String {
        text.replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&#039;", "'")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }

    /// Escape text for embedding in an HTML document or attribute.
    pub fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Escape link-markup brackets inside chat-card text.
    pub fn escape_brackets(text: &str) -> String {
        text.replace('[', "\\[").replace(']', "\\]")
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, FixedOffset, Utc};

    /// Relative publication label as shown in reports.
    pub fn relative_label(published_at: Option<DateTime<Utc>>, now: DateTime<FixedOffset>) -> String {
        let Some(published_at) = published_at else {
            return "unknown".to_string();
        };

        let days = now.with_timezone(&Utc).signed_duration_since(published_at).num_days();
        match days {
            // Timestamps slightly in the future (clock skew) count as today.
            d if d <= 0 => "today".to_string(),
            1 => "yesterday".to_string(),
            d if d < 7 => format!("{} days ago", d),
            _ => published_at.with_timezone(now.offset()).format("%m-%d").to_string(),
        }
    }
}
