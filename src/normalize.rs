//! Turn raw feed entries into [`NewsRecord`]s.

use scraper::Html;

use crate::models::{NewsRecord, RawEntry};

/// Publisher used when the entry declares no `<source>`.
pub const MISSING_PUBLISHER: &str = " ";

/// Strip markup from an HTML snippet and return its text.
///
/// Text nodes are concatenated without separators and every non-breaking
/// space (U+00A0) becomes a plain space.
///
/// ```
/// let text = gnews::normalize::clean_html("<a href=\"#\">Title</a>&nbsp;<font>Pub</font>");
/// assert_eq!(text, "Title Pub");
/// ```
pub fn clean_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .replace('\u{a0}', " ")
}

/// Build the caller-facing record for an accepted entry.
pub fn normalize(entry: &RawEntry, url: &str) -> NewsRecord {
    NewsRecord {
        title: entry.title.clone().unwrap_or_default(),
        description: entry
            .description
            .as_deref()
            .map(clean_html)
            .unwrap_or_default(),
        published_date: entry.published.clone().unwrap_or_default(),
        url: url.to_string(),
        publisher: entry
            .source
            .as_ref()
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| MISSING_PUBLISHER.to_string()),
    }
}
