//! Data models for feed entries and the records handed back to callers.
//!
//! - [`RawEntry`]: one `<item>` as it appears in the feed document
//! - [`NewsRecord`]: the normalized, caller-owned result
//! - [`Article`]: a downloaded article body

use serde::{Deserialize, Serialize};

/// A feed `<item>` before normalization.
///
/// Every field is optional; missing elements deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// The `<pubDate>` text, untouched.
    #[serde(rename = "pubDate")]
    pub published: Option<String>,
    pub source: Option<RawSource>,
}

/// The `<source url="...">Publisher</source>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSource {
    #[serde(rename = "@url")]
    pub url: Option<String>,
    #[serde(rename = "$text")]
    pub name: Option<String>,
}

/// A normalized news item.
///
/// `published_date` is the feed's own string, not reparsed. It serializes
/// as `"published date"` for compatibility with existing consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub title: String,
    pub description: String,
    #[serde(rename = "published date")]
    pub published_date: String,
    pub url: String,
    pub publisher: String,
}

/// A full article downloaded from a publisher page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    /// Language the article was requested in.
    pub language: String,
    pub title: String,
    /// Plain-text body.
    pub text: String,
    /// Cleaned HTML body.
    pub html: String,
}
