//! Error types for the feed pipeline.
//!
//! Query operations on [`crate::GNews`] never surface these errors: they are
//! logged and absorbed at the boundary. The lower-level building blocks
//! (feed fetch, feed parse, filter compilation, config loading) return them
//! so callers can opt into strict handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GNewsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} when fetching {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse feed: {0}")]
    Parse(String),

    #[error("Invalid exclusion pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not extract article from {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("Feature unavailable: `{0}` (rebuild with `--features {0}`)")]
    FeatureUnavailable(&'static str),
}
