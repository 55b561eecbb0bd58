//! Full-article download.
//!
//! Article extraction is an optional capability behind the `article` cargo
//! feature, which pulls in the `readability` crate. Without the feature
//! every call fails with [`GNewsError::FeatureUnavailable`] so callers can
//! use the same API regardless of how the crate was built.
//!
//! Enable with: `cargo build --features article`

use crate::error::GNewsError;
use crate::models::Article;
use crate::transport::FeedTransport;

/// Name of the cargo feature gating this module.
pub const FEATURE: &str = "article";

/// `true` when the crate was built with article extraction.
pub const fn is_available() -> bool {
    cfg!(feature = "article")
}

/// Download `url` and extract its readable body.
#[cfg(feature = "article")]
#[tracing::instrument(level = "info", skip(transport))]
pub async fn download<T: FeedTransport>(
    transport: &T,
    url: &str,
    language: &str,
) -> Result<Article, GNewsError> {
    let body = transport.get(url).await?;
    let article = extract(url, language, &body)?;
    tracing::info!(bytes = article.text.len(), "Extracted article");
    Ok(article)
}

/// Article download (always fails when the `article` feature is disabled).
#[cfg(not(feature = "article"))]
pub async fn download<T: FeedTransport>(
    _transport: &T,
    _url: &str,
    _language: &str,
) -> Result<Article, GNewsError> {
    Err(GNewsError::FeatureUnavailable(FEATURE))
}

/// Extract an [`Article`] from an already-downloaded page.
#[cfg(feature = "article")]
pub fn extract(url: &str, language: &str, html: &[u8]) -> Result<Article, GNewsError> {
    let extraction_error = |reason: String| GNewsError::Extraction {
        url: url.to_string(),
        reason,
    };
    let base = url::Url::parse(url).map_err(|e| extraction_error(e.to_string()))?;
    let mut reader = html;
    let product = readability::extractor::extract(&mut reader, &base)
        .map_err(|e| extraction_error(e.to_string()))?;
    if product.text.trim().is_empty() {
        return Err(extraction_error("no readable content".to_string()));
    }
    Ok(Article {
        url: url.to_string(),
        language: language.to_string(),
        title: product.title,
        text: product.text,
        html: product.content,
    })
}
