//! Feed fetch, parse, and per-entry link resolution.
//!
//! Entries whose `<link>` points at the aggregator host are resolved to the
//! publisher URL with a HEAD request. A failed resolution keeps the original
//! link; it never drops the entry or aborts the batch.

use futures::stream::{self, StreamExt};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::GNewsError;
use crate::models::RawEntry;
use crate::transport::FeedTransport;
use crate::utils::truncate_for_log;

/// Host that serves redirecting aggregator links.
pub const AGGREGATOR_HOST: &str = "news.google.com";

/// Parse an RSS 2.0 document into its entries, in document order.
///
/// Items are located with the streaming reader and deserialized one at a
/// time, so a malformed `<item>` is logged and skipped while the rest of
/// the channel is kept. Other channel elements may appear anywhere between
/// items.
///
/// # Returns
///
/// The well-formed entries, or [`GNewsError::Parse`] when the document is
/// not UTF-8 or has no `<channel>` at all. A document that breaks off
/// part-way keeps the items completed before the break.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<RawEntry>, GNewsError> {
    let text = std::str::from_utf8(xml).map_err(|e| GNewsError::Parse(e.to_string()))?;
    let mut reader = Reader::from_str(text);

    let mut entries = Vec::new();
    let mut saw_channel = false;
    let mut item_start: Option<usize> = None;
    let mut index = 0usize;

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"channel" => saw_channel = true,
                b"item" if item_start.is_none() => item_start = Some(tag_start(text, before)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"channel" => saw_channel = true,
                b"item" if item_start.is_none() => {
                    let end = reader.buffer_position() as usize;
                    push_item(&mut entries, index, &text[tag_start(text, before)..end]);
                    index += 1;
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(start) = item_start.take() {
                        let end = reader.buffer_position() as usize;
                        push_item(&mut entries, index, &text[start..end]);
                        index += 1;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) if saw_channel => {
                warn!(error = %e, kept = entries.len(), "Feed document broke off; keeping parsed items");
                break;
            }
            Err(e) => return Err(GNewsError::Parse(format!("XML parse error: {e}"))),
        }
    }

    if !saw_channel {
        return Err(GNewsError::Parse("no <channel> element".to_string()));
    }
    Ok(entries)
}

/// Offset of the `<` opening the tag read after `pos`.
fn tag_start(text: &str, pos: usize) -> usize {
    pos + text[pos..].find('<').unwrap_or(0)
}

fn push_item(entries: &mut Vec<RawEntry>, index: usize, raw: &str) {
    match quick_xml::de::from_str::<RawEntry>(raw) {
        Ok(entry) => entries.push(entry),
        Err(e) => warn!(
            index,
            error = %e,
            item = %truncate_for_log(raw, 200),
            "Skipping malformed feed item"
        ),
    }
}

/// `true` if `link` points at the aggregator rather than a publisher.
pub fn is_aggregator_link(link: &str) -> bool {
    match Url::parse(link) {
        Ok(url) => url.host_str() == Some(AGGREGATOR_HOST),
        Err(_) => false,
    }
}

/// Resolve an entry link to the publisher URL.
///
/// Non-aggregator links are returned as-is; aggregator links that fail to
/// resolve fall back to the aggregator link.
pub async fn resolve_link<T: FeedTransport>(transport: &T, link: &str) -> String {
    if !is_aggregator_link(link) {
        return link.to_string();
    }
    match transport.resolve(link).await {
        Ok(resolved) if !resolved.is_empty() => resolved,
        Ok(_) => link.to_string(),
        Err(e) => {
            warn!(%link, error = %e, "Link resolution failed; keeping aggregator link");
            link.to_string()
        }
    }
}

/// Fetch the feed at `url` and pair every entry with its resolved URL.
///
/// Resolution runs one entry at a time, in feed order.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch<T: FeedTransport>(
    transport: &T,
    url: &str,
) -> Result<Vec<(RawEntry, String)>, GNewsError> {
    let body = transport.get(url).await?;
    let entries = parse_feed(&body)?;
    info!(count = entries.len(), "Parsed feed entries");

    let resolved: Vec<(RawEntry, String)> = stream::iter(entries)
        .then(|entry| async move {
            let link = entry.link.clone().unwrap_or_default();
            let resolved = resolve_link(transport, &link).await;
            debug!(link = %truncate_for_log(&link, 120), %resolved, "Entry resolved");
            (entry, resolved)
        })
        .collect()
        .await;

    Ok(resolved)
}
