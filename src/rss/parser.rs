//! Feed parsing for RSS, Atom, and JSON formats via feed-rs.

use feed_rs::model;
use feed_rs::parser;
use tracing::{debug, warn};

use super::types::Entry;
use super::util::{cleanup_xml, feed_location, FeedLocation};
use crate::error::FetchError;
use crate::TARGET_WEB_REQUEST;

/// Parse a feed body into entries, retrying once on a cleaned-up copy when
/// the first attempt is rejected. Relative links are resolved against
/// `source` when it is an http(s) URL.
pub fn parse_entries(body: &[u8], source: &str) -> Result<Vec<Entry>, FetchError> {
    let base = match feed_location(source) {
        FeedLocation::Remote(url) => Some(url.to_string()),
        FeedLocation::Local(_) => None,
    };
    let feed_parser = parser::Builder::new().base_uri(base.as_deref()).build();

    let feed = match feed_parser.parse(body) {
        Ok(feed) => feed,
        Err(first_err) => {
            let text = String::from_utf8_lossy(body);
            let cleaned = cleanup_xml(&text);

            if !(cleaned.contains("<rss") || cleaned.contains("<feed") || cleaned.contains("<rdf:RDF")) {
                let preview = if text.chars().all(|c| !c.is_control() || c.is_whitespace()) {
                    text.chars().take(100).collect::<String>()
                } else {
                    "[binary data]".to_string()
                };
                debug!(target: TARGET_WEB_REQUEST, "Content from {} is not a feed. Preview: {}", source, preview);
                return Err(FetchError::Parse {
                    url: source.to_string(),
                    reason: first_err.to_string(),
                });
            }

            match feed_parser.parse(cleaned.as_bytes()) {
                Ok(feed) => {
                    warn!(target: TARGET_WEB_REQUEST, "Feed from {} parsed only after XML cleanup: {}", source, first_err);
                    feed
                }
                Err(second_err) => {
                    return Err(FetchError::Parse {
                        url: source.to_string(),
                        reason: format!(
                            "{} (after cleanup: {})",
                            first_err, second_err
                        ),
                    })
                }
            }
        }
    };

    let mut entries = Vec::with_capacity(feed.entries.len());
    for (position, item) in feed.entries.into_iter().enumerate() {
        match to_entry(item) {
            Some(entry) => entries.push(entry),
            None => {
                warn!(target: TARGET_WEB_REQUEST, "Skipping item {} from {}: missing title or link", position + 1, source);
            }
        }
    }

    Ok(entries)
}

fn to_entry(item: model::Entry) -> Option<Entry> {
    let title = item.title?.content;
    let link = item
        .links
        .iter()
        .find(|link| link.rel.as_deref() == Some("alternate"))
        .or_else(|| item.links.first())
        .map(|link| link.href.clone())?;

    Some(Entry { link, title })
}
