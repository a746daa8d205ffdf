//! Minimal RSS 2.0 document writer.

use super::sanitize::escape;
use crate::rss::Entry;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n";
const RSS_OPEN: &str = "<rss version=\"2.0\">\n\n";
const CHANNEL_OPEN: &str = "<channel>\n";
const CHANNEL_CLOSE: &str = "</channel>\n";
const RSS_CLOSE: &str = "</rss>";

/// Render `entries` as an RSS 2.0 channel.
///
/// `feed_title` and `feed_link` are written verbatim; only entry text is
/// escaped. Item order follows `entries`.
pub fn serialize(entries: &[Entry], feed_title: &str, feed_link: &str) -> String {
    let mut doc = String::with_capacity(256 + entries.len() * 128);

    doc.push_str(XML_DECLARATION);
    doc.push_str(RSS_OPEN);
    doc.push_str(CHANNEL_OPEN);
    doc.push_str(&format!("  <title>{}</title>\n", feed_title));
    doc.push_str(&format!("  <link>{}</link>\n", feed_link));

    for entry in entries {
        push_item(&mut doc, entry);
    }

    doc.push_str(CHANNEL_CLOSE);
    doc.push_str(RSS_CLOSE);
    doc
}

fn push_item(doc: &mut String, entry: &Entry) {
    doc.push_str("  <item>\n");
    doc.push_str(&element("title", &escape(&entry.title)));
    doc.push_str(&element("link", &escape(&entry.link)));
    doc.push_str("  </item>\n");
}

fn element(tag: &str, body: &str) -> String {
    format!("    <{tag}>{body}</{tag}>\n")
}
