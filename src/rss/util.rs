//! Utility functions for feed retrieval and parsing.

use flate2::read::GzDecoder;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

use crate::TARGET_WEB_REQUEST;

/// Where a feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Remote(Url),
    Local(PathBuf),
}

/// Resolve a user supplied feed address. Anything that is not an absolute
/// http(s) or file URL is treated as a filesystem path.
pub fn feed_location(address: &str) -> FeedLocation {
    match Url::parse(address) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            FeedLocation::Remote(parsed)
        }
        Ok(parsed) if parsed.scheme() == "file" => match parsed.to_file_path() {
            Ok(path) => FeedLocation::Local(path),
            Err(()) => FeedLocation::Local(PathBuf::from(parsed.path())),
        },
        _ => FeedLocation::Local(PathBuf::from(address)),
    }
}

/// Some servers gzip the body without saying so in Content-Encoding.
pub fn decompress_if_gzipped(bytes: &[u8], source: &str) -> Vec<u8> {
    if !bytes.starts_with(&[0x1f, 0x8b]) {
        return bytes.to_vec();
    }

    let mut decoder = GzDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Decompressed gzip body from {}", source);
        decoded
    } else {
        debug!(target: TARGET_WEB_REQUEST, "Gzip magic present but decoding failed for {}, using original bytes", source);
        bytes.to_vec()
    }
}

/// Clean up malformed XML so a second parse attempt has a chance.
pub fn cleanup_xml(xml: &str) -> String {
    let mut cleaned = xml.trim();

    if let Some(stripped) = cleaned.strip_prefix('\u{FEFF}') {
        cleaned = stripped;
    }

    // Drop anything in front of the document itself
    if let Some(start) = ["<?xml", "<rss", "<feed", "<rdf:RDF"]
        .iter()
        .filter_map(|marker| cleaned.find(marker))
        .min()
    {
        cleaned = &cleaned[start..];
    }

    // HTML named entities are undefined in plain XML
    let cleaned = cleaned
        .replace("&nbsp;", "&#160;")
        .replace("&ndash;", "&#8211;")
        .replace("&mdash;", "&#8212;")
        .replace("&rsquo;", "&#8217;")
        .replace("&lsquo;", "&#8216;")
        .replace("&rdquo;", "&#8221;")
        .replace("&ldquo;", "&#8220;")
        .replace("&hellip;", "&#8230;");

    escape_bare_ampersands(&cleaned)
        .chars()
        .filter(|&c| {
            matches!(c,
                '\u{0009}' | // tab
                '\u{000A}' | // newline
                '\u{000D}' | // carriage return
                '\u{0020}'..='\u{D7FF}' |
                '\u{E000}'..='\u{FFFD}' |
                '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect()
}

/// Turn every `&` that does not start an entity reference into `&amp;`.
fn escape_bare_ampersands(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    for (idx, c) in xml.char_indices() {
        if c == '&' && !starts_entity(&xml[idx + 1..]) {
            out.push_str("&amp;");
        } else {
            out.push(c);
        }
    }
    out
}

fn starts_entity(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let name = &rest[..end];
    if let Some(num) = name.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        return !num.is_empty() && num.chars().all(|c| c.is_ascii_digit());
    }
    !name.is_empty()
        && name.len() <= 32
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}
