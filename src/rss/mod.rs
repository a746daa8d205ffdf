//! Feed retrieval module.
//!
//! Fetches a syndication feed over HTTP or from disk and reduces it to
//! `(link, title)` entries. Nothing outside this module sees feed-rs types.

mod client;
mod fetcher;
mod parser;
mod types;
mod util;

pub use self::fetcher::{FeedFetcher, FeedSource};
pub use self::parser::parse_entries;
pub use self::types::*;
pub use self::util::{cleanup_xml, feed_location, FeedLocation};
