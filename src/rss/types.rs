//! Type definitions for the RSS module.

use std::time::Duration;

/// One job posting pulled from the source feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub link: String,
    pub title: String,
}

impl Entry {
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
        }
    }
}

// Constants
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const FEED_ACCEPT: &str = "application/rss+xml, application/atom+xml, application/feed+json, application/xml, text/xml, */*;q=0.9";
