//! Feed retrieval: the `FeedSource` seam and its HTTP/file implementation.

use async_trait::async_trait;
use tracing::{debug, info};

use super::client::{create_http_client, fetch_bytes};
use super::parser::parse_entries;
use super::types::Entry;
use super::util::{feed_location, FeedLocation};
use crate::error::FetchError;
use crate::TARGET_WEB_REQUEST;

/// Anything that can turn a feed address into an ordered list of entries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<Entry>, FetchError>;
}

/// Reads feeds over HTTP(S), or from disk for paths and `file://` URLs.
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    pub fn new() -> reqwest::Result<Self> {
        Ok(Self {
            client: create_http_client()?,
        })
    }
}

#[async_trait]
impl FeedSource for FeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Entry>, FetchError> {
        let body = match feed_location(url) {
            FeedLocation::Remote(remote) => fetch_bytes(&self.client, remote.as_str()).await?,
            FeedLocation::Local(path) => {
                debug!(target: TARGET_WEB_REQUEST, "Reading feed from file {}", path.display());
                match tokio::fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(source) => return Err(FetchError::File { path, source }),
                }
            }
        };

        let entries = parse_entries(&body, url)?;
        info!(target: TARGET_WEB_REQUEST, "Fetched {} entries from {}", entries.len(), url);
        Ok(entries)
    }
}
