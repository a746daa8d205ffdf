//! HTTP client creation and request handling for feed downloads.

use reqwest::header;
use tokio::time::timeout;
use tracing::debug;

use super::types::{FEED_ACCEPT, REQUEST_TIMEOUT, USER_AGENT};
use super::util::decompress_if_gzipped;
use crate::error::FetchError;
use crate::TARGET_WEB_REQUEST;

/// Build the client used for every feed request.
pub fn create_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default())
        .build()
}

/// Download the raw feed body. Non-success statuses are errors.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    debug!(target: TARGET_WEB_REQUEST, "Requesting feed from {}", url);

    let request = client
        .get(url)
        .header(header::ACCEPT, FEED_ACCEPT)
        .send();

    let response = match timeout(REQUEST_TIMEOUT, request).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(source)) => {
            return Err(FetchError::Request {
                url: url.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(FetchError::Timeout {
                url: url.to_string(),
                secs: REQUEST_TIMEOUT.as_secs(),
            })
        }
    };

    let status = response.status();
    debug!(target: TARGET_WEB_REQUEST, "Response from {}: {} Content-Type: {:?}",
           url, status, response.headers().get(header::CONTENT_TYPE));

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    Ok(decompress_if_gzipped(&bytes, url))
}
