//! Page fetcher for the patch-notes page.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use crate::errors::WatchError;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the response body of a single GET against `url`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on timeout, transport failure, or a non-2xx status.
    async fn fetch(&self, url: &str) -> Result<String, WatchError>;
}

/// `reqwest`-backed fetcher with a fixed timeout and no retries.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// # Errors
    ///
    /// Returns `FetchError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, WatchError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WatchError::FetchError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, WatchError> {
        info!(url = %url, "Fetching patch notes page");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            WatchError::FetchError(if e.is_timeout() {
                format!("timed out after {}s: {e}", FETCH_TIMEOUT.as_secs())
            } else {
                e.to_string()
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Patch notes page returned HTTP {}", status);
            return Err(WatchError::FetchError(format!("HTTP {status} for {url}")));
        }

        response
            .text()
            .await
            .map_err(|e| WatchError::FetchError(format!("Failed to read response body: {e}")))
    }
}
