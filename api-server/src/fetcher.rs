//! Page fetcher for /detect-from-url

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Fetches raw page HTML. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// GET `url` and return the decoded body. Non-2xx statuses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
