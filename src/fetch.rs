//! Shared HTTP page fetching for discovery and extraction.
//!
//! Both crawl stages fetch pages under the same policy: a fixed short
//! timeout and a browser-like user-agent, configured once on a single
//! [`reqwest::Client`] that is reused for connection pooling. The
//! [`FetchPage`] trait is the seam that lets tests drive the pipeline with
//! canned pages instead of the network.

use std::time::Duration;

use tracing::instrument;

use crate::config::HttpConfig;
use crate::error::FetchError;

/// Trait for fetching a page body as text.
pub trait FetchPage {
    /// Fetch `url` and return its body, or a [`FetchError`] on timeout,
    /// connection failure, or non-success status.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Network-backed [`FetchPage`] implementation.
///
/// A stuck fetch degrades to a timeout error after `timeout_secs` rather
/// than blocking the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher honoring the configured timeout and user-agent.
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })
    }
}
