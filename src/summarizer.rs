//! Abstractive summarization behind preconditions, bounded retry, and
//! sentinel degradation.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`Summarize`]: core trait for async summarization backends
//! - [`HttpSummarizer`]: reqwest-backed client for the summarization service
//! - [`RetrySummarize`]: decorator adding bounded retry to any backend
//!
//! The backend is expensive to stand up (the service keeps a warmed model
//! session), so it is constructed once per process in `main` and handed to
//! the orchestrator explicitly. Individual calls are not assumed reentrant;
//! the orchestrator serializes access.
//!
//! # Sentinels
//!
//! Callers never see a summarization error. Input that is absent or too
//! short yields [`SUMMARY_NOT_AVAILABLE`] without touching the backend, and
//! a backend that keeps failing past the retry bound yields
//! [`SUMMARY_FAILED`]. Both are ordinary data to downstream readers.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::config::SummarizerConfig;
use crate::error::SummarizeError;

/// Placeholder summary for input too short to carry signal.
pub const SUMMARY_NOT_AVAILABLE: &str = "Summary not available.";

/// Placeholder summary for a backend that exhausted its retries.
pub const SUMMARY_FAILED: &str = "Summary failed.";

/// Requests to the backend get a generous ceiling so a wedged service
/// degrades to an error instead of hanging the pipeline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait for async summarization backends.
pub trait Summarize {
    /// Produce a summary of `text` bounded between `min_len` and `max_len`
    /// tokens. Deterministic for identical input and model version.
    async fn summarize(
        &self,
        text: &str,
        min_len: u32,
        max_len: u32,
    ) -> Result<String, SummarizeError>;
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Serialize)]
struct SummarizeParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary_text: String,
}

/// Client for the HTTP summarization service.
///
/// Speaks the transformers serving shape: POST
/// `{"inputs": ..., "parameters": {"min_length", "max_length",
/// "do_sample"}}`, answered by `[{"summary_text": ...}]`.
#[derive(Debug)]
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSummarizer {
    /// Build a client for the configured endpoint.
    pub fn new(config: &SummarizerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Summarize for HttpSummarizer {
    #[instrument(level = "debug", skip_all)]
    async fn summarize(
        &self,
        text: &str,
        min_len: u32,
        max_len: u32,
    ) -> Result<String, SummarizeError> {
        let t0 = Instant::now();
        let request = SummarizeRequest {
            inputs: text,
            parameters: SummarizeParameters {
                min_length: min_len,
                max_length: max_len,
                do_sample: false,
            },
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Status(status));
        }

        let parsed: Vec<SummarizeResponse> = response.json().await?;
        let summary = parsed
            .into_iter()
            .next()
            .map(|r| r.summary_text)
            .ok_or(SummarizeError::EmptyResponse)?;

        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            chars = summary.len(),
            "Summarization call succeeded"
        );
        Ok(summary)
    }
}

/// Decorator adding bounded fixed-delay retry to any [`Summarize`] backend.
///
/// Summarization failures are transient more often than not (the service
/// sheds load under resource exhaustion), so each call is retried up to
/// `retries` additional times with a fixed delay between attempts.
pub struct RetrySummarize<T> {
    inner: T,
    retries: usize,
    delay: Duration,
}

impl<T: Summarize> RetrySummarize<T> {
    pub fn new(inner: T, retries: usize, delay: Duration) -> Self {
        Self {
            inner,
            retries,
            delay,
        }
    }
}

impl<T: Summarize> Summarize for RetrySummarize<T> {
    #[instrument(level = "info", skip_all)]
    async fn summarize(
        &self,
        text: &str,
        min_len: u32,
        max_len: u32,
    ) -> Result<String, SummarizeError> {
        let mut attempt = 0usize;
        loop {
            match self.inner.summarize(text, min_len, max_len).await {
                Ok(summary) => return Ok(summary),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.retries {
                        error!(
                            attempt,
                            max = self.retries,
                            error = %e,
                            "Summarization exhausted retries"
                        );
                        return Err(e);
                    }
                    warn!(
                        attempt,
                        max = self.retries,
                        delay = ?self.delay,
                        error = %e,
                        "Summarization attempt failed; retrying"
                    );
                    sleep(self.delay).await;
                }
            }
        }
    }
}

/// Summarize extracted content, degrading to a sentinel instead of erroring.
///
/// Absent content or content under the configured word floor short-circuits
/// to [`SUMMARY_NOT_AVAILABLE`] without invoking the backend — short text
/// does not carry enough signal to be worth an inference call. A backend
/// failure (after whatever retry the backend composes) yields
/// [`SUMMARY_FAILED`].
#[instrument(level = "info", skip_all)]
pub async fn summarize_or_sentinel<S: Summarize>(
    backend: &S,
    content: Option<&str>,
    config: &SummarizerConfig,
) -> String {
    let Some(text) = content else {
        debug!("No content to summarize");
        return SUMMARY_NOT_AVAILABLE.to_string();
    };

    let words = text.split_whitespace().count();
    if words < config.min_words {
        debug!(words, floor = config.min_words, "Content below word floor");
        return SUMMARY_NOT_AVAILABLE.to_string();
    }

    match backend
        .summarize(text, config.min_tokens, config.max_tokens)
        .await
    {
        Ok(summary) => {
            info!(words, summary_chars = summary.len(), "Summarized article");
            summary
        }
        Err(e) => {
            warn!(error = %e, "Summarization degraded to sentinel");
            SUMMARY_FAILED.to_string()
        }
    }
}
