//! Error types for the pipeline stages.
//!
//! Each stage has its own error enum so the orchestrator can recover at the
//! narrowest boundary: fetch and summarization errors degrade the single
//! unit of work that hit them, while [`PersistError`] is the one fatal
//! variety — a run that cannot write its snapshot has produced nothing
//! durable.
//!
//! Malformed HTML never surfaces as an error: the parser is lenient, so a
//! page that cannot be made sense of simply yields no links or no content.

use thiserror::Error;

/// A page fetch that did not produce usable HTML.
///
/// Recovered locally; the affected unit of work yields an empty or absent
/// result and the run continues.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Timeout, connection failure, or body read failure.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// A summarization attempt that failed.
///
/// Retried up to the configured bound, then degraded to the
/// `"Summary failed."` sentinel.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarization request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("summarization service answered {0}")]
    Status(reqwest::StatusCode),
    /// The service answered 2xx but the body carried no summary.
    #[error("summarization response carried no summary text")]
    EmptyResponse,
}

/// A snapshot write failure. Fatal for the run.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),
}
