//! # Offshore Digest
//!
//! A crawl → extract → summarize → persist pipeline for offshore-energy and
//! maritime trade press. Each run discovers article links across a fixed
//! set of industry sites, recovers the body text of each candidate page,
//! produces a short abstractive summary through an external summarization
//! service, and persists the full result set as one replace-in-place CSV
//! snapshot for downstream display.
//!
//! ## Usage
//!
//! ```sh
//! offshore_digest -c digest.yaml -o snapshot.csv --workers 4
//! ```
//!
//! ## Architecture
//!
//! 1. **Discovery**: filter each site's entry-page anchors down to
//!    candidate article links
//! 2. **Extraction**: recover article body text via known container
//!    markers, with a whole-page fallback
//! 3. **Summarization**: bounded-retry calls to the summarization service,
//!    degrading to sentinel summaries rather than failing
//! 4. **Persistence**: atomic fixed-schema CSV snapshot
//!
//! Everything short of snapshot persistence is best-effort: a site or link
//! that fails is logged and skipped, and even a fully failed crawl still
//! writes an (empty) snapshot.

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod summarizer;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use outputs::snapshot;
use pipeline::CancelFlag;
use summarizer::{HttpSummarizer, RetrySummarize, SUMMARY_FAILED, SUMMARY_NOT_AVAILABLE};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("offshore_digest starting up");

    let args = Cli::parse();
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.snapshot_path = output;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(endpoint) = args.summarizer_endpoint {
        config.summarizer.endpoint = endpoint;
    }

    // --- Long-lived resources, constructed once per process ---
    let fetcher = HttpFetcher::new(&config.http)?;
    let backend = HttpSummarizer::new(&config.summarizer)?;
    let summarizer = Mutex::new(RetrySummarize::new(
        backend,
        config.summarizer.retries,
        Duration::from_secs(config.summarizer.retry_delay_secs),
    ));
    info!(
        endpoint = %config.summarizer.endpoint,
        retries = config.summarizer.retries,
        "Summarization backend ready"
    );

    // --- Cooperative cancellation on Ctrl-C ---
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; finishing in-flight sites then stopping");
                cancel.cancel();
            }
        });
    }

    // --- Crawl, extract, summarize ---
    let records = pipeline::run(&config, &fetcher, &summarizer, &cancel).await;

    let total = records.len();
    let not_available = records
        .iter()
        .filter(|r| r.summary == SUMMARY_NOT_AVAILABLE)
        .count();
    let failed = records
        .iter()
        .filter(|r| r.summary == SUMMARY_FAILED)
        .count();
    info!(
        total,
        summarized = total - not_available - failed,
        not_available,
        failed,
        "Crawl complete"
    );

    // --- Persist the snapshot; the one fatal failure mode ---
    if let Err(e) = snapshot::write_snapshot(&records, Path::new(&config.snapshot_path)) {
        error!(path = %config.snapshot_path, error = %e, "Failed to write snapshot");
        return Err(e.into());
    }
    info!(path = %config.snapshot_path, count = total, "Snapshot persisted");

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
