//! Pipeline orchestration: discovery → extraction → summarization → records.
//!
//! The orchestrator drives each configured site through the crawl stages
//! and assembles one [`ArticleRecord`] per surviving candidate. Failures at
//! any stage are caught at the narrowest boundary — a bad link costs that
//! link, a bad site costs that site — so the run always produces a
//! best-effort record set, empty in the worst case.
//!
//! Sites are independent units of work: with `workers > 1` they are fanned
//! out over a fixed-size pool via `futures::stream::buffered`, which keeps
//! site order in the output. Summarization calls go through a mutex because
//! the backend is not assumed safe for concurrent reentry. Only this module
//! appends to the record collection, and only after a unit of work has
//! completed or failed terminally.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::fetch::FetchPage;
use crate::models::{ArticleRecord, SiteTarget};
use crate::scrapers::{content, discovery};
use crate::summarizer::{Summarize, summarize_or_sentinel};
use crate::utils::{base_domain, truncate_for_log};

/// Cooperative cancellation flag shared between the run and its controller.
///
/// Checked at site boundaries: a cancelled run starts no further site and
/// finishes the ones already in flight. Mid-site, the per-link loop also
/// checks it on a best-effort basis.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run the full pipeline over every configured site.
///
/// Returns the run's records in site order, then discovery order within a
/// site — the ordering the snapshot store persists. Never fails: sites that
/// cannot be parsed or crawled are logged and skipped.
#[instrument(level = "info", skip_all, fields(sites = config.sites.len(), workers = config.workers))]
pub async fn run<F, S>(
    config: &AppConfig,
    fetcher: &F,
    summarizer: &Mutex<S>,
    cancel: &CancelFlag,
) -> Vec<ArticleRecord>
where
    F: FetchPage + Sync,
    S: Summarize,
{
    let sites: Vec<SiteTarget> = config
        .sites
        .iter()
        .filter_map(|entry_url| match SiteTarget::parse(entry_url) {
            Ok(site) => Some(site),
            Err(e) => {
                warn!(url = %entry_url, error = %e, "Skipping malformed site URL");
                None
            }
        })
        .collect();

    let workers = config.workers.max(1);
    let per_site: Vec<Vec<ArticleRecord>> = stream::iter(sites.iter())
        .map(|site| async move {
            if cancel.is_cancelled() {
                info!(site = %site.entry_url, "Run cancelled; skipping site");
                return Vec::new();
            }
            process_site(site, config, fetcher, summarizer, cancel).await
        })
        .buffered(workers)
        .collect()
        .await;

    per_site.into_iter().flatten().collect()
}

/// Crawl one site end to end.
#[instrument(level = "info", skip_all, fields(site = %site.entry_url))]
async fn process_site<F, S>(
    site: &SiteTarget,
    config: &AppConfig,
    fetcher: &F,
    summarizer: &Mutex<S>,
    cancel: &CancelFlag,
) -> Vec<ArticleRecord>
where
    F: FetchPage + Sync,
    S: Summarize,
{
    info!("Scraping site");
    let candidates = discovery::discover_links(fetcher, site, config).await;

    let mut records = Vec::with_capacity(candidates.len());
    for link in candidates {
        if cancel.is_cancelled() {
            info!(collected = records.len(), "Run cancelled mid-site");
            break;
        }

        debug!(title = %link.title, url = %link.url, "Processing candidate");
        let article_content =
            content::extract_content(fetcher, &link.url, &config.article_classes, &config.extraction)
                .await;

        let summary = {
            // the backend is not reentrant; serialize calls across workers
            let backend = summarizer.lock().await;
            summarize_or_sentinel(&*backend, article_content.as_deref(), &config.summarizer).await
        };
        debug!(summary = %truncate_for_log(&summary, 120), "Summary computed");

        let site_base = base_domain(&link.url).unwrap_or_else(|| {
            // candidate URLs are absolute by construction; fall back to the
            // entry page's base if one still fails to parse
            base_domain(site.entry_url.as_str()).unwrap_or_default()
        });

        records.push(ArticleRecord {
            site: site_base,
            title: link.title,
            url: link.url,
            summary,
            scraped_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        });
    }

    info!(count = records.len(), "Site complete");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, SummarizeError};
    use crate::summarizer::{SUMMARY_NOT_AVAILABLE, Summarize};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    /// Serves canned pages by exact URL; everything else is a 404.
    struct StaticSite {
        pages: HashMap<String, String>,
    }

    impl StaticSite {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    impl FetchPage for StaticSite {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.pages.get(url).cloned().ok_or(FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }

    struct CountingSummarizer {
        calls: AtomicUsize,
    }

    impl CountingSummarizer {
        fn new() -> Mutex<Self> {
            Mutex::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Summarize for CountingSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            _min_len: u32,
            _max_len: u32,
        ) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("Shell took a final investment decision.".to_string())
        }
    }

    fn single_site_config(entry_url: &str) -> AppConfig {
        AppConfig {
            sites: vec![entry_url.to_string()],
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_single_site_single_candidate() {
        let entry = "https://news.example.test/";
        let fetcher = StaticSite::new(&[
            (
                entry,
                r#"<a href="/news/shell-fid">Shell FID Announced</a>
                   <a href="/about/">Shell corporate history</a>"#,
            ),
            (
                "https://news.example.test/news/shell-fid",
                "<p>Too short to summarize.</p>",
            ),
        ]);
        let summarizer = CountingSummarizer::new();
        let config = single_site_config(entry);

        let records = run(&config, &fetcher, &summarizer, &CancelFlag::new()).await;

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.site, "https://news.example.test");
        assert_eq!(record.title, "Shell FID Announced");
        assert_eq!(record.url, "https://news.example.test/news/shell-fid");
        // page text is under the extraction floor, so the backend is never hit
        assert_eq!(record.summary, SUMMARY_NOT_AVAILABLE);
        assert_eq!(summarizer.lock().await.calls.load(Ordering::SeqCst), 0);
        assert_eq!(record.scraped_at.len(), "2025-11-03 14:30".len());
    }

    #[tokio::test]
    async fn test_long_article_reaches_summarizer() {
        let entry = "https://news.example.test/";
        let body = vec!["drilling"; 80].join(" ");
        let article = format!(r#"<div class="entry-content"><p>{body}</p></div>"#);
        let fetcher = StaticSite::new(&[
            (entry, r#"<a href="/news/rig">Transocean rig contract</a>"#),
            ("https://news.example.test/news/rig", article.as_str()),
        ]);
        let summarizer = CountingSummarizer::new();
        let config = single_site_config(entry);

        let records = run(&config, &fetcher, &summarizer, &CancelFlag::new()).await;

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].summary,
            "Shell took a final investment decision."
        );
        assert_eq!(summarizer.lock().await.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_sites_still_produce_empty_snapshot() {
        let fetcher = StaticSite::new(&[]);
        let summarizer = CountingSummarizer::new();
        let mut config = AppConfig::default();
        config.sites = vec![
            "https://down.example.test/".to_string(),
            "not a url at all".to_string(),
        ];

        let records = run(&config, &fetcher, &summarizer, &CancelFlag::new()).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_failed_extraction_still_yields_record() {
        let entry = "https://news.example.test/";
        // entry page resolves but the article page 404s
        let fetcher = StaticSite::new(&[(
            entry,
            r#"<a href="/news/gone">Offshore wind farm scrapped</a>"#,
        )]);
        let summarizer = CountingSummarizer::new();
        let config = single_site_config(entry);

        let records = run(&config, &fetcher, &summarizer, &CancelFlag::new()).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary, SUMMARY_NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_cancelled_run_starts_no_site() {
        let entry = "https://news.example.test/";
        let fetcher = StaticSite::new(&[(
            entry,
            r#"<a href="/news/shell-fid">Shell FID Announced</a>"#,
        )]);
        let summarizer = CountingSummarizer::new();
        let config = single_site_config(entry);

        let cancel = CancelFlag::new();
        cancel.cancel();
        let records = run(&config, &fetcher, &summarizer, &cancel).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_records_keep_site_order_under_concurrency() {
        let first = "https://first.example.test/";
        let second = "https://second.example.test/";
        let fetcher = StaticSite::new(&[
            (first, r#"<a href="/a">LNG terminal opens</a>"#),
            (second, r#"<a href="/b">Drilling campaign starts</a>"#),
        ]);
        let summarizer = CountingSummarizer::new();
        let mut config = AppConfig::default();
        config.sites = vec![first.to_string(), second.to_string()];
        config.workers = 4;

        let records = run(&config, &fetcher, &summarizer, &CancelFlag::new()).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].site, "https://first.example.test");
        assert_eq!(records[1].site, "https://second.example.test");
    }
}
