//! Link discovery: filter a site's entry page down to candidate articles.
//!
//! Every anchor on the entry page runs through four independent filters:
//! non-empty title and href, no deny-substring in the href, href not ending
//! in a bare `.biz` (trade-press sites on that TLD carry malformed
//! self-referential links), and at least one allow-keyword in the title.
//! Survivors are resolved to absolute URLs and deduplicated on the
//! (title, url) pair.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::AppConfig;
use crate::fetch::FetchPage;
use crate::models::{CandidateLink, SiteTarget};

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Fetch a site's entry page and return its candidate article links.
///
/// Network failure is recorded and yields an empty set; discovery never
/// aborts the run.
#[instrument(level = "info", skip_all, fields(site = %site.entry_url))]
pub async fn discover_links<F: FetchPage>(
    fetcher: &F,
    site: &SiteTarget,
    config: &AppConfig,
) -> Vec<CandidateLink> {
    let html = match fetcher.fetch_text(site.entry_url.as_str()).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Entry page fetch failed; no links from this site");
            return Vec::new();
        }
    };

    let links = collect_candidate_links(&html, &site.entry_url, config);
    info!(count = links.len(), "Discovered candidate links");
    debug!(links = ?links, "Candidates");
    links
}

/// Filter the anchors of an already fetched entry page.
///
/// Pure over the HTML; see the module docs for the filter set. Candidates
/// come back in document order, deduplicated.
pub fn collect_candidate_links(
    html: &str,
    base: &Url,
    config: &AppConfig,
) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let title = anchor
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .join(" ");
            let href = anchor.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                return None;
            }

            let href_lower = href.to_lowercase();
            if config
                .deny_substrings
                .iter()
                .any(|deny| href_lower.contains(&deny.to_lowercase()))
            {
                return None;
            }
            if href.trim_end_matches('/').ends_with(".biz") {
                return None;
            }

            let resolved = base.join(href).ok()?;

            let title_lower = title.to_lowercase();
            config
                .allow_keywords
                .iter()
                .any(|keyword| title_lower.contains(&keyword.to_lowercase()))
                .then(|| CandidateLink {
                    title,
                    url: resolved.to_string(),
                })
        })
        .unique()
        .collect()
}
