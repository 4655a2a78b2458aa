//! Data models for discovered links and persisted article records.
//!
//! This module defines the core data structures that flow through the
//! pipeline:
//! - [`SiteTarget`]: a configured entry page to crawl
//! - [`CandidateLink`]: an anchor that survived the allow/deny filters
//! - [`ArticleRecord`]: one fully processed article, ready for the snapshot
//!
//! The `ArticleRecord` field names are renamed on serialization to match the
//! fixed snapshot schema (`Site, Title, URL, Summary, Scraped_At`) that
//! external readers depend on.

use serde::Serialize;
use url::Url;

/// A configured site whose entry page is crawled for article links.
///
/// Built once per run from the configuration's site list. Entry URLs must be
/// well-formed absolute URLs; anything else is rejected at parse time so the
/// rest of the pipeline can rely on `entry_url` as a join base.
#[derive(Debug, Clone)]
pub struct SiteTarget {
    /// The absolute URL of the site's entry page.
    pub entry_url: Url,
}

impl SiteTarget {
    /// Parse a configured entry URL into a [`SiteTarget`].
    pub fn parse(entry_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            entry_url: Url::parse(entry_url)?,
        })
    }
}

/// An anchor discovered on a site's entry page that passed link filtering.
///
/// Within one site's discovery pass no two candidates share the same
/// `(title, url)` pair; discovery deduplicates on the whole struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateLink {
    /// The anchor's visible text, trimmed.
    pub title: String,
    /// The href resolved to an absolute URL against the site base.
    pub url: String,
}

/// One processed article as persisted in the snapshot.
///
/// Created once per surviving candidate and never mutated afterwards. The
/// orchestrator owns records exclusively until they are handed to the
/// snapshot store.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    /// Scheme and host of the article URL, e.g. `https://gcaptain.com`.
    #[serde(rename = "Site")]
    pub site: String,
    /// The candidate link's title.
    #[serde(rename = "Title")]
    pub title: String,
    /// The absolute article URL.
    #[serde(rename = "URL")]
    pub url: String,
    /// A generated summary, or one of the sentinel strings.
    #[serde(rename = "Summary")]
    pub summary: String,
    /// Capture time, formatted `YYYY-MM-DD HH:MM`.
    #[serde(rename = "Scraped_At")]
    pub scraped_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_target_parses_absolute_url() {
        let site = SiteTarget::parse("https://gcaptain.com/").unwrap();
        assert_eq!(site.entry_url.scheme(), "https");
        assert_eq!(site.entry_url.host_str(), Some("gcaptain.com"));
    }

    #[test]
    fn test_site_target_rejects_relative_url() {
        assert!(SiteTarget::parse("/news/latest").is_err());
    }

    #[test]
    fn test_candidate_link_equality_on_pair() {
        let a = CandidateLink {
            title: "Shell FID Announced".to_string(),
            url: "https://example.com/news/shell-fid".to_string(),
        };
        let b = a.clone();
        let c = CandidateLink {
            title: "Shell FID Announced".to_string(),
            url: "https://example.com/news/shell-fid-2".to_string(),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_article_record_serializes_snapshot_field_names() {
        let record = ArticleRecord {
            site: "https://gcaptain.com".to_string(),
            title: "Pipelay Vessel Delivered".to_string(),
            url: "https://gcaptain.com/pipelay-vessel".to_string(),
            summary: "A new pipelay vessel entered service.".to_string(),
            scraped_at: "2025-11-03 14:30".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        for field in ["Site", "Title", "URL", "Summary", "Scraped_At"] {
            assert!(json.contains(field), "missing renamed field {field}");
        }
    }
}
