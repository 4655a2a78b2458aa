//! Static configuration loaded once at process start.
//!
//! Every knob the pipeline consults lives here: the site list, the link
//! filter vocabularies, the article container markers, HTTP and retry
//! policy, and the extraction bounds. The defaults reproduce the production
//! crawl targets; a YAML file can override any subset of fields since
//! everything is `#[serde(default)]`.
//!
//! # Example
//!
//! ```yaml
//! sites:
//!   - "https://gcaptain.com/"
//! allow_keywords: ["LNG", "Drilling"]
//! workers: 4
//! summarizer:
//!   endpoint: "http://summarizer.internal:8080/summarize"
//! ```

use serde::Deserialize;
use std::error::Error;
use tracing::info;

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Entry pages to crawl, in run order.
    pub sites: Vec<String>,
    /// A link is kept only if its title contains one of these, case-insensitively.
    pub allow_keywords: Vec<String>,
    /// A link is dropped if its href contains one of these, case-insensitively.
    pub deny_substrings: Vec<String>,
    /// Known article-body container class names, tried in order.
    pub article_classes: Vec<String>,
    pub http: HttpConfig,
    pub summarizer: SummarizerConfig,
    pub extraction: ExtractionConfig,
    /// Site-level worker pool size. 1 means fully sequential.
    pub workers: usize,
    /// Where the snapshot CSV is written.
    pub snapshot_path: String,
}

/// Fetch policy shared by link discovery and content extraction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Summarization backend and degradation policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// HTTP endpoint of the summarization service.
    pub endpoint: String,
    /// Lower bound on generated summary length, in tokens.
    pub min_tokens: u32,
    /// Upper bound on generated summary length, in tokens.
    pub max_tokens: u32,
    /// Additional attempts after the first failure.
    pub retries: usize,
    /// Fixed delay between attempts.
    pub retry_delay_secs: u64,
    /// Inputs below this word count are not worth summarizing.
    pub min_words: usize,
}

/// Bounds on extracted article text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extracted text must exceed this many characters to count as content.
    pub min_chars: usize,
    /// Extracted text is truncated to this many characters.
    pub max_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sites: [
                "https://www.offshorewind.biz/",
                "https://www.upstreamonline.com/",
                "https://www.rechargenews.com/",
                "https://www.offshore-energy.biz/",
                "https://gcaptain.com/",
                "https://www.oedigital.com/",
                "https://maritime-executive.com/",
                "https://www.marinelink.com/",
                "https://www.tradewindsnews.com/",
            ]
            .map(String::from)
            .to_vec(),
            allow_keywords: [
                "FID",
                "LNG",
                "Offshore",
                "Drilling",
                "Shell",
                "Transocean",
                "Floating Wind",
                "Pipelay Vessel",
            ]
            .map(String::from)
            .to_vec(),
            deny_substrings: [
                "about",
                "privacy",
                "cookie",
                "contact",
                "events",
                "magazine",
                "tag",
                "topic",
                "category",
                "terms",
                ".pdf",
                "advertise",
                "media",
                "jobs",
                "newsletter",
                "feedback",
            ]
            .map(String::from)
            .to_vec(),
            article_classes: [
                "article__body",
                "entry-content",
                "article-body",
                "post-content",
                "main-content",
                "td-post-content",
                "article-content",
                "single-content",
                "c-article-body",
            ]
            .map(String::from)
            .to_vec(),
            http: HttpConfig::default(),
            summarizer: SummarizerConfig::default(),
            extraction: ExtractionConfig::default(),
            workers: 1,
            snapshot_path: "all_sites_summaries.csv".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/summarize".to_string(),
            min_tokens: 30,
            max_tokens: 100,
            retries: 2,
            retry_delay_secs: 2,
            min_words: 50,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_chars: 100,
            max_chars: 3000,
        }
    }
}

/// Load configuration from a YAML file, or fall back to the defaults.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let config: AppConfig = serde_yaml::from_str(&raw)?;
            info!(path, sites = config.sites.len(), "Loaded configuration");
            Ok(config)
        }
        None => {
            let config = AppConfig::default();
            info!(sites = config.sites.len(), "Using built-in configuration");
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_crawl_policy() {
        let config = AppConfig::default();
        assert_eq!(config.sites.len(), 9);
        assert_eq!(config.article_classes.len(), 9);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.summarizer.retries, 2);
        assert_eq!(config.summarizer.retry_delay_secs, 2);
        assert_eq!(config.summarizer.min_words, 50);
        assert_eq!(config.extraction.min_chars, 100);
        assert_eq!(config.extraction.max_chars, 3000);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_partial_yaml_overrides_keep_defaults() {
        let yaml = r#"
sites:
  - "https://gcaptain.com/"
workers: 4
summarizer:
  retries: 5
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sites, vec!["https://gcaptain.com/"]);
        assert_eq!(config.workers, 4);
        assert_eq!(config.summarizer.retries, 5);
        // untouched fields keep their defaults
        assert_eq!(config.summarizer.min_words, 50);
        assert_eq!(config.extraction.max_chars, 3000);
        assert_eq!(config.deny_substrings.len(), 16);
    }

    #[test]
    fn test_empty_yaml_is_full_default() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.sites.len(), 9);
        assert_eq!(config.snapshot_path, "all_sites_summaries.csv");
    }
}
