//! Content extraction: recover the main textual body of an article page.
//!
//! Article templates vary per site and no single selector works
//! universally, so extraction walks an ordered list of known container
//! class names. The first container whose paragraph text clears the
//! character floor wins; if none does, the fallback concatenates every
//! paragraph on the page. Either way the result is trimmed and capped at
//! the configured character ceiling.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::config::ExtractionConfig;
use crate::fetch::FetchPage;

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Fetch an article page and extract its body text.
///
/// Returns `None` on fetch failure or when no strategy recovers enough
/// text; both outcomes are logged and the run continues.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract_content<F: FetchPage>(
    fetcher: &F,
    url: &str,
    article_classes: &[String],
    config: &ExtractionConfig,
) -> Option<String> {
    let html = match fetcher.fetch_text(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Article fetch failed; no content");
            return None;
        }
    };

    let content = extract_from_html(&html, article_classes, config);
    match &content {
        Some(text) => debug!(chars = text.chars().count(), "Extracted article body"),
        None => debug!("No usable article body on page"),
    }
    content
}

/// Extract body text from already fetched HTML.
///
/// Tries each known container class in order, then falls back to every
/// paragraph on the page. Pure over the HTML.
pub fn extract_from_html(
    html: &str,
    article_classes: &[String],
    config: &ExtractionConfig,
) -> Option<String> {
    let document = Html::parse_document(html);

    for class_name in article_classes {
        if let Some(text) = container_paragraphs(&document, class_name) {
            if let Some(text) = clamp(text, config) {
                debug!(container = %class_name, "Container marker matched");
                return Some(text);
            }
        }
    }

    clamp(page_paragraphs(&document), config)
}

/// Concatenated `<p>` text of the first `div` carrying `class_name`, if any.
fn container_paragraphs(document: &Html, class_name: &str) -> Option<String> {
    let selector = Selector::parse(&format!("div.{class_name}")).ok()?;
    let container = document.select(&selector).next()?;
    Some(
        container
            .select(&PARAGRAPH_SELECTOR)
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Concatenated text of every `<p>` on the page.
fn page_paragraphs(document: &Html) -> String {
    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply the character floor and ceiling to candidate body text.
///
/// Text at or under the floor yields `None`, never an empty string.
fn clamp(text: String, config: &ExtractionConfig) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.chars().count() <= config.min_chars {
        return None;
    }
    Some(trimmed.chars().take(config.max_chars).collect())
}
