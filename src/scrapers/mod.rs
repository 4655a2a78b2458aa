//! Crawl stages for turning a site's entry page into article text.
//!
//! The crawl follows a consistent two-phase pattern per site:
//!
//! 1. **Discovery** ([`discovery`]): fetch the entry page and filter its
//!    anchors down to candidate article links
//! 2. **Extraction** ([`content`]): fetch each candidate and recover its
//!    main textual body
//!
//! Both phases share the fetch policy in [`crate::fetch`] and recover from
//! failures locally: a site or page that cannot be fetched yields an empty
//! result and is logged, never a fatal error. HTML parsing uses the
//! `scraper` crate, which is lenient — malformed markup degrades to "no
//! links" or "no content" rather than erroring.
//!
//! The filtering and extraction logic itself is pure over the fetched HTML,
//! so it is testable without a network.

pub mod content;
pub mod discovery;
