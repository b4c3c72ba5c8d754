//! Crawler module for list fetching and title extraction
//!
//! This module contains the core extraction pipeline:
//! - Browser-like HTTP client profile
//! - Short-link resolution
//! - Page fetching and response classification
//! - Title extraction with a fallback strategy chain
//! - Pagination and deduplication

mod client;
mod coordinator;
mod fetcher;
mod parser;
mod resolver;

pub use client::BrowserClient;
pub use coordinator::{dedupe_titles, CrawlResult, ListCrawler, PageResult};
pub use fetcher::{fetch_url, FetchResult, PageSource};
pub use parser::{
    extract_titles, has_next_page, parse_list_page, ExtractionStrategy, ParsedPage, STRATEGIES,
};
pub use resolver::resolve_short_link;

use crate::config::Config;
use crate::url::{classify_link, normalize_list_url, LinkKind};
use crate::CrawlError;

/// Runs a complete crawl for a submitted URL
///
/// This is the main entry point. It will:
/// 1. Reject empty or foreign URLs
/// 2. Resolve a short link to its canonical URL
/// 3. Normalize the URL into a pagination root
/// 4. Fetch and extract pages until the list ends or the page cap is hit
/// 5. Deduplicate the titles
///
/// # Arguments
///
/// * `client` - The shared browser client
/// * `config` - The loaded configuration
/// * `raw_url` - The URL exactly as submitted
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Titles in first-seen order
/// * `Err(CrawlError)` - Validation, resolution, fetch, or no-results failure
pub async fn crawl_list(
    client: &BrowserClient,
    config: &Config,
    raw_url: &str,
) -> Result<CrawlResult, CrawlError> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return Err(CrawlError::Validation("URL is empty".to_string()));
    }

    let target = match classify_link(raw_url, &config.site) {
        LinkKind::ShortLink => resolve_short_link(client, raw_url, &config.site).await?,
        LinkKind::Canonical => raw_url.to_string(),
        LinkKind::Foreign => {
            tracing::warn!("Rejected URL outside the list site: {}", raw_url);
            return Err(CrawlError::Validation(format!(
                "unsupported URL: {}",
                raw_url
            )));
        }
    };

    let root = normalize_list_url(&target, &config.site)?;
    tracing::info!("Crawling list {} (submitted as {})", root, raw_url);

    ListCrawler::new(client, config.crawl.max_pages)
        .crawl(&root)
        .await
}
