//! Pagination driver
//!
//! Walks a list page by page, strictly sequentially, because whether page
//! `n + 1` is fetched depends on both the titles and the "next page" marker
//! of page `n`. All working state lives in one `crawl` call.

use crate::crawler::fetcher::{FetchResult, PageSource};
use crate::crawler::parser::parse_list_page;
use crate::state::{CrawlState, PageOutcome};
use crate::url::page_url;
use crate::CrawlError;
use std::collections::HashSet;
use url::Url;

/// Titles and pagination marker of one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub page_number: u32,
    pub titles: Vec<String>,
    pub has_next_page: bool,
}

/// Final, deduplicated result of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// Titles in first-seen order across all pages
    pub titles: Vec<String>,
    /// Always `titles.len()`
    pub count: usize,
}

impl CrawlResult {
    /// Builds a result from accumulated titles, dropping repeats
    pub fn from_titles(titles: Vec<String>) -> Self {
        let titles = dedupe_titles(titles);
        let count = titles.len();
        Self { titles, count }
    }
}

/// Keeps the first occurrence of each exact title, preserving order
pub fn dedupe_titles(mut titles: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(titles.len());
    titles.retain(|title| seen.insert(title.clone()));
    titles
}

/// Drives fetch + extract cycles over one list
pub struct ListCrawler<'a, S: PageSource> {
    source: &'a S,
    max_pages: u32,
}

impl<'a, S: PageSource> ListCrawler<'a, S> {
    /// Creates a crawler that will never go past page `max_pages`
    pub fn new(source: &'a S, max_pages: u32) -> Self {
        Self { source, max_pages }
    }

    /// Crawls every page below `root` and returns the deduplicated titles
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - At least one title was found
    /// * `Err(CrawlError::Fetch)` - The first page could not be fetched
    /// * `Err(CrawlError::NoResults)` - Pagination finished with no titles
    pub async fn crawl(&self, root: &Url) -> Result<CrawlResult, CrawlError> {
        let titles = self.collect_titles(root).await?;
        let result = CrawlResult::from_titles(titles);

        if result.titles.is_empty() {
            tracing::warn!("No titles found below {}", root);
            return Err(CrawlError::NoResults);
        }

        Ok(result)
    }

    /// Runs the page loop and returns every title seen, repeats included
    pub async fn collect_titles(&self, root: &Url) -> Result<Vec<String>, CrawlError> {
        let mut state = CrawlState::initial();
        let mut titles = Vec::new();
        let mut failure = None;

        while !state.is_terminal() {
            state = match state {
                CrawlState::Fetching(page) => {
                    let url = page_url(root, page);
                    let outcome = match self.source.fetch_page(&url).await {
                        FetchResult::Success { body, .. } => {
                            let result = fetched_page(page, &body);
                            let outcome = if result.titles.is_empty() {
                                tracing::debug!("Page {} ({}) has no titles", page, url);
                                PageOutcome::Empty
                            } else {
                                PageOutcome::Titles {
                                    has_next: result.has_next_page,
                                }
                            };
                            titles.extend(result.titles);
                            outcome
                        }
                        FetchResult::HttpError { status_code } => {
                            log_unavailable(page, &url, &format!("HTTP {}", status_code));
                            failure = Some(CrawlError::Fetch {
                                url: url.clone(),
                                status: Some(status_code),
                                message: format!("HTTP {}", status_code),
                            });
                            PageOutcome::Unavailable
                        }
                        FetchResult::NetworkError { error } => {
                            log_unavailable(page, &url, &error);
                            failure = Some(CrawlError::Fetch {
                                url: url.clone(),
                                status: None,
                                message: error,
                            });
                            PageOutcome::Unavailable
                        }
                    };
                    state.on_page(outcome)?
                }
                CrawlState::HasTitles { page, has_next } => {
                    if has_next && page >= self.max_pages {
                        tracing::info!("Stopping at page cap ({}) for {}", self.max_pages, root);
                    }
                    state.advance(self.max_pages)?
                }
                CrawlState::NoTitles => state.advance(self.max_pages)?,
                CrawlState::Done | CrawlState::Failed => state,
            };
        }

        if state == CrawlState::Failed {
            return Err(failure.unwrap_or_else(|| {
                CrawlError::Internal("first page failed without an error".to_string())
            }));
        }

        tracing::info!("Collected {} titles below {}", titles.len(), root);
        Ok(titles)
    }
}

fn fetched_page(page: u32, body: &str) -> PageResult {
    let parsed = parse_list_page(body);
    tracing::debug!(
        "Page {}: {} titles via {:?}, next page: {}",
        page,
        parsed.titles.len(),
        parsed.strategy,
        parsed.has_next_page
    );

    PageResult {
        page_number: page,
        titles: parsed.titles,
        has_next_page: parsed.has_next_page,
    }
}

fn log_unavailable(page: u32, url: &str, reason: &str) {
    if page <= 1 {
        tracing::error!("Failed to fetch first page {}: {}", url, reason);
    } else {
        tracing::info!(
            "Page {} ({}) unavailable ({}), treating as end of list",
            page,
            url,
            reason
        );
    }
}
