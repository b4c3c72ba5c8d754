//! Page fetcher
//!
//! This module performs the single GET behind each pagination step and
//! classifies the response. It never retries: the pagination driver decides
//! what a failure means based on which page it was.

use crate::crawler::client::BrowserClient;
use async_trait::async_trait;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, DNS, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page body is available
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Anything that can produce list pages for the pagination driver
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page by absolute URL
    async fn fetch_page(&self, url: &str) -> FetchResult;
}

#[async_trait]
impl PageSource for BrowserClient {
    async fn fetch_page(&self, url: &str) -> FetchResult {
        fetch_url(self, url).await
    }
}

/// Fetches a list page with the shared request profile
///
/// # Arguments
///
/// * `client` - The shared browser client
/// * `url` - The page URL to fetch
///
/// # Returns
///
/// A FetchResult carrying the body, the upstream status, or the network error
pub async fn fetch_url(client: &BrowserClient, url: &str) -> FetchResult {
    let response = match client.page_request(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_network_error(url, &e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        tracing::debug!("GET {} returned HTTP {}", url, status.as_u16());
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_network_error(url, &e),
    }
}

fn classify_network_error(url: &str, e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection failed".to_string()
    } else {
        e.to_string()
    };

    tracing::debug!("GET {} failed: {}", url, e);
    FetchResult::NetworkError { error }
}
