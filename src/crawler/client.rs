//! Browser-like HTTP client profile
//!
//! One `BrowserClient` is built per process and shared by the link resolver
//! and the page fetcher, so the request signature lives in one place.

use crate::config::HttpConfig;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use reqwest::{redirect::Policy, Client, RequestBuilder};
use std::time::Duration;

/// HTTP clients plus the headers every request carries
#[derive(Debug, Clone)]
pub struct BrowserClient {
    /// Follows redirects; used for list pages
    pages: Client,
    /// Never follows redirects; used to read short-link `Location` headers
    probe: Client,
    accept: String,
    accept_language: String,
}

impl BrowserClient {
    /// Builds both clients from the request profile
    ///
    /// # Arguments
    ///
    /// * `config` - The `[http]` configuration section
    ///
    /// # Returns
    ///
    /// * `Ok(BrowserClient)` - Successfully built clients
    /// * `Err(reqwest::Error)` - Failed to build a client (e.g. TLS backend init)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use letterboxd_export::config::HttpConfig;
    /// use letterboxd_export::crawler::BrowserClient;
    ///
    /// let client = BrowserClient::new(&HttpConfig::default()).unwrap();
    /// ```
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let pages = base_builder(config)
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        let probe = base_builder(config).redirect(Policy::none()).build()?;

        Ok(Self {
            pages,
            probe,
            accept: config.accept.clone(),
            accept_language: config.accept_language.clone(),
        })
    }

    /// GET request for a list page, with cache bypass
    pub(crate) fn page_request(&self, url: &str) -> RequestBuilder {
        self.pages
            .get(url)
            .header(ACCEPT, &self.accept)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .header(CACHE_CONTROL, "no-cache")
    }

    /// HEAD request that reveals a redirect instead of following it
    pub(crate) fn probe_request(&self, url: &str) -> RequestBuilder {
        self.probe
            .head(url)
            .header(ACCEPT, &self.accept)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
    }
}

fn base_builder(config: &HttpConfig) -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
}
