use serde::Deserialize;

/// Main configuration structure
///
/// Every section has defaults, so an empty file (or no file at all) yields a
/// working configuration pointed at letterboxd.com.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Which site is crawled and which host serves its short links
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Full-URL prefix every list URL must start with
    #[serde(rename = "canonical-prefix", default = "default_canonical_prefix")]
    pub canonical_prefix: String,

    /// Full-URL prefix identifying short links
    #[serde(rename = "short-link-prefix", default = "default_short_link_prefix")]
    pub short_link_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            canonical_prefix: default_canonical_prefix(),
            short_link_prefix: default_short_link_prefix(),
        }
    }
}

/// Request profile shared by every outbound call
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Upper bound on a whole request, in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Redirect hops followed by page fetches (link resolution never follows)
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Pagination limits
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Last page number that will ever be fetched
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

/// HTTP API listener
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_canonical_prefix() -> String {
    "https://letterboxd.com/".to_string()
}

fn default_short_link_prefix() -> String {
    "https://boxd.it/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_max_pages() -> u32 {
    20
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
