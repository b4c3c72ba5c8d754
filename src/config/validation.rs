use crate::config::types::{Config, CrawlConfig, HttpConfig, ServerConfig, SiteConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Upper bound accepted for `crawl.max-pages`
const MAX_PAGES_CEILING: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_crawl_config(&config.crawl)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates the site prefixes
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_prefix("canonical-prefix", &config.canonical_prefix)?;
    validate_prefix("short-link-prefix", &config.short_link_prefix)?;

    if config.canonical_prefix == config.short_link_prefix {
        return Err(ConfigError::Validation(
            "canonical-prefix and short-link-prefix must differ".to_string(),
        ));
    }

    Ok(())
}

/// A prefix must be an absolute http(s) URL ending in '/'
fn validate_prefix(name: &str, prefix: &str) -> Result<(), ConfigError> {
    let url = Url::parse(prefix)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, prefix, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use an http(s) scheme",
            name, prefix
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            name, prefix
        )));
    }

    if !prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must end with '/'",
            name, prefix
        )));
    }

    Ok(())
}

/// Validates the request profile
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates pagination limits
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 || config.max_pages > MAX_PAGES_CEILING {
        return Err(ConfigError::Validation(format!(
            "max-pages must be between 1 and {}, got {}",
            MAX_PAGES_CEILING, config.max_pages
        )));
    }

    Ok(())
}

/// Validates the listener address
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;

    Ok(())
}
