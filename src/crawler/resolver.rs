//! Short-link resolution
//!
//! A short link is resolved with one HEAD request that does not follow
//! redirects, so the `Location` header can be checked against the canonical
//! site before anything is crawled. Exactly one hop is taken: a short link
//! that redirects to another short link is rejected.

use crate::config::SiteConfig;
use crate::crawler::client::BrowserClient;
use crate::url::is_canonical;
use crate::CrawlError;
use reqwest::header::LOCATION;

/// Message for a redirect that lands somewhere other than the canonical site
pub const FOREIGN_REDIRECT: &str = "Short URL did not redirect to a valid Letterboxd page.";

/// Message for a short link that answered without a usable redirect
pub const UNRESOLVED: &str = "Could not resolve short URL.";

/// Message for a network failure during resolution
pub const RESOLUTION_FAILED: &str = "Failed to resolve short URL.";

/// Resolves a short link into a canonical-site URL
///
/// # Resolution Rules
///
/// | Response | Result |
/// |----------|--------|
/// | 3xx with `Location` on the canonical site | that location |
/// | 3xx without `Location`, or pointing elsewhere | `Resolution` error |
/// | 2xx whose final URL is on the canonical site | the final URL |
/// | anything else | `Resolution` error |
///
/// A relative `Location` is resolved against the short link before the check.
///
/// # Arguments
///
/// * `client` - The shared browser client
/// * `short_url` - The short link to resolve
/// * `site` - Site prefixes from the configuration
pub async fn resolve_short_link(
    client: &BrowserClient,
    short_url: &str,
    site: &SiteConfig,
) -> Result<String, CrawlError> {
    let response = client.probe_request(short_url).send().await.map_err(|e| {
        tracing::warn!("Short link {} could not be requested: {}", short_url, e);
        CrawlError::Resolution(RESOLUTION_FAILED.to_string())
    })?;

    let status = response.status();

    if status.is_redirection() {
        let target = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| response.url().join(location).ok());

        return match target {
            Some(target) if is_canonical(target.as_str(), site) => {
                tracing::info!("Resolved short link {} -> {}", short_url, target);
                Ok(target.to_string())
            }
            other => {
                tracing::warn!(
                    "Short link {} redirected (HTTP {}) to {:?}, outside the list site",
                    short_url,
                    status.as_u16(),
                    other.map(|u| u.to_string())
                );
                Err(CrawlError::Resolution(FOREIGN_REDIRECT.to_string()))
            }
        };
    }

    // Transports that follow redirects on their own report the landing URL
    let final_url = response.url().as_str();
    if status.is_success() && is_canonical(final_url, site) {
        tracing::info!("Short link {} already landed on {}", short_url, final_url);
        return Ok(final_url.to_string());
    }

    tracing::warn!(
        "Short link {} did not resolve (HTTP {}, final URL {})",
        short_url,
        status.as_u16(),
        final_url
    );
    Err(CrawlError::Resolution(UNRESOLVED.to_string()))
}
