//! URL handling module
//!
//! This module classifies submitted URLs against the configured site
//! prefixes, normalizes list URLs into pagination roots, and derives the URL
//! of every page below a root.

mod normalize;

use crate::config::SiteConfig;

// Re-export main functions
pub use normalize::{normalize_list_url, page_url};

/// What kind of link a submitted URL is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Short link that must be resolved before crawling
    ShortLink,
    /// Already on the canonical site
    Canonical,
    /// Anything else - rejected
    Foreign,
}

impl LinkKind {
    /// Returns true if the link can be crawled, possibly after resolution
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::ShortLink | Self::Canonical)
    }
}

/// Classifies a raw URL by its prefix
///
/// Short links are checked first so a short-link prefix nested under the
/// canonical prefix still resolves.
///
/// # Examples
///
/// ```
/// use letterboxd_export::config::SiteConfig;
/// use letterboxd_export::url::{classify_link, LinkKind};
///
/// let site = SiteConfig::default();
/// assert_eq!(classify_link("https://boxd.it/nVqt6", &site), LinkKind::ShortLink);
/// assert_eq!(classify_link("https://letterboxd.com/dave/list/x/", &site), LinkKind::Canonical);
/// assert_eq!(classify_link("https://example.com/", &site), LinkKind::Foreign);
/// ```
pub fn classify_link(raw: &str, site: &SiteConfig) -> LinkKind {
    if raw.starts_with(&site.short_link_prefix) {
        LinkKind::ShortLink
    } else if raw.starts_with(&site.canonical_prefix) {
        LinkKind::Canonical
    } else {
        LinkKind::Foreign
    }
}

/// Returns true if the URL is on the canonical site
pub fn is_canonical(raw: &str, site: &SiteConfig) -> bool {
    classify_link(raw, site) == LinkKind::Canonical
}
