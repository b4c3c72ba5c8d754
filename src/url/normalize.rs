use crate::config::SiteConfig;
use crate::UrlError;
use url::Url;

/// Path segment that precedes the page number in paginated list URLs
const PAGE_SEGMENT: &str = "page";

/// Normalizes a list URL into its pagination root
///
/// # Normalization Steps
///
/// 1. Reject input that does not start with the canonical site prefix
/// 2. Parse the URL; reject if malformed
/// 3. Remove query string and fragment
/// 4. Collapse trailing slashes to exactly one
/// 5. Strip a trailing `/page/<n>/` so the result is the page-1 URL
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize (already resolved if it was a short link)
/// * `site` - Site prefixes from the configuration
///
/// # Returns
///
/// * `Ok(Url)` - The pagination root
/// * `Err(UrlError)` - Foreign or malformed URL
///
/// # Examples
///
/// ```
/// use letterboxd_export::config::SiteConfig;
/// use letterboxd_export::url::normalize_list_url;
///
/// let site = SiteConfig::default();
/// let url = normalize_list_url("https://letterboxd.com/dave/list/top-250/page/3/?sort=name", &site).unwrap();
/// assert_eq!(url.as_str(), "https://letterboxd.com/dave/list/top-250/");
/// ```
pub fn normalize_list_url(url_str: &str, site: &SiteConfig) -> Result<Url, UrlError> {
    if !url_str.starts_with(&site.canonical_prefix) {
        return Err(UrlError::ForeignSite(url_str.to_string()));
    }

    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(UrlError::Malformed(url_str.to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    Ok(url)
}

/// Builds the URL of page `page` below a pagination root
///
/// Page 1 is the root itself; later pages append `page/<n>/`.
pub fn page_url(root: &Url, page: u32) -> String {
    if page <= 1 {
        root.to_string()
    } else {
        format!("{}{}/{}/", root, PAGE_SEGMENT, page)
    }
}

/// Reduces a path to its list root with exactly one trailing slash
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let root = strip_page_suffix(trimmed);
    format!("{}/", root)
}

/// Removes a final `/page/<digits>` pair of segments, if present
fn strip_page_suffix(path: &str) -> &str {
    let Some((head, last)) = path.rsplit_once('/') else {
        return path;
    };

    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return path;
    }

    match head.strip_suffix(PAGE_SEGMENT) {
        Some(rest) if rest.ends_with('/') => rest.trim_end_matches('/'),
        _ => path,
    }
}
