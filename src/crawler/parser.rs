//! Title extraction for list pages
//!
//! List markup differs between page types (lists, profiles, watchlists) and
//! has shifted over time, so titles are located with an ordered chain of
//! structural strategies. The first strategy that yields at least one title
//! wins for that page; results are never merged across strategies.

use scraper::{ElementRef, Html, Selector};

/// Links that mark the presence of a following page
const NEXT_PAGE_SELECTOR: &str = "a.next, .paginate-nextprev a.next, .pagination a.next";

/// One structural pattern for locating film titles
#[derive(Clone, Copy)]
pub struct ExtractionStrategy {
    /// Short name used in logs
    pub name: &'static str,
    /// Pure extraction over a parsed document, in document order
    pub extract: fn(&Html) -> Vec<String>,
}

impl std::fmt::Debug for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionStrategy")
            .field("name", &self.name)
            .finish()
    }
}

/// The fallback chain, in priority order
pub const STRATEGIES: [ExtractionStrategy; 6] = [
    ExtractionStrategy {
        name: "poster-image-alt",
        extract: poster_image_alt,
    },
    ExtractionStrategy {
        name: "data-film-name",
        extract: data_film_name,
    },
    ExtractionStrategy {
        name: "headline-link",
        extract: headline_link_text,
    },
    ExtractionStrategy {
        name: "poster-container",
        extract: poster_container_alt,
    },
    ExtractionStrategy {
        name: "film-poster",
        extract: film_poster_alt,
    },
    ExtractionStrategy {
        name: "linked-film-poster",
        extract: linked_film_poster_alt,
    },
];

/// Extracted information from one list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Titles in page order (possibly empty)
    pub titles: Vec<String>,

    /// Name of the strategy that produced the titles
    pub strategy: Option<&'static str>,

    /// Whether a "next page" link is present
    pub has_next_page: bool,
}

/// Parses a fetched page and extracts its titles and pagination marker
///
/// # Example
///
/// ```
/// use letterboxd_export::crawler::parse_list_page;
///
/// let html = r#"<ul><li class="poster-container"><img alt="Alien (1979)"></li></ul>
///               <a class="next" href="/page/2/">Next</a>"#;
/// let page = parse_list_page(html);
/// assert_eq!(page.titles, vec!["Alien (1979)".to_string()]);
/// assert!(page.has_next_page);
/// ```
pub fn parse_list_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);
    let (strategy, titles) = match extract_titles(&document) {
        Some((name, titles)) => (Some(name), titles),
        None => (None, Vec::new()),
    };

    ParsedPage {
        titles,
        strategy,
        has_next_page: has_next_page(&document),
    }
}

/// Runs the strategy chain, stopping at the first non-empty result
///
/// Returns `None` when every strategy comes up empty, which the pagination
/// driver treats as the end of the list.
pub fn extract_titles(document: &Html) -> Option<(&'static str, Vec<String>)> {
    STRATEGIES.iter().find_map(|strategy| {
        let titles = (strategy.extract)(document);
        if titles.is_empty() {
            None
        } else {
            Some((strategy.name, titles))
        }
    })
}

/// Checks for a recognized "next page" navigation link
pub fn has_next_page(document: &Html) -> bool {
    match Selector::parse(NEXT_PAGE_SELECTOR) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

/// Strategy 1: poster images inside list or poster containers
fn poster_image_alt(document: &Html) -> Vec<String> {
    select_attr(
        document,
        ".poster-container img, .film-poster img, li.poster-container img",
        "alt",
    )
}

/// Strategy 2: elements carrying a film-name data attribute
fn data_film_name(document: &Html) -> Vec<String> {
    select_attr(document, "[data-film-name]", "data-film-name")
}

/// Strategy 3: headline links in film detail blocks
fn headline_link_text(document: &Html) -> Vec<String> {
    select_text(
        document,
        ".headline-2 a, .film-detail .headline-3 a, h2.headline-2 a",
    )
}

/// Strategy 4: list poster containers, first image inside each
fn poster_container_alt(document: &Html) -> Vec<String> {
    select_inner_image_alt(document, "li.poster-container")
}

/// Strategy 5: generic film posters, first image inside each
fn film_poster_alt(document: &Html) -> Vec<String> {
    select_inner_image_alt(document, ".film-poster")
}

/// Strategy 6: linked film posters, first image inside each
fn linked_film_poster_alt(document: &Html) -> Vec<String> {
    select_inner_image_alt(document, ".linked-film-poster")
}

fn select_attr(document: &Html, css: &str, attr: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(clean_title)
        .collect()
}

fn select_text(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .filter_map(|text| clean_title(&text))
        .collect()
}

fn select_inner_image_alt(document: &Html, container_css: &str) -> Vec<String> {
    let (Ok(container), Ok(image)) = (Selector::parse(container_css), Selector::parse("img"))
    else {
        return Vec::new();
    };

    document
        .select(&container)
        .filter_map(|element| first_image_alt(element, &image))
        .filter_map(clean_title)
        .collect()
}

fn first_image_alt<'a>(container: ElementRef<'a>, image: &Selector) -> Option<&'a str> {
    container
        .select(image)
        .next()
        .and_then(|img| img.value().attr("alt"))
}

/// Trims a candidate title; empty candidates are dropped
fn clean_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
