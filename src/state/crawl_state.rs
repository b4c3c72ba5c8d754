//! Pagination state machine for a single list crawl
//!
//! `Fetching(1)` is the initial state; `Done` and `Failed` are terminal.
use std::fmt;
use thiserror::Error;

/// Represents where a crawl is in its page-by-page loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// Page `n` is being fetched and parsed
    Fetching(u32),

    /// Page `n` produced titles; `has_next` records its "next page" marker
    HasTitles { page: u32, has_next: bool },

    /// The last page fetched produced no titles (end of list)
    NoTitles,

    // ===== Terminal States =====
    /// Pagination finished normally
    Done,

    /// The first page could not be fetched
    Failed,
}

/// What happened when a page was fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// At least one title was extracted
    Titles { has_next: bool },
    /// Fetched fine, but no strategy found a title
    Empty,
    /// Non-2xx status or network failure
    Unavailable,
}

/// Returned when an event arrives in a state that cannot accept it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid crawl state transition from {from}")]
pub struct InvalidTransition {
    pub from: CrawlState,
}

impl CrawlState {
    /// The state every crawl starts in
    pub fn initial() -> Self {
        Self::Fetching(1)
    }

    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the crawl ended normally
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Applies the outcome of fetching the current page
    ///
    /// Only valid in `Fetching`. An unavailable first page fails the crawl; an
    /// unavailable later page means the list ran out.
    pub fn on_page(self, outcome: PageOutcome) -> Result<Self, InvalidTransition> {
        let Self::Fetching(page) = self else {
            return Err(InvalidTransition { from: self });
        };

        Ok(match outcome {
            PageOutcome::Titles { has_next } => Self::HasTitles { page, has_next },
            PageOutcome::Empty => Self::NoTitles,
            PageOutcome::Unavailable if page <= 1 => Self::Failed,
            PageOutcome::Unavailable => Self::Done,
        })
    }

    /// Decides whether another page is fetched
    ///
    /// Stops unconditionally once `max_pages` has been processed.
    pub fn advance(self, max_pages: u32) -> Result<Self, InvalidTransition> {
        match self {
            Self::HasTitles { page, has_next } if has_next && page < max_pages => {
                Ok(Self::Fetching(page + 1))
            }
            Self::HasTitles { .. } | Self::NoTitles => Ok(Self::Done),
            _ => Err(InvalidTransition { from: self }),
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching(page) => write!(f, "fetching({})", page),
            Self::HasTitles { page, .. } => write!(f, "has_titles({})", page),
            Self::NoTitles => write!(f, "no_titles"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
