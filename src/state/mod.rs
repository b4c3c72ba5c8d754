//! State module for tracking pagination progress
//!
//! # Components
//!
//! - `CrawlState`: where a crawl is in its page loop (fetching, has titles, done, ...)
//! - `PageOutcome`: the event produced by fetching and parsing one page

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlState, InvalidTransition, PageOutcome};
