//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional; missing ones fall back to the letterboxd.com defaults.
//!
//! # Example
//!
//! ```no_run
//! use letterboxd_export::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will stop after page {}", config.crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig, ServerConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
