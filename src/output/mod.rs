//! Output module for exporting crawl results
//!
//! This module turns a title list into the CSV document accepted by the
//! Letterboxd importer.

mod csv_export;

pub use csv_export::{
    encode_csv, prepare_title, strip_year, CSV_CONTENT_TYPE, CSV_FILENAME, CSV_HEADER,
};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
