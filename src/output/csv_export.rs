//! Letterboxd import CSV
//!
//! The importer matches on `Title` alone and resolves release years itself,
//! so a trailing `(YYYY)` is removed from every title before it is written.

use crate::output::OutputError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use once_cell::sync::Lazy;
use regex::Regex;

/// Header row of the import file
pub const CSV_HEADER: &str = "Title";

/// Suggested download name
pub const CSV_FILENAME: &str = "letterboxd_import.csv";

/// Content type served with the document
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

static YEAR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([0-9]{4}\)\s*$").expect("year suffix pattern is valid"));

/// Removes a trailing parenthesized four-digit year
///
/// # Examples
///
/// ```
/// use letterboxd_export::output::strip_year;
///
/// assert_eq!(strip_year("Alien (1979)"), "Alien");
/// assert_eq!(strip_year("2001: A Space Odyssey"), "2001: A Space Odyssey");
/// ```
pub fn strip_year(title: &str) -> String {
    YEAR_SUFFIX.replace(title, "").into_owned()
}

/// Applies the per-row transform; `None` means the row is dropped
pub fn prepare_title(raw: &str) -> Option<String> {
    let title = strip_year(raw.trim());
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Encodes titles as an import CSV document
///
/// One `Title` header row, then one row per title, joined with CRLF and with
/// no terminator after the last row. Fields are quoted only when they contain
/// a comma, a double quote or a line break.
///
/// # Example
///
/// ```
/// use letterboxd_export::output::encode_csv;
///
/// let csv = encode_csv(&["Movie, \"X\" (2023)".to_string(), "Heat".to_string()]).unwrap();
/// assert_eq!(csv, "Title\r\n\"Movie, \"\"X\"\"\"\r\nHeat");
/// ```
pub fn encode_csv(titles: &[String]) -> Result<String, OutputError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record([CSV_HEADER])?;

    let mut rows = 0usize;
    for title in titles.iter().filter_map(|raw| prepare_title(raw)) {
        writer.write_record([title.as_str()])?;
        rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))?;
    let mut document = String::from_utf8(bytes)?;

    if document.ends_with("\r\n") {
        document.truncate(document.len() - 2);
    }

    tracing::debug!("Encoded {} of {} titles as CSV", rows, titles.len());
    Ok(document)
}
