use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::models::ErrorResponse;
use crate::CrawlError;

pub const INVALID_URL: &str = "Please enter a valid Letterboxd URL.";
pub const NO_MOVIES_FOUND: &str = "No movies found. Please check the URL or try a different list.";
pub const SCRAPE_FAILED: &str = "An error occurred while scraping. Please try again.";
pub const NO_MOVIES_PROVIDED: &str = "No movies provided for CSV generation.";
pub const CSV_FAILED: &str = "An error occurred while generating the CSV.";

/// Caller-facing failure: a status code and a short message
///
/// Internal detail is logged where the error is created and never reaches
/// the response body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CrawlError> for ApiError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Validation(detail) => {
                tracing::warn!("Rejected scrape request: {}", detail);
                Self::bad_request(INVALID_URL)
            }
            CrawlError::Resolution(message) => Self::bad_request(message),
            CrawlError::Fetch {
                url,
                status,
                message,
            } => {
                tracing::warn!("First page fetch failed for {}: {}", url, message);
                match status {
                    Some(status) => Self::bad_request(format!(
                        "Failed to fetch the Letterboxd page. Status: {}",
                        status
                    )),
                    None => Self::bad_request("Failed to fetch the Letterboxd page."),
                }
            }
            CrawlError::NoResults => Self {
                status: StatusCode::NOT_FOUND,
                message: NO_MOVIES_FOUND.to_string(),
            },
            CrawlError::Internal(detail) => {
                tracing::error!("Scraping error: {}", detail);
                Self::internal(SCRAPE_FAILED)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
