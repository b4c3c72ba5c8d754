use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;

use super::errors::{ApiError, CSV_FAILED, INVALID_URL, NO_MOVIES_PROVIDED};
use super::models::{ExportRequest, ScrapeRequest, ScrapeResponse};
use super::AppState;
use crate::crawler::crawl_list;
use crate::output::{encode_csv, CSV_CONTENT_TYPE, CSV_FILENAME};

pub async fn scrape_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let start = Instant::now();

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Malformed scrape request: {}", rejection.body_text());
        ApiError::bad_request(INVALID_URL)
    })?;

    let url = request.url.unwrap_or_default();
    let result = crawl_list(&state.client, &state.config, &url).await?;

    tracing::info!(
        "Scraped {} movies from {} in {}ms",
        result.count,
        url.trim(),
        start.elapsed().as_millis()
    );

    Ok(Json(ScrapeResponse {
        success: true,
        count: result.count,
        movies: result.titles,
    }))
}

pub async fn download_handler(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let movies = match payload {
        Ok(Json(ExportRequest {
            movies: Some(movies),
        })) if !movies.is_empty() => movies,
        Ok(_) => return Err(ApiError::bad_request(NO_MOVIES_PROVIDED)),
        Err(rejection) => {
            tracing::warn!("Malformed download request: {}", rejection.body_text());
            return Err(ApiError::bad_request(NO_MOVIES_PROVIDED));
        }
    };

    let document = encode_csv(&movies).map_err(|e| {
        tracing::error!("CSV generation error: {}", e);
        ApiError::internal(CSV_FAILED)
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        document,
    )
        .into_response())
}
