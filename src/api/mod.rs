//! HTTP API for the list exporter
//!
//! Two JSON operations back the form-and-results page:
//! - `POST /api/scrape` crawls a list and returns its titles
//! - `POST /api/download` turns titles into the import CSV

use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::crawler::BrowserClient;

pub mod errors;
pub mod handlers;
pub mod models;

pub use errors::ApiError;

/// Process-wide state shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub client: BrowserClient,
}

impl AppState {
    /// Builds the shared HTTP client once from the configuration
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = BrowserClient::new(&config.http)?;
        Ok(Self { config, client })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/scrape", post(handlers::scrape_handler))
        .route("/api/download", post(handlers::download_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves the API until the process exits
pub async fn serve(state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(state.config.server.bind.as_str()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state)).await
}
