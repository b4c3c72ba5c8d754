use crate::common::{html, list_page, test_config};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use letterboxd_export::api::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn app() -> (Router, MockServer, MockServer) {
    let site = MockServer::start().await;
    let short_links = MockServer::start().await;
    let state = AppState::new(test_config(&site, &short_links)).expect("Failed to build state");
    (create_router(Arc::new(state)), site, short_links)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn scrape_returns_movies() {
    let (app, site, _short_links) = app().await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/"))
        .respond_with(html(list_page(&["Alien (1979)", "Heat (1995)", "Alien (1979)"], false)))
        .mount(&site)
        .await;

    let url = format!("{}/dave/list/films/", site.uri());
    let response = app
        .oneshot(post_json("/api/scrape", json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "movies": ["Alien (1979)", "Heat (1995)"],
            "count": 2
        })
    );
}

#[tokio::test]
async fn scrape_missing_url_is_400() {
    let (app, _site, _short_links) = app().await;

    let response = app
        .oneshot(post_json("/api/scrape", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Please enter a valid Letterboxd URL.");
}

#[tokio::test]
async fn scrape_foreign_url_is_400() {
    let (app, _site, _short_links) = app().await;

    let response = app
        .oneshot(post_json(
            "/api/scrape",
            json!({ "url": "https://example.com/dave/list/films/" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scrape_malformed_body_is_400() {
    let (app, _site, _short_links) = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn scrape_first_page_404_is_400_with_status() {
    let (app, site, _short_links) = app().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let url = format!("{}/dave/list/gone/", site.uri());
    let response = app
        .oneshot(post_json("/api/scrape", json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("404"), "got {}", message);
}

#[tokio::test]
async fn scrape_without_titles_is_404() {
    let (app, site, _short_links) = app().await;

    Mock::given(method("GET"))
        .respond_with(html("<html><body></body></html>".to_string()))
        .mount(&site)
        .await;

    let url = format!("{}/dave/list/empty/", site.uri());
    let response = app
        .oneshot(post_json("/api/scrape", json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "No movies found. Please check the URL or try a different list."
    );
}

#[tokio::test]
async fn scrape_unresolved_short_link_is_400() {
    let (app, _site, short_links) = app().await;

    Mock::given(method("HEAD"))
        .and(path("/abc"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&short_links)
        .await;

    let url = format!("{}/abc", short_links.uri());
    let response = app
        .oneshot(post_json("/api/scrape", json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Could not resolve short URL.");
}

#[tokio::test]
async fn download_returns_csv() {
    let (app, _site, _short_links) = app().await;

    let response = app
        .oneshot(post_json(
            "/api/download",
            json!({ "movies": ["Movie, \"X\" (2023)", "Heat (1995)"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"letterboxd_import.csv\""
    );
    assert_eq!(
        body_text(response).await,
        "Title\r\n\"Movie, \"\"X\"\"\"\r\nHeat"
    );
}

#[tokio::test]
async fn download_empty_list_is_400() {
    let (app, _site, _short_links) = app().await;

    let response = app
        .oneshot(post_json("/api/download", json!({ "movies": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body = body_json(response).await;
    assert_eq!(body["error"], "No movies provided for CSV generation.");
}

#[tokio::test]
async fn download_non_array_is_400() {
    let (app, _site, _short_links) = app().await;

    for payload in [json!({ "movies": "Heat" }), json!({}), json!({ "movies": null })] {
        let response = app
            .clone()
            .oneshot(post_json("/api/download", payload.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload {}",
            payload
        );
    }
}
