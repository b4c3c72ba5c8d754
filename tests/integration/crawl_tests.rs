use crate::common::{html, list_page, test_config};
use letterboxd_export::crawler::{crawl_list, BrowserClient};
use letterboxd_export::CrawlError;
use wiremock::matchers::{header, header_exists, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn servers() -> (MockServer, MockServer) {
    (MockServer::start().await, MockServer::start().await)
}

#[tokio::test]
async fn test_crawl_follows_pagination() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/"))
        .respond_with(html(list_page(&["Alien (1979)", "Heat (1995)"], true)))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/page/2/"))
        .respond_with(html(list_page(&["Ran (1985)", "Alien (1979)"], false)))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).expect("Failed to build client");

    // Query string, fragment, and a page suffix are all normalized away
    let url = format!("{}/dave/list/films/page/2/?sort=name#x", site.uri());
    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");

    assert_eq!(result.titles, vec!["Alien (1979)", "Heat (1995)", "Ran (1985)"]);
    assert_eq!(result.count, 3);

    let requests = site.received_requests().await.expect("Recording enabled");
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, vec!["/dave/list/films/", "/dave/list/films/page/2/"]);
}

#[tokio::test]
async fn test_browser_headers_sent() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/"))
        .and(header("cache-control", "no-cache"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(html(list_page(&["Heat"], false)))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/films/", site.uri());

    // Without the headers the mock does not match and the first page 404s
    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(result.titles, vec!["Heat"]);
}

#[tokio::test]
async fn test_page_cap_with_endless_pagination() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/dave/list/endless/"))
        .respond_with(html(list_page(&["Groundhog Day (1993)"], true)))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/endless/", site.uri());

    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(result.titles, vec!["Groundhog Day (1993)"]);

    let requests = site.received_requests().await.unwrap();
    assert_eq!(requests.len(), 20);
    assert_eq!(requests[19].url.path(), "/dave/list/endless/page/20/");
}

#[tokio::test]
async fn test_configured_page_cap() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/dave/list/endless/"))
        .respond_with(html(list_page(&["Loop"], true)))
        .mount(&site)
        .await;

    let mut config = test_config(&site, &short_links);
    config.crawl.max_pages = 3;
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/endless/", site.uri());

    crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(site.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_page_ends_list() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/"))
        .respond_with(html(list_page(&["Stalker"], true)))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/page/2/"))
        .respond_with(html(list_page(&[], true)))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/films", site.uri());

    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(result.titles, vec!["Stalker"]);
    assert_eq!(site.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_later_page_error_ends_list() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/"))
        .respond_with(html(list_page(&["Solaris"], true)))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/films/", site.uri());

    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(result.titles, vec!["Solaris"]);
}

#[tokio::test]
async fn test_first_page_404_is_fetch_error() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/missing/", site.uri());

    let err = crawl_list(&client, &config, &url).await.unwrap_err();
    match err {
        CrawlError::Fetch { status, .. } => assert_eq!(status, Some(404)),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_first_page_without_titles_is_no_results() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .respond_with(html(
            "<html><body><p>Nothing to see</p></body></html>".to_string(),
        ))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/empty/", site.uri());

    let err = crawl_list(&client, &config, &url).await.unwrap_err();
    assert!(matches!(err, CrawlError::NoResults));
}

#[tokio::test]
async fn test_page_redirect_is_followed() {
    let (site, short_links) = servers().await;

    Mock::given(method("GET"))
        .and(path("/dave/list/old-name/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/dave/list/new-name/", site.uri()).as_str()),
        )
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/dave/list/new-name/"))
        .respond_with(html(list_page(&["Playtime"], false)))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/dave/list/old-name/", site.uri());

    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(result.titles, vec!["Playtime"]);
}

#[tokio::test]
async fn test_short_link_redirect_resolves() {
    let (site, short_links) = servers().await;

    Mock::given(method("HEAD"))
        .and(path("/nVqt6"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/dave/list/films/", site.uri()).as_str()),
        )
        .mount(&short_links)
        .await;

    Mock::given(method("GET"))
        .and(path("/dave/list/films/"))
        .respond_with(html(list_page(&["Chinatown (1974)"], false)))
        .mount(&site)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/nVqt6", short_links.uri());

    let result = crawl_list(&client, &config, &url).await.expect("Crawl failed");
    assert_eq!(result.titles, vec!["Chinatown (1974)"]);

    // Resolution is a single HEAD that is not followed
    let short_requests = short_links.received_requests().await.unwrap();
    assert_eq!(short_requests.len(), 1);
}

#[tokio::test]
async fn test_short_link_without_location_fails() {
    let (site, short_links) = servers().await;

    Mock::given(method("HEAD"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&short_links)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/plain", short_links.uri());

    let err = crawl_list(&client, &config, &url).await.unwrap_err();
    assert!(matches!(err, CrawlError::Resolution(_)));
    assert!(site.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_short_link_to_foreign_site_fails() {
    let (site, short_links) = servers().await;

    Mock::given(method("HEAD"))
        .and(path("/evil"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "https://example.com/list/"),
        )
        .mount(&short_links)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/evil", short_links.uri());

    let err = crawl_list(&client, &config, &url).await.unwrap_err();
    assert!(matches!(err, CrawlError::Resolution(_)));
}

#[tokio::test]
async fn test_chained_short_link_fails() {
    let (site, short_links) = servers().await;

    Mock::given(method("HEAD"))
        .and(path("/first"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/second", short_links.uri()).as_str()),
        )
        .mount(&short_links)
        .await;

    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();
    let url = format!("{}/first", short_links.uri());

    let err = crawl_list(&client, &config, &url).await.unwrap_err();
    assert!(matches!(err, CrawlError::Resolution(_)));
    assert_eq!(short_links.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejects_empty_and_foreign_urls() {
    let (site, short_links) = servers().await;
    let config = test_config(&site, &short_links);
    let client = BrowserClient::new(&config.http).unwrap();

    for url in ["", "   ", "https://example.com/dave/list/films/", "not a url"] {
        let err = crawl_list(&client, &config, url).await.unwrap_err();
        assert!(
            matches!(err, CrawlError::Validation(_)),
            "url {:?} gave {:?}",
            url,
            err
        );
    }

    assert!(site.received_requests().await.unwrap().is_empty());
}
