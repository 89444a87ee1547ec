//! HTTP fetch adapter against a local mock server.

use mockito::Matcher;

use menu_cache::adapters::fetchers::HttpMenuFetcher;
use menu_cache::domain::models::FetcherConfig;
use menu_cache::{FetchError, MenuFetcher};

const MENU_BODY: &str = r#"{
    "name": "Harbor Grill",
    "cuisine": "Seafood",
    "items": [
        {"name": "Oysters", "price": "$18.00", "category": "Raw Bar", "isPopular": true},
        {"name": "Chowder", "price": "$9.00"}
    ],
    "specialOffers": ["Happy hour 4-6pm"]
}"#;

fn fetcher(endpoint: Option<String>) -> HttpMenuFetcher {
    HttpMenuFetcher::new(&FetcherConfig {
        endpoint,
        timeout_secs: 5,
        user_agent: "menu-cache-test".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn direct_get_parses_menu() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/menu")
        .match_header("user-agent", "menu-cache-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MENU_BODY)
        .create_async()
        .await;

    let menu = fetcher(None)
        .fetch(&format!("{}/menu", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(menu.name.as_deref(), Some("Harbor Grill"));
    let items = menu.menu_items();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_popular);
    assert_eq!(items[1].category, "Menu Item");
    assert_eq!(menu.offers(), vec!["Happy hour 4-6pm".to_string()]);
}

#[tokio::test]
async fn scraper_endpoint_receives_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/scrape")
        .match_body(Matcher::Json(serde_json::json!({"url": "https://harbor.example/menu"})))
        .with_status(200)
        .with_body(MENU_BODY)
        .create_async()
        .await;

    let menu = fetcher(Some(format!("{}/scrape", server.url())))
        .fetch("https://harbor.example/menu")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(menu.cuisine.as_deref(), Some("Seafood"));
}

#[tokio::test]
async fn error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/menu").with_status(404).create_async().await;

    let err = fetcher(None)
        .fetch(&format!("{}/menu", server.url()))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Status(404));
}

#[tokio::test]
async fn html_body_is_invalid_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/menu")
        .with_status(200)
        .with_body("<html><body>Our menu</body></html>")
        .create_async()
        .await;

    let err = fetcher(None)
        .fetch(&format!("{}/menu", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidPayload(_)));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let err = fetcher(None).fetch("http://127.0.0.1:9/menu").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
