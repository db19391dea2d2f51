//! HTTP surface of the server: menu API, static files and middleware.

use food3d_core::MenuItem;
use food3d_integration_tests::{AUTH_PAGE, INDEX_PAGE, TestServer, sample_menu};
use reqwest::{Client, StatusCode};
use serde_json::Value;

#[tokio::test]
async fn test_menu_endpoint_returns_configured_menu() {
    let server = TestServer::start(sample_menu()).await;

    let resp = Client::new()
        .get(server.url("/api/menu"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").expect("content type"),
        "application/json"
    );

    let items: Vec<MenuItem> = resp.json().await.expect("menu json");
    assert_eq!(items, sample_menu());
}

#[tokio::test]
async fn test_prices_serialize_as_numbers() {
    let server = TestServer::start(sample_menu()).await;

    let body: Value = Client::new()
        .get(server.url("/api/menu"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(body[1]["price"].as_f64(), Some(9.5));
    assert_eq!(body[0]["price"].as_f64(), Some(12.99));
}

#[tokio::test]
async fn test_menu_item_lookup() {
    let server = TestServer::start(sample_menu()).await;
    let client = Client::new();

    let resp = client.get(server.url("/api/menu/3")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    let item: MenuItem = resp.json().await.expect("item json");
    assert_eq!(item.name, "Pepperoni");

    let resp = client.get(server.url("/api/menu/42")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_serves_auth_page() {
    let server = TestServer::start(sample_menu()).await;

    let resp = Client::new().get(server.url("/")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), AUTH_PAGE);
}

#[tokio::test]
async fn test_static_files_served_from_public_dir() {
    let server = TestServer::start(sample_menu()).await;
    let client = Client::new();

    let resp = client.get(server.url("/index.html")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), INDEX_PAGE);

    let resp = client.get(server.url("/js/main.js")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = TestServer::start(sample_menu()).await;

    let resp = Client::new()
        .get(server.url("/missing.html"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start(Vec::new()).await;

    let resp = Client::new().get(server.url("/health")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let server = TestServer::start(sample_menu()).await;

    let resp = Client::new()
        .get(server.url("/api/menu"))
        .header("x-request-id", "trace-abc")
        .send()
        .await
        .expect("request");
    assert_eq!(resp.headers().get("x-request-id").expect("request id"), "trace-abc");
    assert_eq!(resp.headers().get("x-frame-options").expect("xfo"), "DENY");
    assert_eq!(
        resp.headers().get("x-content-type-options").expect("xcto"),
        "nosniff"
    );
}

#[tokio::test]
async fn test_menu_allows_cross_origin_reads() {
    let server = TestServer::start(sample_menu()).await;

    let resp = Client::new()
        .get(server.url("/api/menu"))
        .header("origin", "http://localhost:8080")
        .send()
        .await
        .expect("request");
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .expect("cors header"),
        "*"
    );
}
