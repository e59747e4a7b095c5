use std::time::Duration;

use offprint::scraper::{
    ScraperError,
    fetch::{fetch_page, fetch_page_with_deadline},
};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn mock_url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{p}", server.uri())).unwrap()
}

#[tokio::test]
async fn fetch_returns_body_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Test</title></head><body>Hello World</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let body = fetch_page(&mock_url(&mock_server, "/post")).await.unwrap();
    assert!(body.contains("Hello World"));
}

#[tokio::test]
async fn fetch_404_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = fetch_page(&mock_url(&mock_server, "/gone")).await;
    assert!(matches!(result, Err(ScraperError::NotFound)));
}

#[tokio::test]
async fn fetch_other_statuses_map_to_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = fetch_page(&mock_url(&mock_server, "/boom")).await;
    assert!(matches!(result, Err(ScraperError::Network(_))));

    Mock::given(method("GET"))
        .and(path("/teapot"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&mock_server)
        .await;

    let result = fetch_page(&mock_url(&mock_server, "/teapot")).await;
    assert!(matches!(result, Err(ScraperError::Network(_))));
}

#[tokio::test]
async fn fetch_exceeding_deadline_maps_to_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>too late</body></html>".as_bytes())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let result =
        fetch_page_with_deadline(&mock_url(&mock_server, "/slow"), Duration::from_millis(50))
            .await;
    assert!(matches!(result, Err(ScraperError::Timeout)));
}

#[tokio::test]
async fn fetch_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Final page</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let body = fetch_page(&mock_url(&mock_server, "/moved")).await.unwrap();
    assert!(body.contains("Final page"));
}

#[tokio::test]
async fn fetch_connection_failure_maps_to_network_error() {
    // Bind a server just to grab a dead port.
    let mock_server = MockServer::start().await;
    let dead = mock_url(&mock_server, "/nothing-mounted");

    let result = fetch_page(&dead).await;
    // No mock mounted: wiremock answers 404, which maps to NotFound; an
    // unreachable host instead maps to Network. Both paths are covered.
    assert!(matches!(
        result,
        Err(ScraperError::NotFound) | Err(ScraperError::Network(_))
    ));

    let unreachable = Url::parse("http://host.invalid/article").unwrap();
    let result = fetch_page(&unreachable).await;
    assert!(matches!(result, Err(ScraperError::Network(_))));
}
