use std::net::SocketAddr;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use offprint::http::{rate_limit::RateLimit, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn client_addr(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([203, 0, 113, last_octet], 54321))
}

fn scrape_request(url: &str, addr: SocketAddr) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/api/scrape")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

#[tokio::test]
async fn invalid_url_maps_to_400_with_coded_error_body() {
    let app = router(RateLimit::new(10, 60));

    // Not on the allow-list, so the pipeline rejects before any fetch.
    let response = send(
        &app,
        scrape_request("https://example.com/article", client_addr(1)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_URL");
    assert!(
        body["error"]["message"]
            .as_str()
            .is_some_and(|m| !m.is_empty())
    );
}

#[tokio::test]
async fn rate_limit_kicks_in_after_window_fills() {
    let app = router(RateLimit::new(3, 60));
    let addr = client_addr(2);

    for _ in 0..3 {
        let response = send(&app, scrape_request("https://example.com/x", addr)).await;
        // Still within the window: the request reaches the pipeline and
        // fails on validation, not on throttling.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = send(&app, scrape_request("https://example.com/x", addr)).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Rate limit exceeded");
}

#[tokio::test]
async fn rate_limit_counts_per_client_ip() {
    let app = router(RateLimit::new(1, 60));

    let response = send(&app, scrape_request("https://example.com/x", client_addr(3))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = send(&app, scrape_request("https://example.com/x", client_addr(3))).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client still has a fresh window.
    let response = send(&app, scrape_request("https://example.com/x", client_addr(4))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_check_is_unthrottled() {
    let app = router(RateLimit::new(1, 60));
    let addr = client_addr(5);

    let _ = send(&app, scrape_request("https://example.com/x", addr)).await;
    let _ = send(&app, scrape_request("https://example.com/x", addr)).await;

    let response = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/healthz")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
}
