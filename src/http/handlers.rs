use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, warn};

use crate::http::dtos::{ErrorResponse, ScrapeRequest};
use crate::scraper;

/// POST /api/scrape: runs the extraction pipeline for one URL.
pub async fn scrape(Json(payload): Json<ScrapeRequest>) -> Response {
    match scraper::scrape_article(&payload.url).await {
        Ok(article) => {
            info!("Returning article '{}'", article.title);
            (StatusCode::OK, Json(article)).into_response()
        }
        Err(err) => {
            warn!("Scrape failed for {}: {err}", payload.url);
            (err.http_status(), Json(ErrorResponse::from(&err))).into_response()
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
