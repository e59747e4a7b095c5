pub mod dtos;
pub mod handlers;
pub mod rate_limit;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::http::rate_limit::{RateLimit, rate_limit_middleware};

/// Assembles the service router. The rate limiter guards the scrape
/// endpoint only; the health check stays unthrottled.
pub fn router(rate_limit: RateLimit) -> Router {
    let api = Router::new()
        .route("/api/scrape", post(handlers::scrape))
        .route_layer(middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ));

    Router::new()
        .merge(api)
        .route("/healthz", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
}
