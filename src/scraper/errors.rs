use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Typed failure for the whole extraction pipeline. Every stage maps its
/// failures into one of these six variants; nothing else escapes to callers.
#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("article not found")]
    NotFound,

    #[error("article is behind a paywall")]
    Paywall,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Stable wire identifiers for [`ScraperError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "INVALID_URL")]
    InvalidUrl,
    #[serde(rename = "TIMEOUT")]
    Timeout,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "PAYWALL")]
    Paywall,
    #[serde(rename = "NETWORK_ERROR")]
    NetworkError,
    #[serde(rename = "PARSE_ERROR")]
    ParseError,
}

impl ScraperError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidUrl(_) => ErrorCode::InvalidUrl,
            Self::Timeout => ErrorCode::Timeout,
            Self::NotFound => ErrorCode::NotFound,
            Self::Paywall => ErrorCode::Paywall,
            Self::Network(_) => ErrorCode::NetworkError,
            Self::Parse(_) => ErrorCode::ParseError,
        }
    }

    /// Status the routing layer answers with for this failure.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Paywall => StatusCode::FORBIDDEN,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Network(_) | Self::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                Self::NotFound
            } else {
                Self::Network(format!("http status {status}"))
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}
