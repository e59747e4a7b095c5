use serde::{Deserialize, Serialize};

use crate::scraper::{ErrorCode, ScraperError};

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Wire form of a pipeline failure: the error's code and message pass
/// through unchanged, nothing library-specific leaks.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl From<&ScraperError> for ErrorResponse {
    fn from(err: &ScraperError) -> Self {
        Self {
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

/// Plain-message body for non-pipeline failures (rate limiting, bad
/// request payloads).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub error: String,
}
