use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use tracing::instrument;
use url::Url;

use crate::scraper::errors::ScraperError;
use crate::scraper::policy::{REQUEST_TIMEOUT, USER_AGENT};

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers.insert(
                reqwest::header::ACCEPT_LANGUAGE,
                "en-US,en;q=0.9".parse().unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Performs the single timed GET for the article page and returns the body
/// as text. No retries; the timeout aborts only this request.
pub async fn fetch_page(url: &Url) -> Result<String, ScraperError> {
    fetch_page_with_deadline(url, REQUEST_TIMEOUT).await
}

/// Same as [`fetch_page`] with an explicit per-request deadline. The
/// production path always passes [`REQUEST_TIMEOUT`].
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_page_with_deadline(
    url: &Url,
    deadline: Duration,
) -> Result<String, ScraperError> {
    let response = HTTP_CLIENT
        .get(url.clone())
        .timeout(deadline)
        .send()
        .await
        .map_err(ScraperError::from_reqwest_error)?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound);
    }
    if !status.is_success() {
        return Err(ScraperError::Network(format!("http status {status}")));
    }

    response
        .text()
        .await
        .map_err(ScraperError::from_reqwest_error)
}
