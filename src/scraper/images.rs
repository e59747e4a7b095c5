//! Image discovery and bounded concurrent download.
//!
//! Discovery walks the resolved content subtree only. Downloads are a
//! one-shot fan-out: everything (capped at [`policy::MAX_IMAGES`]) is
//! issued at once and joined, with each download owning its own timeout
//! and each failure degrading to an entry without inline data instead of
//! failing the batch.

use std::collections::HashSet;
use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::join_all;
use scraper::{ElementRef, Selector};
use thiserror::Error;
use tracing::{instrument, warn};

use crate::scraper::fetch::get_client;
use crate::scraper::model::ArticleImage;
use crate::scraper::policy::{MAX_IMAGE_BYTES, MAX_IMAGES};

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("Failed to compile img selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub alt: Option<String>,
}

/// Collects downloadable image URLs from the content subtree, in document
/// order, deduplicated by the exact rewritten URL string. The first
/// occurrence's alt text wins; later duplicates are dropped outright.
pub fn extract_candidates(root: ElementRef<'_>) -> Vec<ImageCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for img in root.select(&IMG_SELECTOR) {
        let raw = img
            .value()
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| img.value().attr("data-src"));
        let Some(raw) = raw else { continue };
        let Some(url) = resolve_source(raw) else { continue };

        if seen.insert(url.clone()) {
            let alt = img
                .value()
                .attr("alt")
                .map(|a| a.to_string())
                .filter(|a| !a.is_empty());
            candidates.push(ImageCandidate { url, alt });
        }
    }

    candidates
}

/// Protocol-relative sources get an https scheme; anything that is not an
/// absolute http(s) URL after that is unresolvable without a base and is
/// dropped. The sanitizer resolves `img` sources through the same function
/// so that substitution keys always line up with discovery keys.
pub(crate) fn resolve_source(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    None
}

/// Downloads every candidate concurrently, returning exactly
/// `min(MAX_IMAGES, candidates.len())` entries in input order. A failed
/// download keeps its URL and alt text with `base64: None`.
#[instrument(skip_all, fields(count = candidates.len()))]
pub async fn download_all(mut candidates: Vec<ImageCandidate>) -> Vec<ArticleImage> {
    candidates.truncate(MAX_IMAGES);

    let downloads = candidates.into_iter().map(|candidate| async move {
        let base64 = match fetch_image(&candidate.url).await {
            Ok(data_uri) => Some(data_uri),
            Err(err) => {
                warn!("Skipping image {}: {err}", candidate.url);
                None
            }
        };
        ArticleImage {
            original_url: candidate.url,
            base64,
            alt: candidate.alt,
        }
    });

    join_all(downloads).await
}

/// Why one image download was skipped. Never escapes the module; every
/// variant degrades to a logged entry without inline data.
#[derive(Error, Debug)]
enum ImageFetchError {
    #[error("http status {0}")]
    Status(reqwest::StatusCode),

    #[error("unsupported content-type: {0}")]
    ContentType(String),

    #[error("image too large ({0} bytes)")]
    TooLarge(u64),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

async fn fetch_image(url: &str) -> Result<String, ImageFetchError> {
    let response = get_client()
        .get(url)
        .header(reqwest::header::ACCEPT, "image/avif,image/webp,image/*,*/*;q=0.8")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ImageFetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();
    if !content_type.starts_with("image/") {
        return Err(ImageFetchError::ContentType(content_type));
    }

    // Header check first, so oversized bodies are rejected without reading
    // them; the post-read check covers missing or lying headers.
    if let Some(len) = response.content_length()
        && len > MAX_IMAGE_BYTES
    {
        return Err(ImageFetchError::TooLarge(len));
    }

    let body = response.bytes().await?;
    if body.len() as u64 > MAX_IMAGE_BYTES {
        return Err(ImageFetchError::TooLarge(body.len() as u64));
    }

    Ok(format!("data:{content_type};base64,{}", BASE64.encode(&body)))
}
