//! The article extraction pipeline.
//!
//! One call = one article: validate the target, fetch the page, check for
//! a paywall, pull metadata through fallback chains, resolve the content
//! container, download its images concurrently, sanitize, assemble.
//! Every stage failure fails the whole call; only individual image
//! downloads degrade instead of failing.

pub mod errors;
pub mod fetch;
pub mod images;
pub mod metadata;
pub mod model;
pub mod paywall;
pub mod policy;
pub mod sanitize;
pub mod validate;

pub use errors::{ErrorCode, ScraperError};
pub use model::{Article, ArticleImage};

use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};
use url::Url;

use crate::scraper::images::ImageCandidate;
use crate::scraper::model::ArticleMetadata;
use crate::scraper::policy::{CONTENT_SELECTORS, DEFAULT_CONTENT_SELECTOR};

/// Scrapes one article from a raw URL string.
#[instrument(skip_all, fields(url = %url))]
pub async fn scrape_article(url: &str) -> Result<Article, ScraperError> {
    let target = validate::check_target(url)?;
    let html = fetch::fetch_page(&target).await?;
    scrape_html(&target, &html).await
}

/// Runs the post-fetch pipeline over an already-retrieved page body.
pub async fn scrape_html(url: &Url, html: &str) -> Result<Article, ScraperError> {
    // All DOM inspection happens synchronously up front: scraper's Html is
    // not Send, so it must be gone before the download await point.
    let prepared = prepare(html)?;

    let images = images::download_all(prepared.candidates).await;

    let content = sanitize::clean_content(&prepared.content_html, &images);
    if content.is_empty() {
        return Err(ScraperError::Parse(
            "no readable content after sanitization".to_string(),
        ));
    }

    let meta = prepared.meta;
    info!(
        "Scraped '{}' ({} images, {} embedded)",
        meta.title,
        images.len(),
        images.iter().filter(|i| i.base64.is_some()).count()
    );

    Ok(Article {
        url: url.to_string(),
        title: meta.title,
        subtitle: meta.subtitle,
        author: meta.author,
        published_date: meta.published_date,
        reading_time: meta.reading_time,
        content,
        images,
        tags: meta.tags,
    })
}

struct PreparedPage {
    meta: ArticleMetadata,
    content_html: String,
    candidates: Vec<ImageCandidate>,
}

fn prepare(html: &str) -> Result<PreparedPage, ScraperError> {
    let doc = Html::parse_document(html);

    paywall::check(&doc)?;
    let meta = metadata::extract(&doc)?;

    let root = resolve_content_root(&doc).ok_or_else(|| {
        ScraperError::Parse("no content container matched".to_string())
    })?;
    let candidates = images::extract_candidates(root);

    Ok(PreparedPage {
        meta,
        content_html: root.html(),
        candidates,
    })
}

/// First content selector with at least one match wins; the default
/// container selector is the last resort.
fn resolve_content_root<'a>(doc: &'a Html) -> Option<ElementRef<'a>> {
    for raw in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(raw)
            && let Some(element) = doc.select(&selector).next()
        {
            return Some(element);
        }
    }
    let selector = Selector::parse(DEFAULT_CONTENT_SELECTOR).ok()?;
    doc.select(&selector).next()
}
