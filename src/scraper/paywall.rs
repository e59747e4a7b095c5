//! Paywall detection.
//!
//! Runs before any metadata or content work. A structural marker match is
//! decisive on its own; the marketing-phrase heuristic only fires when the
//! article body is also nearly empty, because the phrases show up in the
//! footer of plenty of freely readable pages.

use scraper::{Html, Selector};

use crate::scraper::errors::ScraperError;
use crate::scraper::policy::{
    DEFAULT_CONTENT_SELECTOR, PAYWALL_MARKER_SELECTORS, PAYWALL_MIN_CONTENT_LEN, PAYWALL_PHRASES,
};

pub fn check(doc: &Html) -> Result<(), ScraperError> {
    for marker in PAYWALL_MARKER_SELECTORS {
        if let Ok(selector) = Selector::parse(marker)
            && doc.select(&selector).next().is_some()
        {
            return Err(ScraperError::Paywall);
        }
    }

    let page_text = doc.root_element().text().collect::<String>().to_lowercase();
    let has_phrase = PAYWALL_PHRASES.iter().any(|p| page_text.contains(p));
    if has_phrase && article_text_len(doc) < PAYWALL_MIN_CONTENT_LEN {
        return Err(ScraperError::Paywall);
    }

    Ok(())
}

fn article_text_len(doc: &Html) -> usize {
    let Ok(selector) = Selector::parse(DEFAULT_CONTENT_SELECTOR) else {
        return 0;
    };
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().chars().count())
        .unwrap_or(0)
}
