//! Metadata extraction via ordered selector fallback chains.
//!
//! Each field walks its chain from `policy` and takes the first rule that
//! produces non-empty text (or, for meta/time carriers, a non-empty
//! attribute). Earlier rules always win over later ones.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use scraper::{Html, Selector};

use crate::scraper::errors::ScraperError;
use crate::scraper::model::{ArticleMetadata, UNKNOWN_AUTHOR};
use crate::scraper::policy::{
    self, AUTHOR_RULES, DATE_RULES, FieldRule, READING_TIME_RULES, SUBTITLE_RULES, TAG_RULES,
    TITLE_RULES,
};

static READING_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*min").expect("Failed to compile reading time regex"));

pub fn extract(doc: &Html) -> Result<ArticleMetadata, ScraperError> {
    let title = first_value(doc, TITLE_RULES)
        .ok_or_else(|| ScraperError::Parse("could not extract article title".to_string()))?;

    let author = first_value(doc, AUTHOR_RULES).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let published_date =
        first_value(doc, DATE_RULES).unwrap_or_else(|| Utc::now().to_rfc3339());

    let reading_time = first_value(doc, READING_TIME_RULES)
        .and_then(|text| READING_TIME_RE.captures(&text).map(|c| format!("{} min", &c[1])));

    Ok(ArticleMetadata {
        title,
        subtitle: first_value(doc, SUBTITLE_RULES),
        author,
        published_date,
        reading_time,
        tags: extract_tags(doc),
    })
}

/// First non-empty value a chain produces, trimmed.
fn first_value(doc: &Html, rules: &[FieldRule]) -> Option<String> {
    for rule in rules {
        let Ok(selector) = Selector::parse(rule.selector) else {
            continue;
        };
        for element in doc.select(&selector) {
            let value = match rule.attr {
                Some(name) => element.value().attr(name).map(str::to_string),
                None => Some(element.text().collect::<String>()),
            };
            if let Some(value) = value {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// All tag matches across the document, lower-cased, deduplicated with
/// first occurrence winning, in encounter order. `None` rather than an
/// empty list when nothing usable matched.
fn extract_tags(doc: &Html) -> Option<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for rule in TAG_RULES {
        let Ok(selector) = Selector::parse(rule.selector) else {
            continue;
        };
        for element in doc.select(&selector) {
            let raw = match rule.attr {
                Some(name) => element.value().attr(name).unwrap_or_default().to_string(),
                None => element.text().collect::<String>(),
            };
            let tag = raw.trim().to_lowercase();
            if tag.is_empty() || tag.chars().count() >= policy::MAX_TAG_LEN {
                continue;
            }
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    if tags.is_empty() { None } else { Some(tags) }
}
