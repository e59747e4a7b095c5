//! Content sanitization.
//!
//! Works on a reparsed copy of the chosen content subtree, so the source
//! document is never mutated. Two passes, in this order: structural
//! removal (blocklisted tags, platform chrome, empty elements), then
//! attribute cleaning. The attribute pass assumes dead subtrees are
//! already gone.

use std::collections::HashMap;
use std::sync::LazyLock;

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use regex::Regex;

use crate::scraper::images;
use crate::scraper::model::ArticleImage;
use crate::scraper::policy::{KEEP_EMPTY_TAGS, REMOVE_SELECTORS, REMOVE_TAGS};

static WS_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

static BETWEEN_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("Failed to compile inter-tag regex"));

/// Cleans the serialized content subtree and substitutes downloaded images
/// as inline data URIs. Returns the cleaned markup, or an empty string when
/// nothing survives.
pub fn clean_content(content_html: &str, images: &[ArticleImage]) -> String {
    let replacements: HashMap<&str, &str> = images
        .iter()
        .filter_map(|img| {
            img.base64
                .as_deref()
                .map(|uri| (img.original_url.as_str(), uri))
        })
        .collect();

    let document = kuchiki::parse_html().one(content_html);

    remove_blocklisted(&document);
    remove_empty_elements(&document);
    clean_attributes(&document, &replacements);

    let Ok(body) = document.select_first("body") else {
        return String::new();
    };
    let mut out = Vec::new();
    for child in body.as_node().children() {
        if child.serialize(&mut out).is_err() {
            return String::new();
        }
    }
    collapse_whitespace(&String::from_utf8_lossy(&out))
}

fn remove_blocklisted(document: &NodeRef) {
    let tag_selector = REMOVE_TAGS.join(", ");
    detach_all(document, &tag_selector);
    for selector in REMOVE_SELECTORS {
        detach_all(document, selector);
    }
}

fn detach_all(document: &NodeRef, selector: &str) {
    if let Ok(matches) = document.select(selector) {
        let nodes: Vec<NodeRef> = matches.map(|m| m.as_node().clone()).collect();
        for node in nodes {
            node.detach();
        }
    }
}

/// Drops elements that carry neither text nor an image. Emptiness by text
/// content is transitive, so one sweep over the snapshot is enough even
/// when a parent only becomes childless during the sweep.
fn remove_empty_elements(document: &NodeRef) {
    let Ok(matches) = document.select("body *") else {
        return;
    };
    let nodes: Vec<_> = matches.collect();
    for element in nodes {
        let tag = element.name.local.to_string();
        if KEEP_EMPTY_TAGS.contains(&tag.as_str()) {
            continue;
        }
        let node = element.as_node();
        if !node.text_contents().trim().is_empty() {
            continue;
        }
        let has_image = node
            .select("img, picture, video, audio, embed")
            .map(|mut sel| sel.next().is_some())
            .unwrap_or(false);
        if !has_image {
            node.detach();
        }
    }
}

fn clean_attributes(document: &NodeRef, replacements: &HashMap<&str, &str>) {
    let Ok(matches) = document.select("body *") else {
        return;
    };
    for element in matches {
        let tag = element.name.local.to_string();
        let mut attrs = element.attributes.borrow_mut();

        // Resolve the image source exactly as discovery did (src with a
        // data-src fallback, protocol-relative rewritten to https) before
        // the whitelist strips data-src, so a successful download is
        // inlined no matter which attribute carried the URL.
        if tag == "img" {
            let raw = attrs
                .get("src")
                .filter(|s| !s.trim().is_empty())
                .or_else(|| attrs.get("data-src"))
                .map(str::to_string);
            if let Some(raw) = raw
                && let Some(resolved) = images::resolve_source(&raw)
            {
                let src = replacements
                    .get(resolved.as_str())
                    .map(|uri| uri.to_string())
                    .unwrap_or(resolved);
                attrs.insert("src", src);
            }
        }

        attrs.map.retain(|name, _| {
            let local: &str = &name.local;
            // Tag whitelists are absolute; the generic rules apply to
            // everything else.
            match tag.as_str() {
                "a" => matches!(local, "href" | "title"),
                "img" => matches!(local, "src" | "alt"),
                _ => {
                    if local.starts_with("data-") {
                        local == "data-testid"
                    } else {
                        !(local.starts_with("aria-") || local.starts_with("on"))
                    }
                }
            }
        });
    }
}

fn collapse_whitespace(html: &str) -> String {
    let collapsed = WS_RUN_RE.replace_all(html, " ");
    let collapsed = BETWEEN_TAGS_RE.replace_all(&collapsed, "><");
    collapsed.trim().to_string()
}
