//! Extraction policy data.
//!
//! Everything in this module is coupled to the rendered markup of the target
//! publishing platform and its custom domains. Treat the lists as versioned
//! policy that gets revised when the platform's markup changes, not as fixed
//! logic.

use std::time::Duration;

/// Hosts the validator accepts, either exactly or as a parent of a
/// subdomain.
pub const ALLOWED_HOSTS: &[&str] = &[
    "medium.com",
    "towardsdatascience.com",
    "betterprogramming.pub",
    "levelup.gitconnected.com",
    "javascript.plainenglish.io",
    "uxdesign.cc",
    "betterhumans.pub",
    "writingcooperative.com",
];

/// Per-HTTP-operation deadline (page fetch and each image fetch alike).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard cap on images carried by one article.
pub const MAX_IMAGES: usize = 50;

/// Reject any single image larger than this, decoded.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum accepted tag length; longer matches are selector noise.
pub const MAX_TAG_LEN: usize = 50;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// One step of a metadata fallback chain: where to look, and whether the
/// value lives in an attribute (meta/time carriers) or in the element text.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub selector: &'static str,
    pub attr: Option<&'static str>,
}

const fn text(selector: &'static str) -> FieldRule {
    FieldRule { selector, attr: None }
}

const fn attr(selector: &'static str, attr: &'static str) -> FieldRule {
    FieldRule { selector, attr: Some(attr) }
}

/// Title chain. No fallback value: if nothing here yields text the scrape
/// fails.
pub const TITLE_RULES: &[FieldRule] = &[
    text("h1[data-testid='storyTitle']"),
    text("article h1"),
    text("h1.pw-post-title"),
    text("h1"),
    attr("meta[property='og:title']", "content"),
];

pub const SUBTITLE_RULES: &[FieldRule] = &[
    text("h2[data-testid='subtitle']"),
    text("h2.pw-subtitle-paragraph"),
    text("article h1 + h2"),
    attr("meta[property='og:description']", "content"),
];

pub const AUTHOR_RULES: &[FieldRule] = &[
    text("a[data-testid='authorName']"),
    text("a[rel='author']"),
    attr("meta[name='author']", "content"),
    text("span[data-testid='authorName']"),
];

/// Date carriers, in precedence order: a `<time datetime>` first, then the
/// article:published_time meta tag.
pub const DATE_RULES: &[FieldRule] = &[
    attr("article time[datetime]", "datetime"),
    attr("time[datetime]", "datetime"),
    attr("meta[property='article:published_time']", "content"),
];

pub const READING_TIME_RULES: &[FieldRule] = &[
    text("span[data-testid='storyReadTime']"),
    text("span.readingTime"),
    attr("meta[name='twitter:data1']", "content"),
];

/// Every match across the document is considered, in encounter order.
pub const TAG_RULES: &[FieldRule] = &[
    text("a[data-testid='storyTag']"),
    text("a[href*='/tag/']"),
    attr("meta[property='article:tag']", "content"),
];

/// Content container chain; the first selector with at least one match
/// wins. `article` is also the fallback when nothing matches.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "section[data-testid='storyContent']",
    "main",
    "[role='main']",
    "div.postArticle-content",
    "body",
];

pub const DEFAULT_CONTENT_SELECTOR: &str = "article";

/// A single match for any of these means the page is gated.
pub const PAYWALL_MARKER_SELECTORS: &[&str] = &[
    "[data-testid='paywall']",
    "div.meteredContent",
    "div[aria-label='Member-only story']",
    "div.paywall-upsell",
    "div.overlay--membership",
];

/// Marketing copy that shows up on gated pages. These phrases also appear
/// in footers of freely readable pages, so they only count when the
/// article body is nearly empty.
pub const PAYWALL_PHRASES: &[&str] = &["member-only story", "become a member"];

/// Article text shorter than this, combined with a paywall phrase on the
/// page, is treated as gated.
pub const PAYWALL_MIN_CONTENT_LEN: usize = 500;

/// Structural elements stripped wholesale from content.
pub const REMOVE_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "script", "style", "noscript",
    "iframe", "svg", "button", "form", "input",
];

/// Role/class-substring selectors for platform chrome that survives the
/// tag blocklist.
pub const REMOVE_SELECTORS: &[&str] = &[
    "[role='navigation']",
    "[role='banner']",
    "[role='contentinfo']",
    "[class*='share']",
    "[class*='social']",
    "[class*='comment']",
    "[class*='related']",
    "[class*='recommend']",
    "[class*='follow']",
    "[class*='subscribe']",
    "[class*='newsletter']",
    "[class*='promo']",
    "[class*='-ad-']",
    "[class*='advert']",
];

/// Elements that are meaningful without text content and must survive the
/// empty-element sweep.
pub const KEEP_EMPTY_TAGS: &[&str] = &[
    "img", "br", "hr", "picture", "source", "video", "audio", "track", "embed",
];
