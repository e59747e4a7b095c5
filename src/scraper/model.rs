use serde::{Deserialize, Serialize};

/// Used when no author selector yields text.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// The pipeline's sole success value. Built fresh per invocation and
/// immutable once returned; persistence is the renderers' concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub author: String,
    pub published_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>,
    pub content: String,
    pub images: Vec<ArticleImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One discovered image. `base64` is the inlined data URI; `None` means the
/// download failed or was skipped and the content keeps the remote URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleImage {
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Metadata fields pulled from the parsed page, before content and images
/// are resolved.
#[derive(Debug, Clone)]
pub struct ArticleMetadata {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub published_date: String,
    pub reading_time: Option<String>,
    pub tags: Option<Vec<String>>,
}
