use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of the scraper export. The scraper emits whatever the page
/// happened to contain, so every field is best-effort optional and unknown
/// keys are ignored.
///
/// `media` distinguishes "key absent" (`None`) from "present but empty"
/// (`Some(vec![])`); the exclusion rules treat those differently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub comments: Option<i64>,
    #[serde(default)]
    pub shares: Option<i64>,
    #[serde(default)]
    pub media: Option<Vec<RawMediaItem>>,
}

/// One attachment on a raw post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMediaItem {
    #[serde(default, rename = "__typename")]
    pub typename: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub photo_image: Option<ImageRef>,
    #[serde(default)]
    pub fallback_image: Option<ImageRef>,
    #[serde(default, rename = "ocrText")]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Present only on the placeholder Facebook substitutes for deleted or
    /// restricted content; its value is irrelevant, only its presence.
    #[serde(default)]
    pub title_with_entities: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub uri: Option<String>,
}

/// One record of the cleaned dataset.
///
/// Ids are 1-based and assigned to every raw post before filtering, so the
/// kept sequence is strictly increasing but may have gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub id: u64,
    pub text: String,
    pub url: String,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub media: Vec<NormalizedMedia>,
}

/// A media entry that survived selection and whose image is on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMedia {
    /// Site-relative path, e.g. `/images/posts/<md5>.jpg`.
    pub local_path: String,
    pub ocr_text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub original_id: String,
}
