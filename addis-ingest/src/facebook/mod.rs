//! Facebook scrape shapes and the per-post normalization rules.

pub mod normalize;
pub mod select;
pub mod types;

pub use normalize::normalize_post;
pub use select::select_media_url;
pub use types::{NormalizedMedia, NormalizedPost, RawMediaItem, RawPost};
