//! Metadata extraction for user-submitted recipe URLs.
//!
//! Given an arbitrary video-platform or recipe-site URL, derives a
//! structured summary (title, description, thumbnail, platform tag, and
//! candidate recipe comments) from content we do not control. The URL is
//! validated against internal network targets before any fetch, every
//! extraction strategy degrades gracefully, and all scanning over
//! untrusted text runs under hard iteration and depth caps.

pub mod adapters;
pub mod analysis;
pub mod comments;
pub mod error;
pub mod fetch;
pub mod json_scan;
pub mod model;
pub mod pipeline;
pub mod platform;
pub mod safety;
pub mod sanitize;
pub mod settings;

pub use comments::{mine_comments, rank_comments};
pub use error::ExtractError;
pub use json_scan::extract_balanced_json;
pub use model::{PartialMetadata, VideoMetadata, UNTITLED};
pub use pipeline::{extract_from_html, MetadataExtractor};
pub use platform::{classify, Platform};
pub use safety::{validate_source_url, SourceUrl};
pub use sanitize::sanitize_instructions;

/// Extract metadata for one URL with default collaborators.
pub async fn extract_video_metadata(url: &str) -> Result<VideoMetadata, ExtractError> {
    MetadataExtractor::new()?.extract(url).await
}
