use log::debug;
use serde_json::Value;

use crate::adapters::{MetadataAdapter, ParsingContext};
use crate::json_scan::{extract_balanced_json, DEFAULT_MAX_SCAN};
use crate::model::PartialMetadata;
use crate::platform::Platform;

/// Instagram embedded-state adapter.
///
/// Instagram pages carry a `window._sharedData` assignment whose JSON
/// holds the post under a fixed path. The blob is located with the
/// bounded extractor; if it is missing, truncated, or its shape has
/// changed, the adapter contributes nothing.
pub struct EmbeddedStateAdapter;

const SHARED_DATA_MARKER: &str = "window._sharedData";
const MEDIA_PATH: &str = "/entry_data/PostPage/0/graphql/shortcode_media";

impl MetadataAdapter for EmbeddedStateAdapter {
    fn extract(&self, context: &ParsingContext) -> PartialMetadata {
        if context.platform != Platform::Instagram {
            return PartialMetadata::default();
        }

        let Some(blob) = extract_balanced_json(&context.html, SHARED_DATA_MARKER, DEFAULT_MAX_SCAN)
        else {
            return PartialMetadata::default();
        };

        let state: Value = match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(e) => {
                debug!("instagram shared data failed to parse: {e}");
                return PartialMetadata::default();
            }
        };

        let Some(media) = state.pointer(MEDIA_PATH) else {
            return PartialMetadata::default();
        };

        let caption = media
            .pointer("/edge_media_to_caption/edges/0/node/text")
            .and_then(Value::as_str)
            .or_else(|| media.get("accessibility_caption").and_then(Value::as_str))
            .map(str::to_string);

        let display_url = media
            .get("display_url")
            .and_then(Value::as_str)
            .map(str::to_string);

        PartialMetadata {
            title: None,
            description: caption,
            thumbnail_url: display_url,
        }
    }
}
