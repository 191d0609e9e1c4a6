use scraper::Html;

use crate::model::PartialMetadata;
use crate::platform::Platform;

mod content_fallback;
mod embedded_state;
pub mod oembed;
mod open_graph;
mod structured_data;
pub mod youtube;

pub use content_fallback::ContentFallbackAdapter;
pub use embedded_state::EmbeddedStateAdapter;
pub use oembed::OEmbedClient;
pub use open_graph::OpenGraphAdapter;
pub use structured_data::StructuredDataAdapter;

/// Everything an adapter needs about the fetched page. The document is
/// parsed once and shared by every adapter in the run.
pub struct ParsingContext {
    pub url: String,
    pub platform: Platform,
    pub html: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: String, platform: Platform, html: String) -> Self {
        let document = Html::parse_document(&html);
        Self {
            url,
            platform,
            html,
            document,
        }
    }
}

/// One extraction strategy. Adapters never error: "not found" is an
/// empty partial, and any internal parse failure degrades to the same.
pub trait MetadataAdapter {
    fn extract(&self, context: &ParsingContext) -> PartialMetadata;
}
