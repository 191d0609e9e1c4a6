use log::debug;

use crate::adapters::{
    youtube, ContentFallbackAdapter, EmbeddedStateAdapter, MetadataAdapter, OEmbedClient,
    OpenGraphAdapter, ParsingContext, StructuredDataAdapter,
};
use crate::error::ExtractError;
use crate::fetch::PageFetcher;
use crate::model::VideoMetadata;
use crate::platform::{classify, Platform};
use crate::safety::validate_source_url;
use crate::settings::Settings;

/// Runs the whole extraction: validate, classify, oEmbed where the
/// platform has one, fetch the page, then the adapter sequence.
///
/// Holds no cross-request state; independent extractions can run
/// concurrently without coordination.
pub struct MetadataExtractor {
    fetcher: PageFetcher,
    oembed: OEmbedClient,
}

impl MetadataExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            fetcher: PageFetcher::new(None)?,
            oembed: OEmbedClient::new(None)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ExtractError> {
        let timeout = Some(settings.fetch_timeout());
        Ok(Self {
            fetcher: PageFetcher::with_user_agent(timeout, &settings.user_agent)?,
            oembed: OEmbedClient::new(timeout)?,
        })
    }

    /// Construct with injected collaborators (tests point these at a
    /// local server).
    pub fn with_parts(fetcher: PageFetcher, oembed: OEmbedClient) -> Self {
        Self { fetcher, oembed }
    }

    /// Extract best-effort metadata for one URL.
    ///
    /// Only two failures are terminal: the URL failing validation and
    /// the primary page fetch failing. Everything downstream degrades
    /// to missing fields.
    pub async fn extract(&self, raw_url: &str) -> Result<VideoMetadata, ExtractError> {
        let source = validate_source_url(raw_url)?;
        let platform = classify(&source);
        debug!("extracting {} as platform '{platform}'", source.as_str());

        let mut metadata = VideoMetadata::new();

        if platform.supports_oembed() {
            metadata.fill(self.oembed.lookup(&platform, source.as_str()).await);
        }

        let html = self.fetcher.fetch(source.as_str(), &platform).await?;

        Ok(extract_from_html(source.as_str(), platform, html, metadata))
    }
}

/// The pure second half of the pipeline: run the page adapters in fixed
/// order over already-fetched HTML, filling only empty fields.
///
/// Public so tests (and callers that fetched the page themselves) can
/// drive it without network access. `seed` carries any fields an oEmbed
/// lookup contributed before the fetch.
pub fn extract_from_html(
    url: &str,
    platform: Platform,
    html: String,
    seed: VideoMetadata,
) -> VideoMetadata {
    let mut metadata = seed;
    let context = ParsingContext::new(url.to_string(), platform.clone(), html);

    let adapters: Vec<Box<dyn MetadataAdapter>> = vec![
        Box::new(OpenGraphAdapter),
        Box::new(StructuredDataAdapter),
        Box::new(EmbeddedStateAdapter),
    ];
    for adapter in adapters {
        metadata.fill(adapter.extract(&context));
    }

    // Last resort, only when something is still missing.
    if !metadata.is_complete() {
        metadata.fill(ContentFallbackAdapter.extract(&context));
    }

    if platform == Platform::Youtube {
        if metadata.thumbnail_url.is_empty() {
            if let Some(thumbnail) = youtube::default_thumbnail(&context.url) {
                metadata.thumbnail_url = thumbnail;
            }
        }
        // Comment mining is independent of the field merge.
        metadata.top_comments = youtube::mine_page_comments(&context.html);
    }

    metadata.platform = Some(platform);
    metadata
}
