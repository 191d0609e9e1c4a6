use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ExtractError;
use crate::model::PartialMetadata;
use crate::platform::Platform;

const TIKTOK_ENDPOINT: &str = "https://www.tiktok.com/oembed";
const INSTAGRAM_ENDPOINT: &str = "https://api.instagram.com/oembed";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// oEmbed response shape shared by the platforms we query. Fields are
/// optional because the endpoints omit them freely.
#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    thumbnail_url: Option<String>,
}

/// Looks up a post on the platform's public oEmbed endpoint.
///
/// Any outcome other than an OK JSON response (error status, wrong
/// content type, timeout, parse failure) yields an empty partial. The
/// endpoints are swappable so tests can point them at a local server.
pub struct OEmbedClient {
    client: Client,
    tiktok_endpoint: String,
    instagram_endpoint: String,
}

impl OEmbedClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        Ok(Self {
            client,
            tiktok_endpoint: TIKTOK_ENDPOINT.to_string(),
            instagram_endpoint: INSTAGRAM_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoints(mut self, tiktok: String, instagram: String) -> Self {
        self.tiktok_endpoint = tiktok;
        self.instagram_endpoint = instagram;
        self
    }

    fn endpoint_for(&self, platform: &Platform) -> Option<&str> {
        match platform {
            Platform::Tiktok => Some(&self.tiktok_endpoint),
            Platform::Instagram => Some(&self.instagram_endpoint),
            _ => None,
        }
    }

    pub async fn lookup(&self, platform: &Platform, url: &str) -> PartialMetadata {
        let Some(endpoint) = self.endpoint_for(platform) else {
            return PartialMetadata::default();
        };
        let lookup_url = format!("{endpoint}?url={}", urlencoding::encode(url));

        let response = match self.client.get(&lookup_url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("oEmbed lookup failed for {platform}: {e}");
                return PartialMetadata::default();
            }
        };

        if !response.status().is_success() {
            debug!("oEmbed lookup for {platform} returned {}", response.status());
            return PartialMetadata::default();
        }

        // Blocked requests come back as HTML login/captcha pages with a
        // 200 status; the content type is the reliable signal.
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);
        if !is_json {
            debug!("oEmbed lookup for {platform} returned non-JSON content");
            return PartialMetadata::default();
        }

        let body: OEmbedResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                debug!("oEmbed response for {platform} failed to parse: {e}");
                return PartialMetadata::default();
            }
        };

        PartialMetadata {
            title: body.title.filter(|t| !t.trim().is_empty()),
            description: None,
            thumbnail_url: body.thumbnail_url.filter(|t| !t.trim().is_empty()),
        }
    }
}
