use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;

use crate::error::ExtractError;
use crate::platform::Platform;

/// Desktop browser identity. TikTok and Instagram serve bot pages (or
/// nothing) to obvious non-browser agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches the primary page for an extraction.
pub struct PageFetcher {
    client: Client,
    user_agent: HeaderValue,
}

impl PageFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ExtractError> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        Ok(Self {
            client,
            user_agent: HeaderValue::from_str(user_agent)?,
        })
    }

    /// GET the page body. A non-success status is terminal for the whole
    /// extraction and surfaces as `FetchFailed` with that status.
    pub async fn fetch(&self, url: &str, platform: &Platform) -> Result<String, ExtractError> {
        debug!("fetching {url} ({platform})");
        let response = self
            .client
            .get(url)
            .headers(self.headers_for(platform))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::FetchFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn headers_for(&self, platform: &Platform) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        // Referer hints reduce blocking on the two pickiest platforms.
        match platform {
            Platform::Tiktok => {
                headers.insert(REFERER, HeaderValue::from_static("https://www.tiktok.com/"));
            }
            Platform::Instagram => {
                headers.insert(
                    REFERER,
                    HeaderValue::from_static("https://www.instagram.com/"),
                );
                headers.insert(ACCEPT, HeaderValue::from_static("text/html,*/*;q=0.8"));
            }
            _ => {}
        }

        headers
    }
}
