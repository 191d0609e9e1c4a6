use thiserror::Error;

/// Errors that can terminate a metadata extraction.
///
/// Only URL rejection and primary-page fetch failures are surfaced to the
/// caller. Everything that goes wrong inside an individual adapter (a JSON
/// blob that fails to parse, a missing meta tag, an oEmbed timeout) is
/// logged and treated as "this adapter contributed nothing".
#[derive(Error, Debug)]
pub enum ExtractError {
    /// URL was malformed, used a non-http(s) scheme, or targeted a
    /// private/internal host
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Primary page fetch returned a non-success status
    #[error("Failed to fetch page: HTTP {status}")]
    FetchFailed { status: u16 },

    /// Transport-level fetch failure (connection refused, timeout, TLS)
    #[error("Failed to fetch page: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Error building HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
