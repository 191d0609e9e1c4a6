use std::net::Ipv4Addr;

use url::{Host, Url};

use crate::error::ExtractError;

/// A validated, absolute HTTP(S) URL that is safe to fetch.
///
/// Validation is pure string/IP-literal inspection: the scheme must be
/// `http` or `https` and the host must not be a loopback, private, or
/// link-local address. No DNS lookup happens here, so a hostname that
/// resolves to a private address at connection time is a residual gap
/// (DNS rebinding); closing it requires re-checking the resolved IP at
/// connect time or routing fetches through an egress proxy.
#[derive(Debug, Clone)]
pub struct SourceUrl {
    url: Url,
}

impl SourceUrl {
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host_str(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

/// Validate a raw URL string before any fetch occurs.
///
/// Rejects malformed input, non-http(s) schemes, and hosts that point at
/// internal infrastructure (SSRF guard).
pub fn validate_source_url(raw: &str) -> Result<SourceUrl, ExtractError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::InvalidUrl("empty URL".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ExtractError::InvalidUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ExtractError::InvalidUrl(format!(
                "unsupported scheme '{other}'"
            )));
        }
    }

    match url.host() {
        None => {
            return Err(ExtractError::InvalidUrl(format!("{trimmed}: missing host")));
        }
        Some(Host::Domain(domain)) => {
            let lower = domain.to_ascii_lowercase();
            if lower == "localhost" || lower.ends_with(".localhost") {
                return Err(blocked_host(&lower));
            }
        }
        // The url crate parses dotted-quad hosts of http(s) URLs as Ipv4,
        // so literal "127.0.0.1" and friends land here.
        Some(Host::Ipv4(addr)) => {
            if is_blocked_ipv4(addr) {
                return Err(blocked_host(&addr.to_string()));
            }
        }
        Some(Host::Ipv6(addr)) => {
            if addr.is_loopback() || addr.is_unspecified() {
                return Err(blocked_host(&addr.to_string()));
            }
            // IPv4-mapped forms (::ffff:10.0.0.1) hide the same ranges
            if let Some(v4) = addr.to_ipv4_mapped() {
                if is_blocked_ipv4(v4) {
                    return Err(blocked_host(&addr.to_string()));
                }
            }
        }
    }

    Ok(SourceUrl { url })
}

fn blocked_host(host: &str) -> ExtractError {
    ExtractError::InvalidUrl(format!("host '{host}' is not allowed"))
}

fn is_blocked_ipv4(addr: Ipv4Addr) -> bool {
    let octets = addr.octets();
    match octets {
        // 0.0.0.0/8 and 127.0.0.0/8
        [0, ..] | [127, ..] => true,
        // RFC 1918 private ranges
        [10, ..] => true,
        [172, b, ..] if (16..=31).contains(&b) => true,
        [192, 168, ..] => true,
        // link-local
        [169, 254, ..] => true,
        _ => false,
    }
}
