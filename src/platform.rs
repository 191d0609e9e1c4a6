use serde::{Serialize, Serializer};

use crate::safety::SourceUrl;

/// Source platform tag derived from a URL's host.
///
/// Known video platforms and recipe sites get a fixed tag; anything else
/// gets a generic label derived from the domain, or `unknown` when the
/// host is too short to carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    Instagram,
    Tiktok,
    Facebook,
    Vimeo,
    RecipeSite(&'static str),
    Generic(String),
    Unknown,
}

impl Platform {
    pub fn tag(&self) -> &str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Vimeo => "vimeo",
            Platform::RecipeSite(tag) => tag,
            Platform::Generic(tag) => tag,
            Platform::Unknown => "unknown",
        }
    }

    /// Platforms whose public oEmbed endpoint we consult before scraping.
    pub fn supports_oembed(&self) -> bool {
        matches!(self, Platform::Tiktok | Platform::Instagram)
    }

    pub fn is_recipe_site(&self) -> bool {
        matches!(self, Platform::RecipeSite(_))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

// Ordered: first match wins. youtu.be before the generic fallback matters,
// order within the table mirrors how often each platform shows up.
const VIDEO_PLATFORMS: &[(&str, Platform)] = &[
    ("youtube.", Platform::Youtube),
    ("youtu.be", Platform::Youtube),
    ("instagram.", Platform::Instagram),
    ("tiktok.", Platform::Tiktok),
    ("facebook.", Platform::Facebook),
    ("fb.watch", Platform::Facebook),
    ("vimeo.", Platform::Vimeo),
];

const RECIPE_SITES: &[(&str, &str)] = &[
    ("allrecipes", "allrecipes"),
    ("foodnetwork", "foodnetwork"),
    ("seriouseats", "seriouseats"),
    ("bonappetit", "bonappetit"),
    ("epicurious", "epicurious"),
    ("simplyrecipes", "simplyrecipes"),
    ("budgetbytes", "budgetbytes"),
    ("delish", "delish"),
    ("food52", "food52"),
    ("tasty.co", "tasty"),
];

/// Map a validated URL's host to a platform tag. Pure and total.
pub fn classify(url: &SourceUrl) -> Platform {
    let host = url.host_str().to_ascii_lowercase();

    for (needle, platform) in VIDEO_PLATFORMS {
        if host.contains(needle) {
            return platform.clone();
        }
    }

    for (needle, tag) in RECIPE_SITES {
        if host.contains(needle) {
            return Platform::RecipeSite(tag);
        }
    }

    // www.example.com -> "example"
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() >= 2 {
        Platform::Generic(labels[labels.len() - 2].to_string())
    } else {
        Platform::Unknown
    }
}
