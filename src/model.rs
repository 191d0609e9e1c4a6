use serde::Serialize;

use crate::platform::Platform;

/// Title sentinel: present so downstream display never sees an empty
/// title, but any adapter is allowed to replace it.
pub const UNTITLED: &str = "Untitled";

/// Structured summary derived from a third-party page.
///
/// Fields fill monotonically: once non-empty, later adapters never
/// overwrite them. See [`VideoMetadata::fill`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// Candidate recipe comments, longest first, at most five.
    pub top_comments: Vec<String>,
    pub platform: Option<Platform>,
}

impl Default for VideoMetadata {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: String::new(),
            thumbnail_url: String::new(),
            top_comments: Vec::new(),
            platform: None,
        }
    }
}

impl VideoMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once an adapter has provided a real title (not the sentinel).
    pub fn has_title(&self) -> bool {
        !self.title.is_empty() && self.title != UNTITLED
    }

    pub fn is_complete(&self) -> bool {
        self.has_title() && !self.description.is_empty() && !self.thumbnail_url.is_empty()
    }

    /// Callers should surface this case distinctly from a hard
    /// `InvalidUrl`/`FetchFailed`: the page fetched but nothing usable
    /// came out of it.
    pub fn is_soft_failure(&self) -> bool {
        !self.has_title() && self.description.is_empty()
    }

    /// Merge a partial result in, filling only currently-empty fields.
    pub fn fill(&mut self, partial: PartialMetadata) {
        if !self.has_title() {
            if let Some(title) = non_empty(partial.title) {
                self.title = title;
            }
        }
        if self.description.is_empty() {
            if let Some(description) = non_empty(partial.description) {
                self.description = description;
            }
        }
        if self.thumbnail_url.is_empty() {
            if let Some(thumbnail) = non_empty(partial.thumbnail_url) {
                self.thumbnail_url = thumbnail;
            }
        }
    }
}

/// One adapter's contribution. Absence is `None`; adapters never error.
#[derive(Debug, Clone, Default)]
pub struct PartialMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl PartialMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail_url.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_never_overwrites_populated_fields() {
        let mut meta = VideoMetadata::new();
        meta.fill(PartialMetadata {
            title: Some("First".to_string()),
            description: None,
            thumbnail_url: None,
        });
        meta.fill(PartialMetadata {
            title: Some("Second".to_string()),
            description: Some("Desc".to_string()),
            thumbnail_url: None,
        });

        assert_eq!(meta.title, "First");
        assert_eq!(meta.description, "Desc");
    }

    #[test]
    fn untitled_sentinel_is_replaceable() {
        let mut meta = VideoMetadata::new();
        assert_eq!(meta.title, UNTITLED);
        assert!(!meta.has_title());

        meta.fill(PartialMetadata {
            title: Some("Real Title".to_string()),
            ..Default::default()
        });
        assert_eq!(meta.title, "Real Title");
        assert!(meta.has_title());
    }

    #[test]
    fn blank_contributions_are_ignored() {
        let mut meta = VideoMetadata::new();
        meta.fill(PartialMetadata {
            title: Some("   ".to_string()),
            description: Some(String::new()),
            thumbnail_url: None,
        });
        assert!(!meta.has_title());
        assert!(meta.is_soft_failure());
    }
}
