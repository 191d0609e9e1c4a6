use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::comments::{mine_comments, rank_comments, MAX_COMMENT_DEPTH};
use crate::json_scan::{extract_balanced_json, DEFAULT_MAX_SCAN};

const INITIAL_DATA_MARKER: &str = "ytInitialData";

// Fallback for pages where the assignment is wrapped in a way the brace
// scan misses. Only ever applied to a window capped at the same scan
// bound the primary path honors, never to the full page.
static INITIAL_DATA_FALLBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)ytInitialData\s{0,8}=\s{0,8}(\{.*?\})\s{0,8};").unwrap());

/// Parse the video id out of the URL shapes YouTube uses.
pub fn video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    let mut segments = parsed.path_segments()?;
    if host.contains("youtu.be") {
        return segments.next().map(str::to_string).filter(|s| !s.is_empty());
    }

    match segments.next() {
        Some("shorts") | Some("embed") | Some("v") => {
            return segments.next().map(str::to_string).filter(|s| !s.is_empty());
        }
        _ => {}
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())
}

/// YouTube's predictable thumbnail URL for a video id. Used when no
/// og:image survived the merge.
pub fn default_thumbnail(url: &str) -> Option<String> {
    video_id(url).map(|id| format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"))
}

/// Locate the `ytInitialData` state blob and mine it for recipe-looking
/// comment strings. Returns ranked, deduplicated candidates (at most
/// five); any failure along the way yields an empty list.
pub fn mine_page_comments(html: &str) -> Vec<String> {
    let blob = match extract_balanced_json(html, INITIAL_DATA_MARKER, DEFAULT_MAX_SCAN) {
        Some(slice) => Some(slice),
        None => marker_window(html)
            .and_then(|window| INITIAL_DATA_FALLBACK.captures(window))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str()),
    };
    let Some(blob) = blob else {
        debug!("no ytInitialData region found");
        return Vec::new();
    };

    let state: Value = match serde_json::from_str(blob) {
        Ok(value) => value,
        Err(e) => {
            debug!("ytInitialData failed to parse: {e}");
            return Vec::new();
        }
    };

    rank_comments(mine_comments(&state, MAX_COMMENT_DEPTH))
}

/// At most `DEFAULT_MAX_SCAN` characters starting at the marker.
fn marker_window(html: &str) -> Option<&str> {
    let pos = html.find(INITIAL_DATA_MARKER)?;
    let tail = &html[pos..];
    let end = tail
        .char_indices()
        .nth(DEFAULT_MAX_SCAN)
        .map(|(idx, _)| idx)
        .unwrap_or(tail.len());
    Some(&tail[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_short_and_embed_urls() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://www.youtube.com/shorts/abc123").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            video_id("https://www.youtube.com/embed/abc123").as_deref(),
            Some("abc123")
        );
        assert_eq!(video_id("https://www.youtube.com/feed/library"), None);
    }

    #[test]
    fn default_thumbnail_uses_video_id() {
        assert_eq!(
            default_thumbnail("https://www.youtube.com/watch?v=abc").as_deref(),
            Some("https://i.ytimg.com/vi/abc/hqdefault.jpg")
        );
    }

    #[test]
    fn mines_comments_out_of_initial_data() {
        let recipe_comment =
            "Tried this with 2 tbsp of brown butter instead and it was honestly incredible!";
        let chatter = "First!! Love this channel so much, been here since the very beginning!";
        let html = format!(
            r#"<script>var ytInitialData = {{"comments":[{{"simpleText":"{recipe_comment}"}},{{"simpleText":"{chatter}"}}]}};</script>"#
        );

        let comments = mine_page_comments(&html);
        assert_eq!(comments, vec![recipe_comment.to_string()]);
    }

    #[test]
    fn missing_initial_data_yields_empty_list() {
        assert!(mine_page_comments("<html><body>no state here</body></html>").is_empty());
    }
}
