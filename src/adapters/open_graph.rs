use html_escape::decode_html_entities;
use scraper::{Html, Selector};

use crate::adapters::{MetadataAdapter, ParsingContext};
use crate::model::PartialMetadata;

/// Reads Open Graph / Twitter card meta tags and the `<title>` element.
///
/// Runs for every platform right after oEmbed; this is the workhorse
/// adapter since nearly every page carries og:* tags.
pub struct OpenGraphAdapter;

const TITLE_SUFFIXES: &[&str] = &[
    " - YouTube",
    " | TikTok",
    " - TikTok",
    " • Instagram",
    " - Instagram",
    " | Facebook",
    " | By Facebook",
    " on Vimeo",
    " - Vimeo",
];

impl MetadataAdapter for OpenGraphAdapter {
    fn extract(&self, context: &ParsingContext) -> PartialMetadata {
        let document = &context.document;

        let title = meta_property(document, "og:title")
            .or_else(|| title_element(document))
            .map(|t| strip_platform_suffix(&t));

        let description = meta_property(document, "og:description");

        let thumbnail_url = meta_property(document, "og:image")
            .or_else(|| meta_property(document, "og:image:secure_url"))
            .or_else(|| meta_name(document, "twitter:image"))
            .or_else(|| meta_property(document, "twitter:image"));

        PartialMetadata {
            title,
            description,
            thumbnail_url,
        }
    }
}

fn meta_property(document: &Html, property: &str) -> Option<String> {
    meta_content(document, &format!("meta[property='{property}']"))
}

fn meta_name(document: &Html, name: &str) -> Option<String> {
    meta_content(document, &format!("meta[name='{name}']"))
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let content = document.select(&sel).next()?.value().attr("content")?;
    let decoded = decode_html_entities(content.trim()).into_owned();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

fn title_element(document: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let text = document
        .select(&sel)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() {
        None
    } else {
        Some(decode_html_entities(&text).into_owned())
    }
}

fn strip_platform_suffix(title: &str) -> String {
    for suffix in TITLE_SUFFIXES {
        if let Some(stripped) = title.strip_suffix(suffix) {
            return stripped.trim_end().to_string();
        }
    }
    title.to_string()
}
