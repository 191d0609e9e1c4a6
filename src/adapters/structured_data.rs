use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::adapters::{MetadataAdapter, ParsingContext};
use crate::model::PartialMetadata;
use crate::platform::Platform;

/// Reads embedded JSON-LD (`application/ld+json`) blocks.
///
/// Every block is parsed tolerantly; a block that fails to parse is
/// skipped, never fatal. Which item types are consulted depends on the
/// platform: recipe sites get `Recipe`, TikTok/Instagram get
/// `VideoObject`/`Video`, and `Article`/`WebPage` plus a generic
/// headline/description check apply everywhere.
pub struct StructuredDataAdapter;

impl MetadataAdapter for StructuredDataAdapter {
    fn extract(&self, context: &ParsingContext) -> PartialMetadata {
        let mut partial = PartialMetadata::default();

        for item in json_ld_items(&context.document) {
            if context.platform.is_recipe_site() && type_matches(&item, &["Recipe"]) {
                merge(&mut partial, named_entity_fields(&item, "name"));
            }
            if type_matches(&item, &["Article", "NewsArticle", "WebPage"]) {
                merge(&mut partial, named_entity_fields(&item, "headline"));
            }
            if matches!(context.platform, Platform::Tiktok | Platform::Instagram)
                && type_matches(&item, &["VideoObject", "Video"])
            {
                merge(
                    &mut partial,
                    PartialMetadata {
                        title: string_field(&item, "name"),
                        description: string_field(&item, "description"),
                        thumbnail_url: image_field(&item, "thumbnailUrl"),
                    },
                );
            }
            // Generic check: any block may still carry a usable headline.
            merge(
                &mut partial,
                PartialMetadata {
                    title: string_field(&item, "headline"),
                    description: string_field(&item, "description"),
                    thumbnail_url: None,
                },
            );
        }

        partial
    }
}

fn named_entity_fields(item: &Value, title_key: &str) -> PartialMetadata {
    PartialMetadata {
        title: string_field(item, title_key),
        description: string_field(item, "description"),
        thumbnail_url: image_field(item, "image"),
    }
}

/// Adapter-local merge, same fill-only-empty rule as the orchestrator.
fn merge(partial: &mut PartialMetadata, contribution: PartialMetadata) {
    if partial.title.is_none() {
        partial.title = contribution.title;
    }
    if partial.description.is_none() {
        partial.description = contribution.description;
    }
    if partial.thumbnail_url.is_none() {
        partial.thumbnail_url = contribution.thumbnail_url;
    }
}

/// All JSON-LD items on the page, with top-level arrays and `@graph`
/// containers flattened.
pub fn json_ld_items(document: &Html) -> Vec<Value> {
    let selector = match Selector::parse("script[type='application/ld+json']") {
        Ok(sel) => sel,
        Err(_) => return Vec::new(),
    };

    let mut items = Vec::new();
    for script in document.select(&selector) {
        let cleaned = sanitize_json(&script.inner_html());
        let parsed: Value = match serde_json::from_str(&cleaned) {
            Ok(value) => value,
            Err(e) => {
                debug!("skipping unparseable ld+json block: {e}");
                continue;
            }
        };
        flatten_into(parsed, &mut items);
    }
    items
}

fn flatten_into(value: Value, items: &mut Vec<Value>) {
    match value {
        Value::Array(entries) => items.extend(entries),
        Value::Object(ref map) => {
            if let Some(Value::Array(graph)) = map.get("@graph") {
                items.extend(graph.clone());
            }
            items.push(value);
        }
        _ => {}
    }
}

/// Clean up the quirks sites embed around their JSON-LD before parsing.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

/// `@type` can be a string or an array of strings; compare
/// case-insensitively (sites disagree on casing).
fn type_matches(item: &Value, wanted: &[&str]) -> bool {
    let matches_one = |v: &Value| {
        v.as_str()
            .map(|t| wanted.iter().any(|w| t.eq_ignore_ascii_case(w)))
            .unwrap_or(false)
    };
    match item.get("@type") {
        Some(Value::Array(types)) => types.iter().any(matches_one),
        Some(single) => matches_one(single),
        None => false,
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    let text = match item.get(key)? {
        Value::String(s) => s.clone(),
        // schema.org sometimes wraps text values as { "@type": ..., "text": ... }
        Value::Object(map) => map.get("text")?.as_str()?.to_string(),
        _ => return None,
    };
    let decoded = decode_html_entities(text.trim()).into_owned();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Image fields come in every shape sites can invent: a bare URL, an
/// ImageObject, or arrays of either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    Url(String),
    Object { url: String },
    Many(Vec<ImageField>),
}

impl ImageField {
    fn first_url(self) -> Option<String> {
        match self {
            ImageField::Url(url) => Some(url),
            ImageField::Object { url } => Some(url),
            ImageField::Many(entries) => entries.into_iter().find_map(ImageField::first_url),
        }
    }
}

fn image_field(item: &Value, key: &str) -> Option<String> {
    let value = item.get(key)?.clone();
    let field: ImageField = serde_json::from_value(value).ok()?;
    field.first_url().filter(|u| !u.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(platform: Platform, json_ld: &str) -> ParsingContext {
        let html = format!(
            r#"<html><head><script type="application/ld+json">{json_ld}</script></head></html>"#
        );
        ParsingContext::new("https://example.com/x".to_string(), platform, html)
    }

    #[test]
    fn reads_recipe_item_on_recipe_sites() {
        let json_ld = r#"{
            "@context": "https://schema.org",
            "@type": "Recipe",
            "name": "Garlic Butter Shrimp",
            "description": "Quick dinner",
            "image": ["https://img.example/shrimp.jpg"]
        }"#;
        let ctx = context(Platform::RecipeSite("allrecipes"), json_ld);
        let partial = StructuredDataAdapter.extract(&ctx);

        assert_eq!(partial.title.as_deref(), Some("Garlic Butter Shrimp"));
        assert_eq!(partial.description.as_deref(), Some("Quick dinner"));
        assert_eq!(
            partial.thumbnail_url.as_deref(),
            Some("https://img.example/shrimp.jpg")
        );
    }

    #[test]
    fn recipe_items_are_ignored_off_recipe_sites_but_headline_still_counts() {
        let json_ld = r#"{
            "@type": "Recipe",
            "name": "Hidden",
            "headline": "Visible Headline",
            "description": "Shared description"
        }"#;
        let ctx = context(Platform::Generic("example".to_string()), json_ld);
        let partial = StructuredDataAdapter.extract(&ctx);

        assert_eq!(partial.title.as_deref(), Some("Visible Headline"));
        assert_eq!(partial.description.as_deref(), Some("Shared description"));
    }

    #[test]
    fn reads_video_object_for_tiktok() {
        let json_ld = r#"{
            "@type": "VideoObject",
            "name": "Crispy Rice",
            "description": "Pan-fried",
            "thumbnailUrl": "https://img.example/rice.jpg"
        }"#;
        let ctx = context(Platform::Tiktok, json_ld);
        let partial = StructuredDataAdapter.extract(&ctx);

        assert_eq!(partial.title.as_deref(), Some("Crispy Rice"));
        assert_eq!(
            partial.thumbnail_url.as_deref(),
            Some("https://img.example/rice.jpg")
        );
    }

    #[test]
    fn walks_graph_containers_and_skips_broken_blocks() {
        let html = r#"<html><head>
            <script type="application/ld+json">{not json at all</script>
            <script type="application/ld+json">{
                "@graph": [
                    { "@type": "WebPage", "headline": "Graph Headline", "description": "From graph" }
                ]
            }</script>
        </head></html>"#;
        let ctx = ParsingContext::new(
            "https://example.com/x".to_string(),
            Platform::Generic("example".to_string()),
            html.to_string(),
        );
        let partial = StructuredDataAdapter.extract(&ctx);
        assert_eq!(partial.title.as_deref(), Some("Graph Headline"));
    }

    #[test]
    fn type_arrays_match_case_insensitively() {
        let json_ld = r#"{
            "@type": ["recipe", "Thing"],
            "name": "Lentil Soup",
            "description": "Cozy"
        }"#;
        let ctx = context(Platform::RecipeSite("seriouseats"), json_ld);
        let partial = StructuredDataAdapter.extract(&ctx);
        assert_eq!(partial.title.as_deref(), Some("Lentil Soup"));
    }
}
