use scraper::Selector;
use serde_json::Value;

use crate::adapters::structured_data::json_ld_items;
use crate::adapters::{MetadataAdapter, ParsingContext};
use crate::model::PartialMetadata;

/// Last-resort adapter, consulted only when title/description/thumbnail
/// are still empty after the earlier strategies.
pub struct ContentFallbackAdapter;

// Ordered: recipe/article body containers before bare paragraphs.
const DESCRIPTION_SELECTORS: &[&str] = &[
    ".post-content p",
    ".entry-content p",
    "article p",
    "main p",
    "p",
];

impl MetadataAdapter for ContentFallbackAdapter {
    fn extract(&self, context: &ParsingContext) -> PartialMetadata {
        let mut partial = PartialMetadata::default();

        // Re-scan structured data without any type filter.
        for item in json_ld_items(&context.document) {
            if partial.title.is_none() {
                partial.title = loose_string(&item, "name")
                    .or_else(|| loose_string(&item, "headline"));
            }
            if partial.description.is_none() {
                partial.description = loose_string(&item, "description");
            }
        }

        if partial.title.is_none() {
            partial.title = element_text(context, "title");
        }

        if partial.description.is_none() {
            for selector in DESCRIPTION_SELECTORS {
                if let Some(text) = element_text(context, selector) {
                    partial.description = Some(text);
                    break;
                }
            }
        }

        partial
    }
}

fn loose_string(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn element_text(context: &ParsingContext, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    context
        .document
        .select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    fn context(html: &str) -> ParsingContext {
        ParsingContext::new(
            "https://example.com/post".to_string(),
            Platform::Generic("example".to_string()),
            html.to_string(),
        )
    }

    #[test]
    fn falls_back_to_title_element_and_first_paragraph() {
        let html = r#"<html>
            <head><title>Grandma's Stew</title></head>
            <body><article><p></p><p>A hearty stew for cold evenings.</p></article></body>
        </html>"#;

        let partial = ContentFallbackAdapter.extract(&context(html));
        assert_eq!(partial.title.as_deref(), Some("Grandma's Stew"));
        assert_eq!(
            partial.description.as_deref(),
            Some("A hearty stew for cold evenings.")
        );
    }

    #[test]
    fn prefers_structured_data_name_over_title_element() {
        let html = r#"<html><head>
            <title>Boring page title</title>
            <script type="application/ld+json">{"name":"Actual Dish Name"}</script>
        </head></html>"#;

        let partial = ContentFallbackAdapter.extract(&context(html));
        assert_eq!(partial.title.as_deref(), Some("Actual Dish Name"));
    }
}
