//! JSON-LD blocks and Open Graph tags

use scraper::{Html, Selector};
use serde_json::Value;

/// Parses every `<script type="application/ld+json">` block
///
/// Blocks that are not valid JSON are skipped.
pub fn extract_schema_org(document: &Html) -> Vec<Value> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|script| {
            let raw = script.text().collect::<String>();
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Skipping malformed JSON-LD block: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Collects `og:` properties in document order
///
/// A property that appears twice keeps its first position and its last
/// content.
pub fn extract_open_graph(document: &Html) -> Vec<(String, Option<String>)> {
    let mut tags: Vec<(String, Option<String>)> = Vec::new();

    let Ok(selector) = Selector::parse("meta[property]") else {
        return tags;
    };

    for meta in document.select(&selector) {
        let Some(property) = meta.value().attr("property") else {
            continue;
        };
        if !property.starts_with("og:") {
            continue;
        }

        let content = meta.value().attr("content").map(str::to_string);
        match tags.iter_mut().find(|(name, _)| name == property) {
            Some(existing) => existing.1 = content,
            None => tags.push((property.to_string(), content)),
        }
    }

    tags
}
