//! Head metadata: title, named meta tags, `<link rel>` targets, viewport

use scraper::{ElementRef, Html, Selector};

/// Metadata read from the document head
///
/// Every field is `None` when the tag is absent. A tag that is present but
/// empty yields `Some("")`, so absence and emptiness stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub favicon: Option<String>,
}

/// Viewport information used to judge mobile readiness
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileInfo {
    pub viewport_present: bool,
    pub viewport_content: Option<String>,
}

/// Extracts all head metadata in one pass over the relevant selectors
pub fn extract_head_meta(document: &Html) -> HeadMeta {
    HeadMeta {
        title: extract_title(document),
        description: find_meta(document, "description").map(|el| trimmed_content(&el)),
        keywords: find_meta(document, "keywords").map(|el| trimmed_content(&el)),
        canonical: find_link(document, "canonical").and_then(|el| attr(&el, "href")),
        robots: find_meta(document, "robots").and_then(|el| attr(&el, "content")),
        favicon: find_link(document, "icon").and_then(|el| attr(&el, "href")),
    }
}

/// Reports presence and content of `<meta name="viewport">`
pub fn extract_mobile_info(document: &Html) -> MobileInfo {
    match find_meta(document, "viewport") {
        Some(el) => MobileInfo {
            viewport_present: true,
            viewport_content: attr(&el, "content"),
        },
        None => MobileInfo::default(),
    }
}

/// Extracts the text of the first `<title>`, trimmed
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Finds the first `<meta>` whose `name` matches, ignoring ASCII case
fn find_meta<'a>(document: &'a Html, name: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("meta[name]").ok()?;

    document.select(&selector).find(|el| {
        el.value()
            .attr("name")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(name))
    })
}

/// Finds the first `<link>` whose `rel` token list contains `token`
///
/// `rel="shortcut icon"` therefore matches `icon`.
fn find_link<'a>(document: &'a Html, token: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("link[rel]").ok()?;

    document.select(&selector).find(|el| {
        el.value().attr("rel").is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    })
}

fn attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

fn trimmed_content(element: &ElementRef<'_>) -> String {
    element
        .value()
        .attr("content")
        .unwrap_or("")
        .trim()
        .to_string()
}
