//! Visible text, word counts, and keyword density

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Keywords must be longer than this many characters
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Keywords must occur more than this many times
pub const MIN_KEYWORD_OCCURRENCES: usize = 2;

/// Maximum number of keywords reported
pub const MAX_KEYWORDS: usize = 20;

/// A keyword and its share of all words on the page
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordDensity {
    pub word: String,
    pub count: usize,
    /// Share of the total word count, 0.0..=100.0
    pub percentage: f64,
}

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

/// Elements that start a new line of text when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "details", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "td", "th", "title", "tr", "ul",
];

/// Collects the document's visible text
///
/// Inline markup does not split words (`H<sub>2</sub>O` stays one word);
/// block boundaries do. Runs of whitespace collapse to one space.
pub fn visible_text(document: &Html) -> String {
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&el.name());
                if block {
                    out.push(' ');
                }
                collect_text(child_element, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Counts Unicode word-character runs
pub fn word_count(text: &str) -> usize {
    word_pattern().find_iter(text).count()
}

/// Computes the most frequent keywords of `text`
///
/// Text is lower-cased and split into word-character runs. Words of more than
/// three characters seen more than twice are kept; their percentage is taken
/// against the total number of words. The result is sorted by descending
/// percentage, ties keeping the order in which words first appeared, and
/// capped at twenty entries.
pub fn keyword_density(text: &str) -> Vec<KeywordDensity> {
    let lowered = text.to_lowercase();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for token in word_pattern().find_iter(&lowered).map(|m| m.as_str()) {
        total += 1;
        match positions.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    if total == 0 {
        return Vec::new();
    }

    let mut density: Vec<KeywordDensity> = counts
        .into_iter()
        .filter(|(word, count)| {
            word.chars().count() > MIN_KEYWORD_CHARS && *count > MIN_KEYWORD_OCCURRENCES
        })
        .map(|(word, count)| KeywordDensity {
            word: word.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    // Stable: equal counts keep first-appearance order
    density.sort_by(|a, b| b.count.cmp(&a.count));
    density.truncate(MAX_KEYWORDS);
    density
}
