//! Heading structure for levels 1 through 3

use scraper::{Html, Selector};
use std::ops::RangeInclusive;

/// Heading levels included in the structure report
pub const HEADING_LEVELS: RangeInclusive<u8> = 1..=3;

/// All headings of one level, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLevel {
    pub level: u8,
    pub texts: Vec<String>,
}

impl HeadingLevel {
    pub fn count(&self) -> usize {
        self.texts.len()
    }

    /// Tag name, e.g. `h1`
    pub fn tag(&self) -> String {
        format!("h{}", self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headings {
    levels: Vec<HeadingLevel>,
}

impl Headings {
    /// Returns the headings of `level`, if that level is tracked
    pub fn level(&self, level: u8) -> Option<&HeadingLevel> {
        self.levels.iter().find(|h| h.level == level)
    }

    /// Number of headings at `level`; zero for untracked levels
    pub fn count(&self, level: u8) -> usize {
        self.level(level).map_or(0, HeadingLevel::count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadingLevel> {
        self.levels.iter()
    }
}

/// Collects `h1`..`h3` with their trimmed text
pub fn extract_headings(document: &Html) -> Headings {
    let levels = HEADING_LEVELS
        .map(|level| {
            let texts = Selector::parse(&format!("h{}", level))
                .map(|selector| {
                    document
                        .select(&selector)
                        .map(|el| el.text().collect::<String>().trim().to_string())
                        .collect()
                })
                .unwrap_or_default();
            HeadingLevel { level, texts }
        })
        .collect();

    Headings { levels }
}
