//! Image sources and alternative text

use scraper::{Html, Selector};

/// One `<img>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// `src` attribute, empty when absent
    pub src: String,

    /// `alt` attribute, `None` when absent
    pub alt: Option<String>,
}

impl ImageInfo {
    /// True when alt text is present and non-empty
    pub fn has_alt(&self) -> bool {
        self.alt.as_deref().is_some_and(|alt| !alt.is_empty())
    }
}

pub fn extract_images(document: &Html) -> Vec<ImageInfo> {
    let Ok(img_selector) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&img_selector)
        .map(|img| ImageInfo {
            src: img.value().attr("src").unwrap_or_default().to_string(),
            alt: img.value().attr("alt").map(str::to_string),
        })
        .collect()
}

/// Number of images lacking usable alt text
pub fn missing_alt_count(images: &[ImageInfo]) -> usize {
    images.iter().filter(|img| !img.has_alt()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_images() {
        let html = r#"<body>
            <img src="/a.png" alt="A chart">
            <img src="/b.png">
            <img alt="">
        </body>"#;
        let images = extract_images(&Html::parse_document(html));

        assert_eq!(images.len(), 3);
        assert_eq!(images[0].alt.as_deref(), Some("A chart"));
        assert_eq!(images[1].alt, None);
        assert_eq!(images[2].src, "");
        assert_eq!(images[2].alt.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_alt_counts_absent_and_empty() {
        let html = r#"<img src="1" alt="ok"><img src="2"><img src="3" alt="">"#;
        let images = extract_images(&Html::parse_document(html));
        assert_eq!(missing_alt_count(&images), 2);
    }

    #[test]
    fn test_no_images() {
        let images = extract_images(&Html::parse_document("<p>text</p>"));
        assert!(images.is_empty());
        assert_eq!(missing_alt_count(&images), 0);
    }
}
