use crate::extract::Page;
use crate::probe::{RobotsReport, SiteChecks, SitemapReport, SslInfo};
use crate::report::{OutputError, OutputResult};
use crate::suggest::Suggestions;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Width of the `=` and `-` rule lines
pub const RULE_WIDTH: usize = 50;

/// Section titles in report order
pub const SECTION_TITLES: [&str; 19] = [
    "TITLE",
    "META DESCRIPTION",
    "META KEYWORDS",
    "HEADING STRUCTURE",
    "LINK ANALYSIS",
    "IMAGES AND ALT ATTRIBUTES",
    "CONTENT LENGTH",
    "KEYWORD DENSITY",
    "CANONICAL URL",
    "META ROBOTS",
    "FAVICON",
    "SSL",
    "MOBILE OPTIMIZATION",
    "SCHEMA.ORG",
    "OPEN GRAPH TAGS",
    "ROBOTS.TXT",
    "SITEMAP",
    "PERFORMANCE",
    "IMPROVEMENT SUGGESTIONS",
];

const NOT_FOUND: &str = "Not found";

/// Evaluates the suggestion engine and writes the full report to `path`
///
/// The header is dated with the moment the page fetch started.
///
/// # Returns
///
/// * `Ok(Suggestions)` - The findings that were written
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_report(
    path: &Path,
    page: &Page,
    checks: &SiteChecks,
) -> OutputResult<Suggestions> {
    let suggestions = Suggestions::evaluate(page, checks);
    let report = format_report(page, checks, &suggestions);

    let write_err = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(report.as_bytes()).map_err(write_err)?;

    tracing::info!("Report for {} written to {}", page.url(), path.display());

    Ok(suggestions)
}

/// Formats the whole report
pub fn format_report(
    page: &Page,
    checks: &SiteChecks,
    suggestions: &Suggestions,
) -> String {
    let fetched_at = page.snapshot().fetched_at;
    let mut out = String::new();

    out.push_str(&format!(
        "SEO Analysis Report - {}\n",
        fetched_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Analyzed URL: {}\n",
        page.snapshot().requested_url
    ));

    let sections = [
        or_not_found(page.title()),
        or_not_found(page.meta_description()),
        or_not_found(page.meta_keywords()),
        format_headings(page),
        format_links(page),
        format_images(page),
        format!("Total words: {}", page.word_count()),
        format_keywords(page),
        or_not_found(page.canonical_url()),
        or_not_found(page.robots_meta()),
        or_not_found(page.favicon()),
        format_ssl(&checks.ssl, fetched_at.with_timezone(&Utc)),
        format_mobile(page),
        format_schema_org(page),
        format_open_graph(page),
        format_robots(&checks.robots),
        format_sitemap(&checks.sitemap),
        format_performance(page),
        format_suggestions(suggestions),
    ];

    for (title, content) in SECTION_TITLES.iter().zip(sections.iter()) {
        write_section(&mut out, title, content);
    }

    out
}

/// Formats the findings, or states that there are none
pub fn format_suggestions(suggestions: &Suggestions) -> String {
    let findings = match suggestions {
        Suggestions::None => return "No improvement suggestions were found.".to_string(),
        Suggestions::Found(findings) => findings,
    };

    let mut out = format!("SEO IMPROVEMENT SUGGESTIONS\n{}\n\n", "=".repeat(RULE_WIDTH));
    for finding in findings {
        out.push_str(&format!(
            "{} - {}\n",
            finding.priority.label(),
            finding.title
        ));
        out.push_str(&format!("Problem: {}\n", finding.problem));
        out.push_str(&format!("Solution: {}\n", finding.solution));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
    }
    out
}

fn write_section(out: &mut String, title: &str, content: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&format!("\n{}\n{}\n{}\n", rule, title, rule));
    out.push_str(content);
    out.push('\n');
}

fn or_not_found(value: Option<&str>) -> String {
    value.unwrap_or(NOT_FOUND).to_string()
}

fn format_headings(page: &Page) -> String {
    let mut out = String::new();
    for level in page.headings().iter() {
        out.push_str(&format!("\nNumber of {}: {}\n", level.tag(), level.count()));
        if !level.texts.is_empty() {
            out.push_str("Heading texts:\n");
            for text in &level.texts {
                out.push_str(&format!("- {}\n", text));
            }
        }
    }
    out
}

fn format_links(page: &Page) -> String {
    let links = page.links();
    let mut out = format!(
        "Internal links: {}\nExternal links: {}\nBroken links: {}\n",
        links.internal.len(),
        links.external.len(),
        links.broken.len()
    );
    if !links.broken.is_empty() {
        out.push_str("\nUnresolvable hrefs:\n");
        for href in &links.broken {
            out.push_str(&format!("- {}\n", href));
        }
    }
    out
}

fn format_images(page: &Page) -> String {
    let images = page.images();
    let mut out = format!("Total images: {}\n\n", images.len());
    for image in images {
        out.push_str(&format!("Source: {}\n", image.src));
        out.push_str(&format!(
            "Alt: {}\n\n",
            image.alt.as_deref().unwrap_or("No alternative text")
        ));
    }
    out
}

fn format_keywords(page: &Page) -> String {
    let mut out = String::from("Top 20 most used keywords:\n");
    for keyword in page.keyword_density() {
        out.push_str(&format!("{}: {:.2}%\n", keyword.word, keyword.percentage));
    }
    out
}

fn format_ssl(ssl: &SslInfo, now: DateTime<Utc>) -> String {
    let mut out = format!("Secure: {}\n", if ssl.secure { "yes" } else { "no" });

    if let Some(expiry) = ssl.expiry {
        out.push_str(&format!(
            "Expires: {}",
            expiry.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if let Some(days) = ssl.days_until_expiry(now) {
            out.push_str(&format!(" ({} days left)", days));
        }
        out.push('\n');
    }
    if !ssl.issuer.is_empty() {
        out.push_str("Issuer:\n");
        for (key, value) in &ssl.issuer {
            out.push_str(&format!("  {}: {}\n", key, value));
        }
    }
    if let Some(error) = &ssl.error {
        out.push_str(&format!("Error: {}\n", error));
    }
    out
}

fn format_mobile(page: &Page) -> String {
    let mobile = page.mobile_info();
    if !mobile.viewport_present {
        return "Viewport meta tag: missing".to_string();
    }
    format!(
        "Viewport meta tag: present\nContent: {}",
        mobile.viewport_content.as_deref().unwrap_or_default()
    )
}

fn format_schema_org(page: &Page) -> String {
    let blocks = page.schema_org_blocks();
    if blocks.is_empty() {
        return "No schema.org data found".to_string();
    }
    let mut out = format!("Blocks found: {}\n", blocks.len());
    for block in blocks {
        out.push_str(&format!("{:#}\n", block));
    }
    out
}

fn format_open_graph(page: &Page) -> String {
    let tags = page.open_graph_tags();
    if tags.is_empty() {
        return "No Open Graph tags found".to_string();
    }
    tags.iter()
        .map(|(property, content)| {
            format!("{}: {}", property, content.as_deref().unwrap_or_default())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_robots(robots: &RobotsReport) -> String {
    match robots {
        RobotsReport::Available {
            url,
            can_fetch,
            sitemaps,
            crawl_delay,
        } => {
            let mut out = format!(
                "URL: {}\nCrawlable by *: {}\n",
                url,
                if *can_fetch { "yes" } else { "no" }
            );
            if let Some(delay) = crawl_delay {
                out.push_str(&format!("Crawl delay: {} seconds\n", delay));
            }
            if sitemaps.is_empty() {
                out.push_str("Declared sitemaps: none\n");
            } else {
                out.push_str("Declared sitemaps:\n");
                for sitemap in sitemaps {
                    out.push_str(&format!("- {}\n", sitemap));
                }
            }
            out
        }
        RobotsReport::Unavailable { url, reason } => {
            format!("URL: {}\nError: {}", url, reason)
        }
    }
}

fn format_sitemap(sitemap: &SitemapReport) -> String {
    match sitemap {
        SitemapReport::Available { url, total, urls } => {
            let mut out = format!("URL: {}\nURLs found: {}\n", url, total);
            if !urls.is_empty() {
                out.push_str(&format!("First {} URLs:\n", urls.len()));
                for entry in urls {
                    out.push_str(&format!("- {}\n", entry));
                }
            }
            out
        }
        SitemapReport::Unavailable { url, reason } => {
            format!("URL: {}\nError: {}", url, reason)
        }
    }
}

fn format_performance(page: &Page) -> String {
    let snapshot = page.snapshot();
    let mut out = format!(
        "Load time: {:.2} seconds\nHTTP status: {}",
        snapshot.load_time_secs(),
        snapshot.status_code
    );
    if snapshot.was_redirected() {
        out.push_str(&format!("\nFinal URL: {}", snapshot.final_url));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::{Finding, Priority};
    use crate::fetch::PageSnapshot;
    use chrono::{Local, TimeZone};
    use std::time::Duration;
    use tempfile::TempDir;
    use url::Url;

    const HTML: &str = r#"<html>
<head>
    <title>Report test page</title>
    <meta name="keywords" content="seo, report">
    <meta property="og:title" content="Report">
</head>
<body>
    <h1>Main heading</h1>
    <h2>Sub heading</h2>
    <a href="/about">About</a>
    <a href="http://[invalid">Broken</a>
    <img src="/logo.png">
    <img src="/photo.jpg" alt="A photo">
    <p>report report report words</p>
</body>
</html>"#;

    fn page() -> Page {
        let mut snapshot = PageSnapshot::from_html(
            Url::parse("https://example.com/").unwrap(),
            HTML,
            Duration::from_millis(1234),
        );
        snapshot.fetched_at = fetched_at();
        Page::parse(snapshot)
    }

    fn checks() -> SiteChecks {
        SiteChecks {
            ssl: SslInfo {
                secure: true,
                expiry: Some(Utc.with_ymd_and_hms(2030, 1, 31, 0, 0, 0).unwrap()),
                issuer: vec![("commonName".to_string(), "Test CA".to_string())],
                error: None,
            },
            robots: RobotsReport::Available {
                url: "https://example.com/robots.txt".to_string(),
                can_fetch: true,
                sitemaps: vec!["https://example.com/sitemap.xml".to_string()],
                crawl_delay: None,
            },
            sitemap: SitemapReport::unavailable(
                "https://example.com/sitemap.xml",
                "HTTP status 404",
            ),
        }
    }

    fn fetched_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_header_dated_with_fetch_time() {
        let page = page();
        let report = format_report(&page, &checks(), &Suggestions::None);

        assert!(report.starts_with("SEO Analysis Report - 2030-01-01 12:00:00\n"));
        assert!(report.contains("Analyzed URL: https://example.com/\n"));
    }

    #[test]
    fn test_sections_in_order() {
        let page = page();
        let report = format_report(&page, &checks(), &Suggestions::None);
        let rule = "=".repeat(RULE_WIDTH);

        let mut last = 0;
        for title in SECTION_TITLES {
            let marker = format!("\n{}\n{}\n{}\n", rule, title, rule);
            let position = report[last..]
                .find(&marker)
                .unwrap_or_else(|| panic!("section {} missing or out of order", title));
            last += position + marker.len();
        }
    }

    #[test]
    fn test_section_contents() {
        let page = page();
        let report = format_report(&page, &checks(), &Suggestions::None);

        assert!(report.contains("Report test page"));
        assert!(report.contains("seo, report"));
        assert!(report.contains("Number of h1: 1\nHeading texts:\n- Main heading\n"));
        assert!(report.contains("Number of h3: 0\n"));
        assert!(report.contains("Internal links: 1\nExternal links: 0\nBroken links: 1\n"));
        assert!(report.contains("- http://[invalid\n"));
        assert!(report.contains("Total images: 2\n"));
        assert!(report.contains("Source: /logo.png\nAlt: No alternative text\n"));
        assert!(report.contains("Source: /photo.jpg\nAlt: A photo\n"));
        assert!(report.contains("report: "));
        assert!(report.contains("Viewport meta tag: missing"));
        assert!(report.contains("og:title: Report"));
        assert!(report.contains("No schema.org data found"));
        assert!(report.contains("Load time: 1.23 seconds\nHTTP status: 200"));
    }

    #[test]
    fn test_missing_values_render_not_found() {
        let page = page();
        let report = format_report(&page, &checks(), &Suggestions::None);
        let rule = "=".repeat(RULE_WIDTH);

        let description = format!("\n{}\nMETA DESCRIPTION\n{}\nNot found\n", rule, rule);
        assert!(report.contains(&description));
        let canonical = format!("\n{}\nCANONICAL URL\n{}\nNot found\n", rule, rule);
        assert!(report.contains(&canonical));
    }

    #[test]
    fn test_probe_sections() {
        let page = page();
        let report = format_report(&page, &checks(), &Suggestions::None);

        assert!(report.contains("Secure: yes\n"));
        assert!(report.contains("Expires: 2030-01-31 00:00:00 UTC"));
        // 2030-01-01 12:00 local to 2030-01-31 00:00 UTC
        assert!(report.contains("(29 days left)") || report.contains("(30 days left)"));
        assert!(report.contains("  commonName: Test CA\n"));
        assert!(report.contains("Crawlable by *: yes\n"));
        assert!(report.contains("- https://example.com/sitemap.xml\n"));
        assert!(report.contains("URL: https://example.com/sitemap.xml\nError: HTTP status 404"));
    }

    #[test]
    fn test_insecure_ssl_section() {
        let section = format_ssl(&SslInfo::insecure("handshake failed"), Utc::now());
        assert_eq!(section, "Secure: no\nError: handshake failed\n");
    }

    #[test]
    fn test_no_suggestions_is_explicit() {
        assert_eq!(
            format_suggestions(&Suggestions::None),
            "No improvement suggestions were found."
        );
    }

    #[test]
    fn test_format_findings() {
        let suggestions = Suggestions::Found(vec![
            Finding::new(Priority::Critical, "Missing title", "No title.", "Add one."),
            Finding::new(Priority::Minor, "Small thing", "Minor problem.", "Tweak it."),
        ]);
        let text = format_suggestions(&suggestions);
        let dashes = "-".repeat(RULE_WIDTH);

        assert!(text.starts_with("SEO IMPROVEMENT SUGGESTIONS\n"));
        assert!(text.contains(&format!(
            "🔴 CRITICAL - Missing title\nProblem: No title.\nSolution: Add one.\n{}\n",
            dashes
        )));
        assert!(text.contains("🟢 MINOR - Small thing\n"));
        assert!(text.find("CRITICAL").unwrap() < text.find("MINOR").unwrap());
    }

    #[test]
    fn test_write_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        let page = page();

        let suggestions = write_report(&path, &page, &checks()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("SEO Analysis Report - "));
        assert!(written.contains("IMPROVEMENT SUGGESTIONS"));
        // Broken link and missing description are both critical
        assert!(suggestions.count(Priority::Critical) >= 2);
        for finding in suggestions.findings() {
            assert!(written.contains(&finding.title));
        }
    }

    #[test]
    fn test_write_report_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("report.txt");
        let page = page();

        let result = write_report(&path, &page, &checks());
        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}
