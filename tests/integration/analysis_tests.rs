//! Integration tests for a full analysis
//!
//! These tests use wiremock to serve a page, robots.txt and sitemap.xml and
//! run the fetch, probe and report cycle end-to-end. The certificate check
//! is pointed at the plain-HTTP mock server, so it always reports insecure.

use seo_scope::config::Config;
use seo_scope::fetch::build_http_client;
use seo_scope::probe::SiteProber;
use seo_scope::report::SECTION_TITLES;
use seo_scope::session::{analyze, Session};
use seo_scope::{Priority, ScopeError};
use std::io::Cursor;
use std::net::TcpListener;
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Integration test page</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="shortcut icon" href="/favicon.ico">
    <script type="application/ld+json">{"@context": "https://schema.org", "@type": "Organization"}</script>
    <script type="application/ld+json">{ not json</script>
</head>
<body>
    <h1>Welcome</h1>
    <h1>Welcome again</h1>
    <a href="/about">About</a>
    <a href="https://other.example.org/">Elsewhere</a>
    <img src="/a.png">
    <p>Short page content.</p>
</body>
</html>"#;

fn sitemap_xml(base: &str, entries: usize) -> String {
    let urls: String = (0..entries)
        .map(|i| format!("<url><loc>{}/page{}</loc></url>", base, i))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        urls
    )
}

async fn mount_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE_HTML)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, resource: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(resource))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn server_port(server: &MockServer) -> u16 {
    Url::parse(&server.uri()).unwrap().port().unwrap()
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn run_analysis(
    server: &MockServer,
    target: &Url,
    report: &Path,
) -> seo_scope::Result<seo_scope::Suggestions> {
    let config = Config::default();
    let client = build_http_client(&config.http).unwrap();
    let prober = SiteProber::new(client.clone(), &config.http)
        .unwrap()
        .with_ssl_port(server_port(server));
    analyze(&client, &prober, target, report).await
}

#[tokio::test]
async fn test_full_analysis_report() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /private\nCrawl-delay: 2\n\nSitemap: {}/sitemap.xml\n",
            base
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_xml(&base, 12)))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let target = Url::parse(&format!("{}/", base)).unwrap();

    let suggestions = run_analysis(&server, &target, &report_path).await.unwrap();
    let report = std::fs::read_to_string(&report_path).unwrap();

    // Header and section order
    assert!(report.starts_with("SEO Analysis Report - "));
    assert!(report.contains(&format!("Analyzed URL: {}/\n", base)));
    let mut last = 0;
    for title in SECTION_TITLES {
        let marker = format!("\n{}\n", title);
        let position = report[last..]
            .find(&marker)
            .unwrap_or_else(|| panic!("section {} missing or out of order", title));
        last += position + marker.len();
    }

    // Page signals
    assert!(report.contains("Integration test page"));
    assert!(report.contains("Number of h1: 2"));
    assert!(report.contains("Internal links: 1\nExternal links: 1\nBroken links: 0"));
    assert!(report.contains("Alt: No alternative text"));
    assert!(report.contains("/favicon.ico"));
    assert!(report.contains("Blocks found: 1"));
    assert!(report.contains("Viewport meta tag: present"));
    assert!(report.contains("HTTP status: 200"));

    // Probes
    assert!(report.contains("Secure: no"));
    assert!(report.contains("Crawlable by *: yes"));
    assert!(report.contains("Crawl delay: 2 seconds"));
    assert!(report.contains(&format!("- {}/sitemap.xml", base)));
    assert!(report.contains("URLs found: 12"));
    assert!(report.contains("First 10 URLs:"));
    assert!(report.contains(&format!("{}/page9\n", base)));
    assert!(!report.contains(&format!("{}/page10\n", base)));

    // Suggestions
    let titles: Vec<&str> = suggestions
        .findings()
        .iter()
        .map(|f| f.title.as_str())
        .collect();
    assert!(titles.contains(&"HTTPS not enabled"));
    assert!(titles.contains(&"Multiple H1 headings"));
    assert!(titles.contains(&"Missing meta description"));
    assert!(titles.contains(&"Images without alt text"));
    assert!(titles.contains(&"Thin content"));
    assert!(!titles.contains(&"Missing viewport meta tag"));
    assert!(report.contains("🔴 CRITICAL - HTTPS not enabled"));

    let ranks: Vec<u8> = suggestions
        .findings()
        .iter()
        .map(|f| f.priority.rank())
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_forbidden_robots_disallows_page() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    mount_status(&server, "/robots.txt", 403).await;
    mount_status(&server, "/sitemap.xml", 404).await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let target = Url::parse(&server.uri()).unwrap();

    run_analysis(&server, &target, &report_path).await.unwrap();
    let report = std::fs::read_to_string(&report_path).unwrap();

    assert!(report.contains("Crawlable by *: no"));
}

#[tokio::test]
async fn test_failed_probes_do_not_abort_report() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    mount_status(&server, "/robots.txt", 500).await;
    mount_status(&server, "/sitemap.xml", 404).await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let target = Url::parse(&server.uri()).unwrap();

    run_analysis(&server, &target, &report_path).await.unwrap();
    let report = std::fs::read_to_string(&report_path).unwrap();

    assert!(report.contains("Error: HTTP 500"));
    assert!(report.contains("Error: HTTP 404"));
    assert!(report.contains("IMPROVEMENT SUGGESTIONS"));
}

#[tokio::test]
async fn test_probes_follow_final_url() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/"))
        .mount(&server)
        .await;
    mount_page(&server).await;
    mount_status(&server, "/robots.txt", 404).await;
    mount_status(&server, "/sitemap.xml", 404).await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let target = Url::parse(&format!("{}/old", base)).unwrap();

    run_analysis(&server, &target, &report_path).await.unwrap();
    let report = std::fs::read_to_string(&report_path).unwrap();

    assert!(report.contains(&format!("Analyzed URL: {}/old", base)));
    assert!(report.contains(&format!("Final URL: {}/", base)));
    // 404 on robots.txt means everything is allowed
    assert!(report.contains("Crawlable by *: yes"));
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let target = Url::parse(&format!("http://127.0.0.1:{}/", closed_port())).unwrap();

    let result = run_analysis(&server, &target, &report_path).await;

    assert!(matches!(result, Err(ScopeError::Fetch(_))));
    assert!(!report_path.exists());
}

#[tokio::test]
async fn test_session_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server).await;
    mount_status(&server, "/robots.txt", 404).await;
    mount_status(&server, "/sitemap.xml", 404).await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.directory = temp_dir.path().to_path_buf();

    let dead = format!("http://127.0.0.1:{}/", closed_port());
    let input = format!("{}\nfirst\n{}/\nsecond\nq\n", dead, base);
    let mut session = Session::new(&config, Cursor::new(input.into_bytes()), Vec::new())
        .unwrap()
        .with_ssl_port(server_port(&server));

    let completed = session.run().await.unwrap();

    assert_eq!(completed, 1);
    assert!(!temp_dir.path().join("first.txt").exists());
    let report = std::fs::read_to_string(temp_dir.path().join("second.txt")).unwrap();
    assert!(report.contains("Integration test page"));
}

#[tokio::test]
async fn test_priority_counts_match_findings() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    mount_status(&server, "/robots.txt", 404).await;
    mount_status(&server, "/sitemap.xml", 404).await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let target = Url::parse(&server.uri()).unwrap();

    let suggestions = run_analysis(&server, &target, &report_path).await.unwrap();

    let total: usize = Priority::ALL.iter().map(|p| suggestions.count(*p)).sum();
    assert_eq!(total, suggestions.findings().len());
}
