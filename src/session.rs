//! Interactive analysis loop
//!
//! Each iteration asks for a URL and a report filename, runs one complete
//! analysis, and prints where the report went. A failed analysis is printed
//! and the loop moves on; only `q` or end of input stops it.

use crate::config::Config;
use crate::extract::Page;
use crate::fetch::{build_http_client, fetch_page};
use crate::probe::SiteProber;
use crate::report::write_report;
use crate::suggest::{Priority, Suggestions};
use crate::url::{normalize_target_url, report_filename};
use anyhow::Context;
use colored::Colorize;
use reqwest::Client;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use url::Url;

const URL_PROMPT: &str = "Enter the URL to analyze (or 'q' to quit): ";
const FILE_PROMPT: &str = "Output file name (e.g. seo_report.txt): ";

/// Fetches `url` once, probes its site, and writes the report to `path`
///
/// The probes target the final URL after redirects. The page is parsed only
/// once all network work is done.
pub async fn analyze(
    client: &Client,
    prober: &SiteProber,
    url: &Url,
    path: &Path,
) -> crate::Result<Suggestions> {
    tracing::info!("Analyzing {}", url);

    let snapshot = fetch_page(client, url).await?;
    let checks = prober.check_all(&snapshot.final_url).await;
    let page = Page::parse(snapshot);

    Ok(write_report(path, &page, &checks)?)
}

/// The interactive loop over an input and an output stream
pub struct Session<R, W> {
    input: R,
    output: W,
    client: Client,
    prober: SiteProber,
    output_dir: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: &Config, input: R, output: W) -> crate::Result<Self> {
        let client = build_http_client(&config.http)?;
        let prober = SiteProber::new(client.clone(), &config.http)?;

        Ok(Self {
            input,
            output,
            client,
            prober,
            output_dir: config.output.directory.clone(),
        })
    }

    /// Overrides the port of the certificate check
    pub fn with_ssl_port(mut self, port: u16) -> Self {
        self.prober = self.prober.with_ssl_port(port);
        self
    }

    /// Runs until the user quits or input ends
    ///
    /// Returns the number of analyses that produced a report.
    pub async fn run(&mut self) -> crate::Result<usize> {
        writeln!(self.output, "{}\n", "=== SEO Analyzer ===".yellow())?;

        let mut completed = 0;
        loop {
            let Some(raw_url) = self.prompt(URL_PROMPT)? else {
                break;
            };
            if raw_url.eq_ignore_ascii_case("q") {
                break;
            }

            // Both answers are read before either is checked, so a bad URL
            // never shifts the filename into the next URL prompt.
            let Some(raw_name) = self.prompt(FILE_PROMPT)? else {
                break;
            };

            let target = normalize_target_url(&raw_url).and_then(|url| {
                report_filename(&raw_name, &self.output_dir).map(|path| (url, path))
            });
            let (url, path) = match target {
                Ok(target) => target,
                Err(e) => {
                    self.print_error(&e.to_string())?;
                    writeln!(self.output, "\nAnalyze another site?")?;
                    continue;
                }
            };

            writeln!(
                self.output,
                "{}",
                format!("Running SEO analysis for {}...", url).cyan()
            )?;

            let result = analyze(&self.client, &self.prober, &url, &path)
                .await
                .with_context(|| format!("Analysis of {} failed", url));

            match result {
                Ok(suggestions) => {
                    completed += 1;
                    self.print_summary(&path, &suggestions)?;
                }
                Err(e) => {
                    tracing::warn!("{:#}", e);
                    self.print_error(&format!("{:#}", e))?;
                }
            }

            writeln!(self.output, "\nAnalyze another site?")?;
        }

        tracing::info!("Session finished after {} report(s)", completed);
        Ok(completed)
    }

    /// Prints `prompt` and reads one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> crate::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_error(&mut self, message: &str) -> crate::Result<()> {
        writeln!(self.output, "{}", format!("Error: {}", message).red())?;
        Ok(())
    }

    fn print_summary(&mut self, path: &Path, suggestions: &Suggestions) -> crate::Result<()> {
        writeln!(
            self.output,
            "{}",
            format!("Analysis complete! Report saved to {}", path.display()).green()
        )?;

        let counts = Priority::ALL
            .iter()
            .map(|priority| format!("{} {}", suggestions.count(*priority), priority))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.output, "Findings: {}", counts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(input: &str, dir: &Path) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        let mut config = Config::default();
        config.output.directory = dir.to_path_buf();
        Session::new(&config, Cursor::new(input.as_bytes().to_vec()), Vec::new()).unwrap()
    }

    fn output_of<R>(session: &Session<R, Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.output).to_string()
    }

    #[tokio::test]
    async fn test_quit_immediately() {
        let dir = TempDir::new().unwrap();
        let mut session = session("q\n", dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
        let output = output_of(&session);
        assert!(output.contains("=== SEO Analyzer ==="));
        assert!(output.contains(URL_PROMPT));
        assert!(!output.contains(FILE_PROMPT));
    }

    #[tokio::test]
    async fn test_uppercase_q_quits() {
        let dir = TempDir::new().unwrap();
        let mut session = session("Q\nexample.com\n", dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
        assert!(!output_of(&session).contains(FILE_PROMPT));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_loop() {
        let dir = TempDir::new().unwrap();
        let mut session = session("", dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_url_still_reads_filename() {
        let dir = TempDir::new().unwrap();
        let mut session = session("http://\nmyreport\nq\n", dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
        let output = output_of(&session);
        assert!(output.contains("Error: Failed to parse URL"));
        // The filename line belongs to the failed run; `q` then quits
        assert_eq!(output.matches(URL_PROMPT).count(), 2);
        assert_eq!(output.matches(FILE_PROMPT).count(), 1);
        assert!(!output.contains("Running SEO analysis"));
        assert!(!dir.path().join("myreport.txt").exists());
    }

    #[tokio::test]
    async fn test_end_of_input_at_filename_prompt() {
        let dir = TempDir::new().unwrap();
        let mut session = session("http://\n", dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
        assert!(!output_of(&session).contains("Error: "));
    }

    #[tokio::test]
    async fn test_fetch_error_chain_printed_once() {
        let dir = TempDir::new().unwrap();
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let input = format!("http://127.0.0.1:{}/\nreport\nq\n", port);
        let mut session = session(&input, dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
        let output = output_of(&session);
        assert!(output.contains("Error: Analysis of http://127.0.0.1:"));
        assert_eq!(output.matches("Connection failed for").count(), 1);
        assert!(!dir.path().join("report.txt").exists());
    }

    #[tokio::test]
    async fn test_blank_filename_continues() {
        let dir = TempDir::new().unwrap();
        let mut session = session("example.com\n   \nq\n", dir.path());

        assert_eq!(session.run().await.unwrap(), 0);
        let output = output_of(&session);
        assert!(output.contains("Error: Empty input"));
        assert_eq!(output.matches(URL_PROMPT).count(), 2);
    }
}
