//! seo-scope main entry point
//!
//! This is the command-line interface for the seo-scope page analyzer.

use clap::Parser;
use seo_scope::config::load_optional_config;
use seo_scope::session::Session;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// seo-scope: a single-page SEO inspector
///
/// Prompts for a URL and a report filename, fetches the page once, checks
/// the site's certificate, robots.txt and sitemap, and writes a plain-text
/// report with prioritized improvement suggestions.
#[derive(Parser, Debug)]
#[command(name = "seo-scope")]
#[command(version = "1.0.0")]
#[command(about = "A single-page SEO inspector", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_optional_config(cli.config.as_deref()) {
        Ok(config) => {
            if let Some(path) = &cli.config {
                tracing::info!("Configuration loaded from: {}", path.display());
            }
            config
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let stdin = io::stdin();
    let mut session = Session::new(&config, stdin.lock(), io::stdout())?;
    session.run().await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so they never interleave with the prompts on stdout.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_scope=warn,error"),
            1 => EnvFilter::new("seo_scope=info,warn"),
            2 => EnvFilter::new("seo_scope=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
