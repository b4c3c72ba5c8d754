//! letterboxd-export main entry point
//!
//! Runs the HTTP API, or performs a single list export from the terminal.

use anyhow::Context;
use clap::{Parser, Subcommand};
use letterboxd_export::api::{serve, AppState};
use letterboxd_export::config::{load_config_with_hash, Config};
use letterboxd_export::crawler::{crawl_list, BrowserClient};
use letterboxd_export::output::encode_csv;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// letterboxd-export: turn a public Letterboxd list into an import CSV
///
/// Follows the list's pagination, collects every film title in list order,
/// and writes a CSV the Letterboxd importer accepts.
#[derive(Parser, Debug)]
#[command(name = "letterboxd-export")]
#[command(version)]
#[command(about = "Export a Letterboxd list as an import CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the scrape and download API
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Crawl one list and print its titles
    Scrape {
        /// List URL or short link
        #[arg(value_name = "URL")]
        url: String,

        /// Write the import CSV to this file instead of printing titles
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { bind } => handle_serve(config, bind).await,
        Command::Scrape { url, output } => handle_scrape(config, &url, output.as_deref()).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("letterboxd_export=info,warn"),
            1 => EnvFilter::new("letterboxd_export=debug,tower_http=debug,info"),
            2 => EnvFilter::new("letterboxd_export=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Runs the HTTP API
async fn handle_serve(mut config: Config, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    tracing::info!(
        "Serving exports for {} (short links: {}, page cap: {})",
        config.site.canonical_prefix,
        config.site.short_link_prefix,
        config.crawl.max_pages
    );

    let state = AppState::new(config).context("Failed to build HTTP client")?;
    serve(Arc::new(state)).await.context("Server failed")?;

    Ok(())
}

/// Crawls a single list from the command line
async fn handle_scrape(config: Config, url: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let client = BrowserClient::new(&config.http).context("Failed to build HTTP client")?;

    let result = crawl_list(&client, &config, url)
        .await
        .with_context(|| format!("Export of {} failed", url))?;

    match output {
        Some(path) => {
            let document = encode_csv(&result.titles)?;
            std::fs::write(path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} titles to {}", result.count, path.display());
        }
        None => {
            for title in &result.titles {
                println!("{}", title);
            }
            tracing::info!("{} titles", result.count);
        }
    }

    Ok(())
}
