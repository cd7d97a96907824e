//! # nnmclub
//!
//! Command-line front end for the tracker search client.
//!
//! ```bash
//! # Search one page, one JSON record per line
//! nnmclub search "Iron Man"
//!
//! # Walk up to five pages, logging in with the configured account
//! nnmclub --config ./nnmclub.toml search "Iron Man" --pages 5
//!
//! # Every page
//! nnmclub search "Iron Man" --pages 0
//!
//! # Check the configured credentials
//! nnmclub --config ./nnmclub.toml login
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nnmclub_core::{
    load_config, load_config_from_env, validate_config, Config, NnmClub, SanitizedConfig,
};

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "nnmclub.toml";

#[derive(Parser)]
#[command(name = "nnmclub", version, about = "Search the nnmclub torrent tracker")]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Falls back to `$NNMCLUB_CONFIG`, then `./nnmclub.toml`, then
    /// built-in defaults with `NNMCLUB_*` environment overrides.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the tracker and print one JSON record per line.
    Search {
        /// Search text.
        query: String,

        /// Result pages to walk; 0 walks all of them. Defaults to `search.max_pages`.
        #[arg(long, short)]
        pages: Option<u32>,
    },

    /// Log in with the configured credentials and report the outcome.
    Login,
}

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Logs go to stderr; stdout carries the records
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var("NNMCLUB_CONFIG").ok().map(PathBuf::from));
    let config = resolve_config(config_path.as_deref(), Path::new(DEFAULT_CONFIG))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Configuration: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    match cli.command {
        Commands::Search { query, pages } => {
            let max_pages = match pages {
                Some(0) => None,
                Some(n) => Some(n),
                None => config.search.page_limit(),
            };
            search(&config, &query, max_pages)
        }
        Commands::Login => {
            if config.credentials.is_none() {
                anyhow::bail!("No [credentials] section configured");
            }
            NnmClub::from_config(&config).context("Login failed")?;
            info!("Login successful");
            Ok(())
        }
    }
}

/// Pick the configuration source.
///
/// An explicit path must exist; the default path is used only if present.
fn resolve_config(explicit: Option<&Path>, default_path: &Path) -> Result<Config> {
    match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None if default_path.exists() => {
            info!("Loading configuration from {:?}", default_path);
            load_config(default_path)
                .with_context(|| format!("Failed to load config from {:?}", default_path))
        }
        None => load_config_from_env().context("Failed to load config from environment"),
    }
}

fn search(config: &Config, query: &str, max_pages: Option<u32>) -> Result<()> {
    let client = NnmClub::from_config(config).context("Failed to create client")?;
    let mut results = client
        .search(query, max_pages)
        .with_context(|| format!("Search for {:?} failed", query))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    for record in results.by_ref() {
        let record = record.with_context(|| format!("Search for {:?} failed", query))?;
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
        count += 1;
    }
    out.flush()?;

    info!(
        query = %query,
        records = count,
        pages = results.pages_parsed(),
        "Search complete"
    );
    Ok(())
}
