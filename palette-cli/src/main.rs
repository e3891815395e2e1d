//! Palette CLI: terminal front end for the Palette command palette.
//!
//! Provides one-shot search, an interactive loop, and listing subcommands.

mod commands;
mod host;
mod repl;

use clap::Parser;
use palette_core::{PageContext, Palette, load_config};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::host::ConsoleHost;

/// Palette: go to anything from the terminal
#[derive(Parser, Debug)]
#[command(name = "palette", version, about, long_about = None)]
struct Cli {
    /// Query to search (starts interactive mode if omitted)
    query: Option<String>,

    /// Interface locale, e.g. en-US, zh-Hans, ja-JP
    #[arg(short, long)]
    locale: Option<String>,

    /// Current page path, e.g. /apps or /app/<id>/workflow
    #[arg(short, long, default_value = "/apps")]
    page: String,

    /// JSON catalog fixture to search instead of the console API
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Open links in the system browser
    #[arg(long)]
    open_links: bool,

    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List slash commands
    Commands {
        /// Include commands unavailable on the current page
        #[arg(short, long)]
        all: bool,
    },
    /// List search scopes
    Scopes,
    /// Run a direct command, e.g. `palette run docs`
    Run {
        /// Command name or alias
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "palette", "palette")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "palette.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config = load_config(Some(&workspace), None)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Apply CLI overrides
    if let Some(locale) = &cli.locale {
        config.ui.locale = locale.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog.fixture = Some(catalog.clone());
    }

    let page = Arc::new(PageContext::new(cli.page.clone()));
    let host = Arc::new(ConsoleHost::new(page.clone(), cli.open_links));
    let palette = Arc::new(Palette::from_config(config, host, page)?);
    info!(workspace = %workspace.display(), page = %cli.page, "Palette started");

    if let Some(command) = cli.command {
        return commands::handle_command(command, &palette, cli.json).await;
    }

    match cli.query {
        Some(query) => repl::run_single_query(&palette, &query, cli.json).await,
        None => repl::run_interactive(palette, cli.json).await,
    }
}
