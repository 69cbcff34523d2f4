//! `lexfolio`: inspect and edit stored profile pages from the command line.
//!
//! Usage:
//!   lexfolio templates list
//!   lexfolio templates apply template-3 --lawyer avocat-42
//!   lexfolio profile show --lawyer avocat-42 --compact
//!   lexfolio profile add --lawyer avocat-42 testimonials --size wide
//!   lexfolio profile style --lawyer avocat-42 blk-0192 gradient:#667eea:#764ba2 --text light
//!
//! Logs go to stderr so command output on stdout stays pipeable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use lexfolio_builder::BuilderConfig;

mod commands;

use commands::Command;

const DEFAULT_LOG_FILTER: &str = "lexfolio=info";

/// Lexfolio profile builder.
#[derive(Parser, Debug)]
#[command(name = "lexfolio")]
#[command(about = "Edit lawyer profile pages and their templates")]
struct Args {
    /// Config file (RON). Defaults to the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory from the config.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(config: &BuilderConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = BuilderConfig::load_or_default(args.config.as_deref())
        .context("failed to load config")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    init_tracing(&config);
    tracing::debug!(data_dir = %config.data_dir().display(), "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(args.command, &config, &mut out).await
}
