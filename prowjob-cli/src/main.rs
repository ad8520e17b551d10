//! Prowjob CLI
//!
//! Command-line interface for inspecting, validating and converting CI job records.

mod commands;
mod config;
mod input;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use prowjob_core::Format;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prowjob")]
#[command(about = "CI job record inspector", long_about = None)]
struct Cli {
    /// Input format (json or yaml); detected from the file extension when omitted
    #[arg(long, global = true, env = "PROWJOB_FORMAT")]
    format: Option<Format>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prowjob_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        format: cli.format,
        color: !cli.no_color,
    };
    config.apply();

    handle_command(cli.command, &config).await
}
