//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod convert;
mod inspect;
mod validate;

use anyhow::Result;
use clap::Subcommand;
use prowjob_core::Format;

use crate::config::Config;
use crate::types::InputSource;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show job details
    Inspect {
        /// Path to a job record, or `-` for stdin
        input: String,
    },
    /// Print the rendered source refs of a job
    Refs {
        /// Path to a job record, or `-` for stdin
        input: String,
    },
    /// Print the state of a job and whether it has completed
    Status {
        /// Path to a job record, or `-` for stdin
        input: String,
    },
    /// Check that job records decode
    Validate {
        /// Paths to job records, `-` for stdin
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Re-encode a job record in another format
    Convert {
        /// Path to a job record, or `-` for stdin
        input: String,

        /// Output format (json or yaml)
        #[arg(long)]
        to: Format,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Inspect { input } => {
            inspect::inspect_job(&InputSource::parse(&input), config).await
        }
        Commands::Refs { input } => inspect::show_refs(&InputSource::parse(&input), config).await,
        Commands::Status { input } => {
            inspect::show_status(&InputSource::parse(&input), config).await
        }
        Commands::Validate { inputs } => {
            let sources: Vec<InputSource> = inputs.iter().map(|i| InputSource::parse(i)).collect();
            validate::validate_jobs(&sources, config).await
        }
        Commands::Convert { input, to } => {
            convert::convert_job(&InputSource::parse(&input), to, config).await
        }
    }
}
