//! Convert command handler

use anyhow::{Context, Result};
use prowjob_core::{Format, codec};
use tracing::info;

use crate::config::Config;
use crate::input::load_job;
use crate::types::InputSource;

/// Decode a job record and print it re-encoded in `to`
pub async fn convert_job(source: &InputSource, to: Format, config: &Config) -> Result<()> {
    let job = load_job(source, config).await?;
    let encoded = codec::encode(&job, to).context("Failed to encode job record")?;

    info!(%source, %to, "converted job record");
    print!("{}", encoded);
    if !encoded.ends_with('\n') {
        println!();
    }

    Ok(())
}
