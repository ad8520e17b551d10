//! Loading job records from files or stdin

use anyhow::{Context, Result};
use prowjob_core::{DecodeError, ProwJob, codec};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::config::Config;
use crate::types::InputSource;

/// Read the raw text of an input
pub async fn read_source(source: &InputSource) -> Result<String> {
    match source.path() {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", source)),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Decode already-read text, keeping the decode error for callers that report paths
pub fn decode_source(
    text: &str,
    source: &InputSource,
    config: &Config,
) -> std::result::Result<ProwJob, DecodeError> {
    let format = config.format_for(source);
    debug!(%source, %format, bytes = text.len(), "decoding job record");
    codec::decode(text, format)
}

/// Read and decode a job record
pub async fn load_job(source: &InputSource, config: &Config) -> Result<ProwJob> {
    let text = read_source(source).await?;
    let job = decode_source(&text, source, config)
        .with_context(|| format!("Invalid job record in {}", source))?;
    debug!(%source, job = %job.spec.job, "loaded job record");
    Ok(job)
}
