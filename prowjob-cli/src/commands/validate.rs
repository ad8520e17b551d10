//! Validate command handler

use anyhow::Result;
use colored::*;
use tracing::warn;

use crate::config::Config;
use crate::input::{decode_source, read_source};
use crate::types::InputSource;

/// Decode every input and report which ones fail
///
/// Fails when at least one input cannot be read or decoded.
pub async fn validate_jobs(sources: &[InputSource], config: &Config) -> Result<()> {
    let mut failures = 0;

    for source in sources {
        let text = match read_source(source).await {
            Ok(text) => text,
            Err(err) => {
                failures += 1;
                println!("{} {}: {:#}", "✗".red(), source, err);
                continue;
            }
        };

        match decode_source(&text, source, config) {
            Ok(job) => {
                let name = if job.spec.job.is_empty() {
                    "(unnamed job)".to_string()
                } else {
                    job.spec.job.clone()
                };
                println!("{} {} {}", "✓".green(), source, name.dimmed());
            }
            Err(err) => {
                failures += 1;
                warn!(%source, path = err.path(), "job record failed to decode");
                println!(
                    "{} {}: field {}: {}",
                    "✗".red(),
                    source,
                    err.path().yellow(),
                    err.message()
                );
            }
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{} of {} job record(s) failed validation",
            failures,
            sources.len()
        );
    }

    Ok(())
}
