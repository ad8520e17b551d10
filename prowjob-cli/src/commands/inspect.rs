//! Job display handlers
//!
//! Handles the read-only views of a job record: full details,
//! rendered refs and completion status.

use anyhow::Result;
use colored::*;
use prowjob_core::{ProwJob, ProwJobSpec, ProwJobState, ProwJobStatus, Refs, labels};

use crate::config::Config;
use crate::input::load_job;
use crate::types::InputSource;

/// Load and display a single job
pub async fn inspect_job(source: &InputSource, config: &Config) -> Result<()> {
    let job = load_job(source, config).await?;

    print_job_details(&job);

    Ok(())
}

/// Load a job and print its rendered refs
pub async fn show_refs(source: &InputSource, config: &Config) -> Result<()> {
    let job = load_job(source, config).await?;

    match &job.spec.refs {
        Some(refs) => println!("{}", refs),
        None => println!("{}", "Job has no refs.".yellow()),
    }

    Ok(())
}

/// Load a job and print its state and completion
pub async fn show_status(source: &InputSource, config: &Config) -> Result<()> {
    let job = load_job(source, config).await?;

    println!("State:    {}", colorize_state(job.status.state));
    println!("Complete: {}", yes_no(job.is_complete()));

    Ok(())
}

/// Print detailed job information
fn print_job_details(job: &ProwJob) {
    println!("{}", "Job Details:".bold());
    if !job.metadata.name.is_empty() {
        println!("  Name:        {}", job.metadata.name.cyan());
    }
    if !job.metadata.namespace.is_empty() {
        println!("  Namespace:   {}", job.metadata.namespace);
    }
    if !job.kind.is_empty() || !job.api_version.is_empty() {
        println!(
            "  Kind:        {} {}",
            job.kind,
            job.api_version.dimmed()
        );
    }

    print_spec(&job.spec);
    print_status(&job.status);
    print_prow_labels(job);

    if !job.spec.run_after_success.is_empty() {
        println!("\n{}", "Run After Success:".bold());
        for (depth, spec) in job.spec.follow_ups() {
            println!("{}{} {}", "  ".repeat(depth), "▸".cyan(), describe_spec(spec));
        }
    }
}

fn print_spec(spec: &ProwJobSpec) {
    println!("\n{}", "Spec:".bold());
    println!("  Job:         {}", spec.job.cyan());
    println!("  Type:        {}", display_or_unset(spec.job_type));
    println!("  Agent:       {}", display_or_unset(spec.agent));
    if !spec.context.is_empty() {
        println!("  Context:     {}", spec.context);
    }
    println!("  Report:      {}", yes_no(spec.report));
    println!(
        "  Concurrency: {}",
        describe_max_concurrency(spec.max_concurrency)
    );
    if !spec.rerun_command.is_empty() {
        println!("  Rerun:       {}", spec.rerun_command.dimmed());
    }
    if let Some(refs) = &spec.refs {
        print_refs(refs);
    }
    if !spec.pod_spec.is_null() {
        println!("  Pod Spec:    {}", "present".dimmed());
    }
}

fn print_refs(refs: &Refs) {
    if !refs.org.is_empty() || !refs.repo.is_empty() {
        println!("  Repository:  {}/{}", refs.org, refs.repo);
    }
    println!("  Refs:        {}", refs.to_string().cyan());
    for pull in &refs.pulls {
        let author = if pull.author.is_empty() {
            String::new()
        } else {
            format!(" by {}", pull.author)
        };
        println!(
            "    #{}{} {}",
            pull.number,
            author,
            pull.sha.dimmed()
        );
    }
}

fn print_status(status: &ProwJobStatus) {
    println!("\n{}", "Status:".bold());
    println!("  State:       {}", colorize_state(status.state));
    println!("  Complete:    {}", yes_no(status.is_complete()));

    if let Some(started) = status.start_time {
        println!("  Started:     {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(completed) = status.completion_time {
        println!("  Completed:   {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(duration) = status.duration() {
        println!("  Duration:    {}", format_duration(duration));
    }

    if !status.description.is_empty() {
        println!("  Description: {}", status.description);
    }
    if !status.url.is_empty() {
        println!("  URL:         {}", status.url.underline());
    }
    if !status.pod_name.is_empty() {
        println!("  Pod:         {}", status.pod_name.dimmed());
    }
    if !status.build_id.is_empty() {
        println!("  Build ID:    {}", status.build_id.dimmed());
    }
}

/// Print the well-known prow labels and annotations found in metadata
fn print_prow_labels(job: &ProwJob) {
    let found: Vec<(&str, &String)> = labels::ALL
        .iter()
        .filter_map(|key| {
            job.metadata
                .labels
                .get(*key)
                .or_else(|| job.metadata.annotations.get(*key))
                .map(|value| (*key, value))
        })
        .collect();

    if found.is_empty() {
        return;
    }

    println!("\n{}", "Prow Labels:".bold());
    for (key, value) in found {
        println!("  {} = {}", key.cyan(), value);
    }
}

/// One-line summary of a follow-up spec
fn describe_spec(spec: &ProwJobSpec) -> String {
    let name = if spec.job.is_empty() {
        "(unnamed job)"
    } else {
        spec.job.as_str()
    };
    match (spec.job_type, spec.agent) {
        (Some(job_type), Some(agent)) => format!("{} ({}, {})", name, job_type, agent),
        (Some(job_type), None) => format!("{} ({})", name, job_type),
        (None, Some(agent)) => format!("{} ({})", name, agent),
        (None, None) => name.to_string(),
    }
}

fn describe_max_concurrency(max: u64) -> String {
    if max == 0 {
        "unbounded".to_string()
    } else {
        max.to_string()
    }
}

fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds();
    if total < 0 {
        return format!("{}s", total);
    }
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

fn display_or_unset<T: std::fmt::Display>(value: Option<T>) -> ColoredString {
    match value {
        Some(value) => value.to_string().normal(),
        None => "unset".dimmed(),
    }
}

fn yes_no(value: bool) -> ColoredString {
    if value { "✓".green() } else { "✗".red() }
}

/// Colorize job state for display
fn colorize_state(state: Option<ProwJobState>) -> ColoredString {
    let Some(state) = state else {
        return "unset".dimmed();
    };
    match state {
        ProwJobState::Triggered => state.as_str().yellow(),
        ProwJobState::Pending => state.as_str().cyan(),
        ProwJobState::Success => state.as_str().green(),
        ProwJobState::Failure => state.as_str().red(),
        ProwJobState::Aborted => state.as_str().dimmed(),
        ProwJobState::Error => state.as_str().red(),
    }
}
