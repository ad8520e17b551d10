//! Core domain types
//!
//! These types describe a CI job record: what to run (spec), what happened
//! (status) and which source revisions to build (refs). They are plain
//! values shared by whoever submits, executes or reports on a job.

pub mod job;
pub mod refs;
mod wire;
