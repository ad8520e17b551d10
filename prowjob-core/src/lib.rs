//! Prowjob Core
//!
//! Data model for CI job records exchanged between a job submitter and a
//! job executor.
//!
//! This crate contains:
//! - Domain types: the job record, its spec, its status and source refs
//! - Labels: well-known label and annotation names used on job pods
//! - Codec: the JSON/YAML serialization boundary

pub mod codec;
pub mod domain;
pub mod error;
pub mod labels;

pub use codec::Format;
pub use domain::job::{
    ObjectMeta, PodSpec, ProwJob, ProwJobAgent, ProwJobSpec, ProwJobState, ProwJobStatus,
    ProwJobType,
};
pub use domain::refs::{Pull, Refs};
pub use error::{DecodeError, EncodeError};
