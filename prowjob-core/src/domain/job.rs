//! Job domain types

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::ser::{self, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};

use super::refs::Refs;
use super::wire;

/// Opaque execution-environment descriptor, passed through untouched.
///
/// `Value::Null` is the unset value.
pub type PodSpec = serde_json::Value;

/// Job record
///
/// Identity envelope plus what to run (`spec`) and what happened (`status`).
/// The envelope is owned by the external orchestrator and is not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProwJob {
    #[serde(
        rename = "apiVersion",
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub api_version: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub kind: String,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub spec: ProwJobSpec,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub status: ProwJobStatus,
}

impl ProwJob {
    /// Whether the job has finished, judged only by its completion time.
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}

/// Metadata keys backed by a typed field of [`ObjectMeta`].
const TYPED_META_KEYS: [&str; 4] = ["name", "namespace", "labels", "annotations"];

/// Object metadata
///
/// Known keys are typed for convenience; every other key is preserved as-is
/// in `extra`. Encoding fails if `extra` repeats a typed key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    #[serde(deserialize_with = "wire::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub namespace: String,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub annotations: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Serialize for ObjectMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(key) = self
            .extra
            .keys()
            .find(|key| TYPED_META_KEYS.contains(&key.as_str()))
        {
            return Err(ser::Error::custom(format!(
                "metadata key `{key}` belongs to a typed field and cannot appear in extra"
            )));
        }

        let mut map = serializer.serialize_map(None)?;
        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
        }
        if !self.namespace.is_empty() {
            map.serialize_entry("namespace", &self.namespace)?;
        }
        if !self.labels.is_empty() {
            map.serialize_entry("labels", &self.labels)?;
        }
        if !self.annotations.is_empty() {
            map.serialize_entry("annotations", &self.annotations)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Job request
///
/// `run_after_success` forms a tree: each child spec is owned by exactly one parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProwJobSpec {
    #[serde(
        rename = "type",
        with = "wire::optional_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_type: Option<ProwJobType>,
    #[serde(with = "wire::optional_enum", skip_serializing_if = "Option::is_none")]
    pub agent: Option<ProwJobAgent>,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub job: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<Refs>,

    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "wire::is_zero"
    )]
    pub report: bool,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub context: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub rerun_command: String,
    /// Cap on concurrently running instances; 0 means unbounded.
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "wire::is_zero"
    )]
    pub max_concurrency: u64,

    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub pod_spec: PodSpec,

    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub run_after_success: Vec<ProwJobSpec>,
}

impl ProwJobSpec {
    /// Walk every spec triggered after this one, depth first, in stored order.
    ///
    /// Yields `(depth, spec)` where direct children have depth 1.
    pub fn follow_ups(&self) -> FollowUps<'_> {
        FollowUps {
            stack: self.run_after_success.iter().rev().map(|s| (1, s)).collect(),
        }
    }
}

/// Iterator returned by [`ProwJobSpec::follow_ups`].
#[derive(Debug, Clone)]
pub struct FollowUps<'a> {
    stack: Vec<(usize, &'a ProwJobSpec)>,
}

impl<'a> Iterator for FollowUps<'a> {
    type Item = (usize, &'a ProwJobSpec);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, spec) = self.stack.pop()?;
        self.stack
            .extend(spec.run_after_success.iter().rev().map(|s| (depth + 1, s)));
        Some((depth, spec))
    }
}

/// Job run record, replaced as a whole by the executor
///
/// A timestamp equal to `0001-01-01T00:00:00Z` counts as unset everywhere:
/// it is not encoded, it does not make the job complete and it compares
/// equal to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProwJobStatus {
    #[serde(
        rename = "startTime",
        with = "wire::optional_time",
        skip_serializing_if = "wire::is_unset_time"
    )]
    pub start_time: Option<DateTime<Utc>>,
    /// `None` until the job has finished.
    #[serde(
        rename = "completionTime",
        with = "wire::optional_time",
        skip_serializing_if = "wire::is_unset_time"
    )]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(with = "wire::optional_enum", skip_serializing_if = "Option::is_none")]
    pub state: Option<ProwJobState>,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub pod_name: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub build_id: String,
}

impl ProwJobStatus {
    /// Complete means the completion time is set, whatever `state` says.
    pub fn is_complete(&self) -> bool {
        wire::effective_time(self.completion_time).is_some()
    }

    /// Wall time between start and completion, when both are known.
    pub fn duration(&self) -> Option<Duration> {
        match (
            wire::effective_time(self.start_time),
            wire::effective_time(self.completion_time),
        ) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None,
        }
    }
}

impl PartialEq for ProwJobStatus {
    fn eq(&self, other: &Self) -> bool {
        wire::effective_time(self.start_time) == wire::effective_time(other.start_time)
            && wire::effective_time(self.completion_time)
                == wire::effective_time(other.completion_time)
            && self.state == other.state
            && self.description == other.description
            && self.url == other.url
            && self.pod_name == other.pod_name
            && self.build_id == other.build_id
    }
}

/// Trigger semantics of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProwJobType {
    Presubmit,
    Postsubmit,
    Periodic,
    Batch,
}

impl ProwJobType {
    pub const ALL: [ProwJobType; 4] = [
        ProwJobType::Presubmit,
        ProwJobType::Postsubmit,
        ProwJobType::Periodic,
        ProwJobType::Batch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProwJobType::Presubmit => "presubmit",
            ProwJobType::Postsubmit => "postsubmit",
            ProwJobType::Periodic => "periodic",
            ProwJobType::Batch => "batch",
        }
    }
}

impl fmt::Display for ProwJobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend that executes the job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProwJobAgent {
    Kubernetes,
    Jenkins,
}

impl ProwJobAgent {
    pub const ALL: [ProwJobAgent; 2] = [ProwJobAgent::Kubernetes, ProwJobAgent::Jenkins];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProwJobAgent::Kubernetes => "kubernetes",
            ProwJobAgent::Jenkins => "jenkins",
        }
    }
}

impl fmt::Display for ProwJobAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job execution state
///
/// Transitions are enforced by the executor, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProwJobState {
    Triggered,
    Pending,
    Success,
    Failure,
    Aborted,
    Error,
}

impl ProwJobState {
    pub const ALL: [ProwJobState; 6] = [
        ProwJobState::Triggered,
        ProwJobState::Pending,
        ProwJobState::Success,
        ProwJobState::Failure,
        ProwJobState::Aborted,
        ProwJobState::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProwJobState::Triggered => "triggered",
            ProwJobState::Pending => "pending",
            ProwJobState::Success => "success",
            ProwJobState::Failure => "failure",
            ProwJobState::Aborted => "aborted",
            ProwJobState::Error => "error",
        }
    }
}

impl fmt::Display for ProwJobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
