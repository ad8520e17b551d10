//! Serialization boundary for job records
//!
//! Job records travel as JSON or YAML documents. Decoding rejects values the
//! model cannot represent (unknown enum strings, negative counters) and reports
//! the path of the field at fault.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::domain::job::ProwJob;
use crate::error::{DecodeError, EncodeError};

/// Document format of a serialized job record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Guess the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!("unknown format '{other}', expected json or yaml")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

/// Decode a job record in the given format
pub fn decode(input: &str, format: Format) -> Result<ProwJob, DecodeError> {
    match format {
        Format::Json => from_json(input),
        Format::Yaml => from_yaml(input),
    }
}

/// Decode a job record from a JSON document
pub fn from_json(input: &str) -> Result<ProwJob, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_str(input);
    let job = serde_path_to_error::deserialize(&mut deserializer)?;
    deserializer
        .end()
        .map_err(|err| DecodeError::new(".", err.to_string()))?;
    Ok(job)
}

/// Decode a job record from a single YAML document
pub fn from_yaml(input: &str) -> Result<ProwJob, DecodeError> {
    let deserializer = serde_yaml::Deserializer::from_str(input);
    Ok(serde_path_to_error::deserialize(deserializer)?)
}

/// Encode a job record in the given format
pub fn encode(job: &ProwJob, format: Format) -> Result<String, EncodeError> {
    match format {
        Format::Json => to_json(job),
        Format::Yaml => to_yaml(job),
    }
}

/// Encode a job record as pretty-printed JSON
pub fn to_json(job: &ProwJob) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(job)?)
}

/// Encode a job record as YAML
pub fn to_yaml(job: &ProwJob) -> Result<String, EncodeError> {
    Ok(serde_yaml::to_string(job)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{ProwJobAgent, ProwJobSpec, ProwJobState, ProwJobStatus, ProwJobType};
    use crate::domain::refs::{Pull, Refs};
    use crate::labels;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn sample_job() -> ProwJob {
        let mut job = ProwJob {
            api_version: "prow.k8s.io/v1".to_string(),
            kind: "ProwJob".to_string(),
            ..Default::default()
        };
        job.metadata.name = "0c4a8f9e-2f43-11e7-a6b4-0a580a6c0100".to_string();
        job.metadata.namespace = "default".to_string();
        job.metadata
            .labels
            .insert(labels::CREATED_BY_PROW.to_string(), "true".to_string());
        job.metadata
            .annotations
            .insert(labels::PROW_JOB_ANNOTATION.to_string(), "pull-test-infra-bazel".to_string());
        job.metadata
            .extra
            .insert("resourceVersion".to_string(), json!("4021"));

        job.spec = ProwJobSpec {
            job_type: Some(ProwJobType::Presubmit),
            agent: Some(ProwJobAgent::Kubernetes),
            job: "pull-test-infra-bazel".to_string(),
            refs: Some(Refs {
                org: "kubernetes".to_string(),
                repo: "test-infra".to_string(),
                base_ref: "master".to_string(),
                base_sha: "abc123".to_string(),
                pulls: vec![Pull {
                    number: 2460,
                    author: "fejta".to_string(),
                    sha: "def456".to_string(),
                }],
            }),
            report: true,
            context: "pull-test-infra-bazel".to_string(),
            rerun_command: "@k8s-bot bazel test this".to_string(),
            max_concurrency: 3,
            pod_spec: json!({
                "containers": [{ "image": "gcr.io/k8s-testimages/bazelbuild", "args": ["test", "//..."] }]
            }),
            run_after_success: vec![ProwJobSpec {
                job_type: Some(ProwJobType::Presubmit),
                agent: Some(ProwJobAgent::Jenkins),
                job: "pull-test-infra-e2e".to_string(),
                ..Default::default()
            }],
        };

        job.status = ProwJobStatus {
            start_time: Some("2017-05-01T10:00:00Z".parse().unwrap()),
            completion_time: Some("2017-05-01T10:14:07.25Z".parse().unwrap()),
            state: Some(ProwJobState::Success),
            description: "Job succeeded.".to_string(),
            url: "https://prow.example.com/log?job=pull-test-infra-bazel&id=12".to_string(),
            pod_name: "0c4a8f9e-2f43-11e7-a6b4-0a580a6c0100".to_string(),
            build_id: "12".to_string(),
        };
        job
    }

    fn nested_spec(depth: usize) -> ProwJobSpec {
        let mut spec = ProwJobSpec {
            job: format!("job-{depth}"),
            ..Default::default()
        };
        if depth > 0 {
            spec.run_after_success = vec![
                nested_spec(depth - 1),
                ProwJobSpec {
                    job: format!("sibling-{depth}"),
                    ..Default::default()
                },
            ];
        }
        spec
    }

    #[test]
    fn test_json_round_trip() {
        let job = sample_job();
        let encoded = to_json(&job).unwrap();
        assert_eq!(from_json(&encoded).unwrap(), job);
    }

    #[test]
    fn test_yaml_round_trip() {
        let job = sample_job();
        let encoded = to_yaml(&job).unwrap();
        assert_eq!(from_yaml(&encoded).unwrap(), job);
    }

    #[test]
    fn test_round_trip_every_enum_value() {
        let mut job = sample_job();
        for job_type in ProwJobType::ALL {
            for agent in ProwJobAgent::ALL {
                for state in ProwJobState::ALL {
                    job.spec.job_type = Some(job_type);
                    job.spec.agent = Some(agent);
                    job.status.state = Some(state);

                    for format in [Format::Json, Format::Yaml] {
                        let encoded = encode(&job, format).unwrap();
                        let decoded = decode(&encoded, format).unwrap();
                        assert_eq!(decoded, job, "{job_type}/{agent}/{state} as {format}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_deep_run_after_success_round_trip() {
        let mut job = ProwJob::default();
        job.spec = nested_spec(12);

        let decoded = from_json(&to_json(&job).unwrap()).unwrap();
        assert_eq!(decoded, job);
        assert_eq!(decoded.spec.follow_ups().count(), 24);

        let order: Vec<&str> = decoded
            .spec
            .follow_ups()
            .take(3)
            .map(|(_, spec)| spec.job.as_str())
            .collect();
        assert_eq!(order, ["job-11", "job-10", "job-9"]);
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(sample_job()).unwrap();

        assert_eq!(value["apiVersion"], "prow.k8s.io/v1");
        assert_eq!(value["spec"]["type"], "presubmit");
        assert_eq!(value["spec"]["rerun_command"], "@k8s-bot bazel test this");
        assert_eq!(value["spec"]["max_concurrency"], 3);
        assert!(value["spec"]["pod_spec"].is_object());
        assert_eq!(value["spec"]["run_after_success"][0]["agent"], "jenkins");
        assert_eq!(value["spec"]["refs"]["base_ref"], "master");
        assert_eq!(value["status"]["startTime"], "2017-05-01T10:00:00Z");
        assert_eq!(value["status"]["pod_name"], "0c4a8f9e-2f43-11e7-a6b4-0a580a6c0100");
        assert_eq!(value["status"]["build_id"], "12");
        assert_eq!(value["metadata"]["resourceVersion"], "4021");
    }

    #[test]
    fn test_zero_values_are_omitted() {
        let value = serde_json::to_value(ProwJob::default()).unwrap();
        assert_eq!(value, json!({ "metadata": {}, "spec": {}, "status": {} }));
    }

    #[test]
    fn test_missing_fields_decode_to_zero_values() {
        assert_eq!(from_json("{}").unwrap(), ProwJob::default());
        assert_eq!(
            from_json(r#"{"spec": {"refs": {}}, "status": {}}"#).unwrap().spec.refs,
            Some(Refs::default())
        );
    }

    #[test]
    fn test_null_and_empty_enums_decode_to_none() {
        let job = from_json(
            r#"{"spec": {"type": "", "agent": null}, "status": {"state": ""}}"#,
        )
        .unwrap();
        assert_eq!(job.spec.job_type, None);
        assert_eq!(job.spec.agent, None);
        assert_eq!(job.status.state, None);
    }

    #[test]
    fn test_zero_instant_means_not_complete() {
        let job = from_json(
            r#"{"status": {
                "startTime": "2017-05-01T10:00:00Z",
                "completionTime": "0001-01-01T00:00:00Z",
                "state": "pending"
            }}"#,
        )
        .unwrap();

        let start: DateTime<Utc> = "2017-05-01T10:00:00Z".parse().unwrap();
        assert_eq!(job.status.start_time, Some(start));
        assert_eq!(job.status.completion_time, None);
        assert!(!job.is_complete());
    }

    #[test]
    fn test_unknown_state_is_rejected_with_path() {
        let err = from_json(r#"{"status": {"state": "running"}}"#).unwrap_err();
        assert_eq!(err.path(), "status.state");
        assert!(err.message().contains("running"));
    }

    #[test]
    fn test_unknown_agent_in_nested_spec_is_rejected_with_path() {
        let err = from_json(
            r#"{"spec": {"run_after_success": [
                {"job": "ok", "agent": "kubernetes"},
                {"job": "bad", "agent": "docker"}
            ]}}"#,
        )
        .unwrap_err();
        assert_eq!(err.path(), "spec.run_after_success[1].agent");
    }

    #[test]
    fn test_edge_case_round_trips() {
        let zero: DateTime<Utc> = "0001-01-01T00:00:00Z".parse().unwrap();

        let mut zero_instants = ProwJob::default();
        zero_instants.status.start_time = Some(zero);
        zero_instants.status.completion_time = Some(zero);
        zero_instants.status.state = Some(ProwJobState::Pending);

        let mut empty_refs = ProwJob::default();
        empty_refs.spec.refs = Some(Refs::default());

        let mut empty_pod_spec = ProwJob::default();
        empty_pod_spec.spec.pod_spec = json!({});

        let mut null_pod_spec = sample_job();
        null_pod_spec.spec.pod_spec = serde_json::Value::Null;

        let mut wide_numbers = ProwJob::default();
        wide_numbers.spec.max_concurrency = u64::MAX;
        wide_numbers.spec.refs = Some(Refs {
            pulls: vec![
                Pull {
                    number: -1,
                    ..Default::default()
                },
                Pull {
                    number: i64::MAX,
                    sha: "fff".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        let mut nested_extra = ProwJob::default();
        nested_extra.metadata.extra.insert(
            "ownerReferences".to_string(),
            json!([{ "kind": "Deployment", "name": "hook", "controller": true }]),
        );

        let cases = [
            ("default", ProwJob::default()),
            ("zero instants", zero_instants),
            ("empty refs", empty_refs),
            ("empty pod spec", empty_pod_spec),
            ("null pod spec", null_pod_spec),
            ("wide numbers", wide_numbers),
            ("nested extra metadata", nested_extra),
        ];

        for (name, job) in cases {
            for format in [Format::Json, Format::Yaml] {
                let encoded = encode(&job, format).unwrap();
                let decoded = decode(&encoded, format).unwrap();
                assert_eq!(decoded, job, "{name} as {format}");
                assert_eq!(decoded.is_complete(), job.is_complete(), "{name} as {format}");
            }
        }
    }

    #[test]
    fn test_metadata_extra_shadowing_typed_key_fails_to_encode() {
        let mut job = sample_job();
        job.metadata
            .extra
            .insert("name".to_string(), json!("other-name"));

        for format in [Format::Json, Format::Yaml] {
            assert!(encode(&job, format).is_err(), "{format}");
        }
    }

    #[test]
    fn test_null_fields_decode_to_zero_values() {
        let job = from_json(
            r#"{
                "apiVersion": null,
                "metadata": {"name": null, "labels": null, "annotations": null},
                "spec": {
                    "job": null,
                    "report": null,
                    "max_concurrency": null,
                    "refs": null,
                    "pod_spec": null,
                    "run_after_success": null
                },
                "status": {"url": null, "description": null, "completionTime": null}
            }"#,
        )
        .unwrap();
        assert_eq!(job, ProwJob::default());

        let job = from_json(r#"{"metadata": null, "spec": null, "status": null}"#).unwrap();
        assert_eq!(job, ProwJob::default());
    }

    #[test]
    fn test_yaml_null_fields_decode_to_zero_values() {
        let job = from_yaml("spec:
  job:
  report: ~
  run_after_success:
status:
  url: ~
")
            .unwrap();
        assert_eq!(job, ProwJob::default());
    }

    #[test]
    fn test_negative_max_concurrency_is_rejected() {
        let err = from_json(r#"{"spec": {"max_concurrency": -1}}"#).unwrap_err();
        assert_eq!(err.path(), "spec.max_concurrency");
    }

    #[test]
    fn test_bad_pull_number_is_rejected_with_path() {
        let err = from_json(
            r#"{"spec": {"refs": {"pulls": [{"number": 1}, {"number": "two"}]}}}"#,
        )
        .unwrap_err();
        assert_eq!(err.path(), "spec.refs.pulls[1].number");
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let err = from_json(r#"{"kind": "ProwJob"} extra"#).unwrap_err();
        assert_eq!(err.path(), ".");
    }

    #[test]
    fn test_yaml_decode() {
        let job = from_yaml(
            r#"
apiVersion: prow.k8s.io/v1
kind: ProwJob
metadata:
  name: periodic-run
  labels:
    prow.k8s.io/type: periodic
spec:
  type: periodic
  agent: kubernetes
  job: ci-kubernetes-build
  max_concurrency: 1
status:
  startTime: "2017-05-01T10:00:00Z"
  state: triggered
"#,
        )
        .unwrap();

        assert_eq!(job.spec.job_type, Some(ProwJobType::Periodic));
        assert_eq!(job.spec.refs, None);
        assert_eq!(
            job.metadata.labels.get(labels::PROW_JOB_TYPE_LABEL).map(String::as_str),
            Some("periodic")
        );
        assert_eq!(job.status.state, Some(ProwJobState::Triggered));
        assert!(!job.is_complete());
    }

    #[test]
    fn test_yaml_error_has_path() {
        let err = from_yaml("spec:\n  type: nightly\n").unwrap_err();
        assert_eq!(err.path(), "spec.type");
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("job.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("job.YML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("job.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("job")), Format::Json);

        assert_eq!("yaml".parse::<Format>(), Ok(Format::Yaml));
        assert_eq!("JSON".parse::<Format>(), Ok(Format::Json));
        assert!("toml".parse::<Format>().is_err());
    }
}
