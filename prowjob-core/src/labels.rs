//! Label and annotation names placed on pods created for a job.
//!
//! Exported for the process that creates those pods; the model itself
//! attaches no behavior to them.

/// Label marking a pod as created by the job controller.
///
/// Owner references are not used because pods may live in a different
/// namespace from the job record.
pub const CREATED_BY_PROW: &str = "created-by-prow";

/// Label carrying the job type (presubmit, postsubmit, periodic, batch).
pub const PROW_JOB_TYPE_LABEL: &str = "prow.k8s.io/type";

/// Annotation carrying the job name. Names can exceed label length limits.
pub const PROW_JOB_ANNOTATION: &str = "prow.k8s.io/job";

/// All well-known keys, labels first.
pub const ALL: [&str; 3] = [CREATED_BY_PROW, PROW_JOB_TYPE_LABEL, PROW_JOB_ANNOTATION];
