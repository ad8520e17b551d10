//! Error types for the serialization boundary

use thiserror::Error;

/// A job record could not be decoded
///
/// Carries the path of the offending field, e.g. `spec.refs.pulls[1].number`,
/// or `.` when the problem is with the document as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode job record at `{path}`: {message}")]
pub struct DecodeError {
    path: String,
    message: String,
}

impl DecodeError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Dotted path of the field that failed
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Underlying decoder message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::fmt::Display> From<serde_path_to_error::Error<E>> for DecodeError {
    fn from(err: serde_path_to_error::Error<E>) -> Self {
        Self::new(err.path().to_string(), err.inner().to_string())
    }
}

/// A job record could not be encoded
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
