//! Source refs domain types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::wire;

/// A base repository position plus pull requests to merge on top of it
///
/// Pulls are merged in stored order, so that order is preserved everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refs {
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub org: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub repo: String,

    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub base_ref: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub base_sha: String,

    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pulls: Vec<Pull>,
}

impl Refs {
    /// Pull request numbers in merge order
    pub fn pull_numbers(&self) -> Vec<i64> {
        self.pulls.iter().map(|pull| pull.number).collect()
    }
}

/// Renders `<base_ref>:<base_sha>` followed by `,<number>:<sha>` per pull.
impl fmt::Display for Refs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.base_ref, self.base_sha)?;
        for pull in &self.pulls {
            write!(f, ",{}:{}", pull.number, pull.sha)?;
        }
        Ok(())
    }
}

/// A pull request to overlay on the base ref
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pull {
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "wire::is_zero"
    )]
    pub number: i64,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub author: String,
    #[serde(
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub sha: String,
}
