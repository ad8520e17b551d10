//! Common types used across CLI modules

use std::path::{Path, PathBuf};

/// Where a job record is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, selected with `-`
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Parse a command-line argument into an input source
    pub fn parse(input: &str) -> Self {
        if input == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(input))
        }
    }

    /// Get the file path, if this is a file
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Stdin => None,
            InputSource::File(path) => Some(path),
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for InputSource {
    fn from(s: &str) -> Self {
        InputSource::parse(s)
    }
}
