//! Configuration module
//!
//! Holds settings resolved from CLI flags and environment variables.

use prowjob_core::Format;

use crate::types::InputSource;

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Explicit input format; `None` means detect per input
    pub format: Option<Format>,

    /// Whether colored output is allowed
    pub color: bool,
}

impl Config {
    /// Resolve the format used to decode a given input
    ///
    /// An explicit format wins. Otherwise files are detected by extension
    /// and stdin is read as JSON.
    pub fn format_for(&self, source: &InputSource) -> Format {
        if let Some(format) = self.format {
            return format;
        }
        match source {
            InputSource::Stdin => Format::Json,
            InputSource::File(path) => Format::from_path(path),
        }
    }

    /// Apply process-wide settings such as the color override
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
