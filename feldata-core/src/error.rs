// ============================================================================
// feldata-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for feldata-core
//
// This module defines the error types used throughout the feldata-core library.
// Errors fall into two tiers: expected errors describe a problem with the
// inputs (missing metadata, dovi_tool failures, unparsable summaries) and are
// shown to the user verbatim, while unexpected errors (I/O, malformed probe
// output) are reported with a generic prefix.
//
// AI-ASSISTANT-INFO: Error handling system with expected/unexpected tiers

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::fmt;
use std::io;
use std::process::ExitStatus;

/// Text used in `IncompleteMetadata` for a value the summary did not provide.
pub const NOT_FOUND: &str = "Not Found";

/// Custom error type for the feldata-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Master-display derivation ----
    #[error("Input file doesn't contain any mastering display color primary data")]
    MissingColorPrimaries,

    #[error("Input file is lacking a 'video track'")]
    NoVideoTrack,

    #[error("Video doesn't appear to need a master-display string...")]
    UnsupportedPrimaries(String),

    #[error("MediaInfo is lacking MDL values")]
    MissingLuminance,

    #[error("Unable to parse MediaInfo MDL values from '{0}'")]
    InvalidLuminance(String),

    // ---- RPU summary parsing ----
    #[error("Failed to execute command with dovi_tool (error code: {})", display_exit_code(.exit_code))]
    ToolExecutionFailed { exit_code: Option<i32> },

    #[error("dovi_tool output is missing the 'Summary:' section")]
    MissingSummary,

    #[error("Failed to detect 'RPU mastering display' or 'RPU content light level'")]
    MissingSummarySections,

    #[error(
        "One or more of the values could not be detected from the input file \
         (min-luma: {}, max-luma: {}, max-cll: {}, max-fall: {})",
        .0.minimum_luma, .0.maximum_luma, .0.maximum_cll, .0.maximum_fall
    )]
    IncompleteMetadata(MissingFields),

    // ---- Input resolution ----
    #[error("{0}")]
    InputNotFound(String),

    // ---- Unexpected ----
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("{0} failed with status {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Report template error: {0}")]
    Template(String),
}

impl CoreError {
    /// Whether the error describes a problem with the inputs rather than an
    /// unexpected failure. Expected errors are printed without a prefix.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            CoreError::MissingColorPrimaries
                | CoreError::NoVideoTrack
                | CoreError::UnsupportedPrimaries(_)
                | CoreError::MissingLuminance
                | CoreError::InvalidLuminance(_)
                | CoreError::ToolExecutionFailed { .. }
                | CoreError::MissingSummary
                | CoreError::MissingSummarySections
                | CoreError::IncompleteMetadata(_)
                | CoreError::InputNotFound(_)
        )
    }
}

/// Result type alias for feldata-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

fn display_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

/// One summary field as reported in `IncompleteMetadata`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Found(f64),
    NotFound,
}

impl FieldValue {
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(FieldValue::NotFound, FieldValue::Found)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps a trailing ".0" on whole numbers
            FieldValue::Found(value) => write!(f, "{:?}", value),
            FieldValue::NotFound => f.write_str(NOT_FOUND),
        }
    }
}

/// The raw (unscaled) values pulled from a dovi_tool summary, used to report
/// which fields were missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingFields {
    pub minimum_luma: FieldValue,
    pub maximum_luma: FieldValue,
    pub maximum_cll: FieldValue,
    pub maximum_fall: FieldValue,
}

/// Helper function to create a CommandStart error
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Helper function to create a CommandFailed error
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}
