// ============================================================================
// feldata-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with MediaInfo and dovi_tool
//
// This module encapsulates interactions with the two external programs the
// extraction depends on: MediaInfo, which reports the container's mastering
// display metadata, and dovi_tool, whose RPU summary carries the dynamic
// metadata values. Both are reached through narrow traits so that the
// derivation and parsing logic can be tested without spawning processes.
//
// KEY COMPONENTS:
// - MediaInfoProber: probe a container and return the parsed MediaInfo JSON
// - RpuAnalyzer: run `dovi_tool info -i <rpu> -s` and capture its output
// - Process-backed implementations of both
// - Mocks (behind the `test-mocks` feature)
//
// AI-ASSISTANT-INFO: External tool abstractions for mediainfo/dovi_tool

// ---- Internal crate imports ----
use crate::error::CoreResult;

// ---- Standard library imports ----
use std::path::Path;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the MediaInfo JSON model and the process-backed prober
pub mod mediainfo_executor;

/// Contains the process-backed dovi_tool analyzer
pub mod dovi_tool_executor;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use dovi_tool_executor::DoviToolAnalyzer;
pub use mediainfo_executor::{
    MediaInfoExecutor, MediaInfoMedia, MediaInfoResponse, MediaInfoTrack,
};

// ============================================================================
// TRAITS
// ============================================================================

/// Reads container-level metadata for a media file.
pub trait MediaInfoProber {
    /// Probes `input_path` and returns MediaInfo's description of it.
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfoResponse>;
}

/// Captured result of one analyzer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerOutput {
    /// Process exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl AnalyzerOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs the external RPU analyzer against an RPU file.
pub trait RpuAnalyzer {
    /// Runs the analyzer's summary mode on `rpu_path`, blocking until it exits.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`AnalyzerOutput::exit_code`].
    fn summarize(&self, rpu_path: &Path) -> CoreResult<AnalyzerOutput>;
}
