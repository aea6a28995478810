// feldata-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::*;
use crate::error::{CoreError, CoreResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

/// Mock implementation of MediaInfoProber returning canned responses per path.
#[derive(Clone, Default)]
pub struct MockMediaInfoProber {
    responses: Rc<RefCell<HashMap<PathBuf, MediaInfoResponse>>>,
    received_calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockMediaInfoProber {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add the response returned when `input_path` is probed.
    pub fn expect_response(&self, input_path: &Path, response: MediaInfoResponse) {
        self.responses
            .borrow_mut()
            .insert(input_path.to_path_buf(), response);
    }

    /// Add a single video track response for `input_path`.
    pub fn expect_video_track(
        &self,
        input_path: &Path,
        color_primaries: Option<&str>,
        luminance: Option<&str>,
    ) {
        let track = MediaInfoTrack {
            track_type: "Video".to_string(),
            mastering_display_color_primaries: color_primaries.map(str::to_string),
            mastering_display_luminance: luminance.map(str::to_string),
        };
        let general = MediaInfoTrack {
            track_type: "General".to_string(),
            ..Default::default()
        };

        self.expect_response(
            input_path,
            MediaInfoResponse {
                media: Some(MediaInfoMedia {
                    track: vec![general, track],
                }),
            },
        );
    }

    pub fn get_received_calls(&self) -> Vec<PathBuf> {
        self.received_calls.borrow().clone()
    }
}

impl MediaInfoProber for MockMediaInfoProber {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfoResponse> {
        log::info!(
            "MockMediaInfoProber::probe called for: {}",
            input_path.display()
        );
        self.received_calls
            .borrow_mut()
            .push(input_path.to_path_buf());

        match self.responses.borrow().get(input_path) {
            Some(response) => Ok(response.clone()),
            None => {
                log::error!(
                    "MockMediaInfoProber: No expectation set for path: {}",
                    input_path.display()
                );
                Err(CoreError::JsonParse(format!(
                    "MockMediaInfoProber: No expectation set for path {}",
                    input_path.display()
                )))
            }
        }
    }
}

/// Mock implementation of RpuAnalyzer returning a fixed output.
#[derive(Clone, Default)]
pub struct MockRpuAnalyzer {
    output: Rc<RefCell<AnalyzerOutput>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockRpuAnalyzer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Analyzer exiting with 0 and printing `stdout`.
    pub fn with_stdout(stdout: &str) -> Self {
        let mock = Self::new();
        mock.set_output(AnalyzerOutput {
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        });
        mock
    }

    /// Analyzer exiting with `exit_code` and printing `stderr`.
    pub fn with_exit_error(exit_code: i32, stderr: &str) -> Self {
        let mock = Self::new();
        mock.set_output(AnalyzerOutput {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        });
        mock
    }

    pub fn set_output(&self, output: AnalyzerOutput) {
        *self.output.borrow_mut() = output;
    }

    /// Argument lists the analyzer was invoked with.
    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl RpuAnalyzer for MockRpuAnalyzer {
    fn summarize(&self, rpu_path: &Path) -> CoreResult<AnalyzerOutput> {
        let args: Vec<String> = DoviToolAnalyzer::summary_args(rpu_path)
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        log::info!("MockRpuAnalyzer: received {:?}", args);
        self.received_calls.borrow_mut().push(args);

        Ok(self.output.borrow().clone())
    }
}
