//! dovi_tool integration for RPU summaries
//!
//! Runs `dovi_tool info -i <rpu> -s` and captures both output streams.

use crate::error::{CoreResult, command_start_error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{AnalyzerOutput, RpuAnalyzer};

/// Analyzes RPU files with a dovi_tool executable.
#[derive(Debug, Clone)]
pub struct DoviToolAnalyzer {
    executable: PathBuf,
}

impl DoviToolAnalyzer {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Arguments passed to dovi_tool for a summary of `rpu_path`.
    pub fn summary_args(rpu_path: &Path) -> Vec<OsString> {
        vec![
            OsString::from("info"),
            OsString::from("-i"),
            rpu_path.as_os_str().to_os_string(),
            OsString::from("-s"),
        ]
    }
}

impl RpuAnalyzer for DoviToolAnalyzer {
    fn summarize(&self, rpu_path: &Path) -> CoreResult<AnalyzerOutput> {
        let mut cmd = Command::new(&self.executable);
        cmd.args(Self::summary_args(rpu_path))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("Running command: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| command_start_error(self.executable.display().to_string(), e))?;

        let result = AnalyzerOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.stderr.trim().is_empty() {
            log::debug!("dovi_tool stderr: {}", result.stderr.trim());
        }

        Ok(result)
    }
}
