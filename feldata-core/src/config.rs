//! Configuration structures and constants for the feldata-core library.
//!
//! This module provides the configuration for a single extraction run: the
//! input paths, the external tool locations, the integer conversion policy
//! and the report template.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::reporting::ReportTemplate;

// Default constants

/// Default MediaInfo executable, resolved through `PATH`.
pub const DEFAULT_MEDIAINFO: &str = "mediainfo";

/// Suffix appended to the video file stem for the saved report.
pub const SIDECAR_SUFFIX: &str = "_fel_data.txt";

/// Luminance values are given in nits but x265 expects units of 0.0001 cd/m2.
pub const LUMINANCE_SCALE: f64 = 10000.0;

/// Conversion applied to every float read from dovi_tool or MediaInfo before
/// it is written into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    /// Round towards negative infinity
    #[default]
    Floor,
    /// Round half away from zero
    Round,
}

impl RoundingPolicy {
    /// Converts a float to an integer using this policy.
    ///
    /// Negative and NaN inputs saturate to 0.
    pub fn apply(self, value: f64) -> u64 {
        let converted = match self {
            RoundingPolicy::Floor => value.floor(),
            RoundingPolicy::Round => value.round(),
        };

        converted as u64
    }

    /// Scales a luminance value in nits and converts it.
    pub fn apply_luminance(self, nits: f64) -> u64 {
        self.apply(nits * LUMINANCE_SCALE)
    }
}

/// Main configuration structure for the feldata-core library.
///
/// Created by the consumer of the library (e.g., feldata-cli) and passed to
/// `generate_fel_report`. Only the three input paths are required; use
/// [`FelConfigBuilder`] for everything else.
#[derive(Debug, Clone)]
pub struct FelConfig {
    /// RPU binary analyzed by dovi_tool
    pub rpu_input: PathBuf,

    /// Source video probed with MediaInfo; the sidecar is written beside it
    pub video_input: PathBuf,

    /// dovi_tool executable
    pub dovi_tool: PathBuf,

    /// MediaInfo executable
    pub mediainfo: PathBuf,

    /// Write the report to `<video_stem>_fel_data.txt`
    pub save: bool,

    pub rounding: RoundingPolicy,

    /// Compare the container mastering luminance with the RPU values
    pub luminance_check: bool,

    pub report_template: ReportTemplate,
}

impl FelConfig {
    /// Checks that the RPU, video and dovi_tool paths exist.
    ///
    /// The error message names the command-line option for the first missing
    /// path, matching what the CLI prints.
    pub fn validate(&self) -> CoreResult<()> {
        check_exists(&self.rpu_input, "'-r/--rpu-input' is required (RPU.bin)")?;
        check_exists(&self.video_input, "'-i/--input' is required (video.ext)")?;
        check_exists(&self.dovi_tool, "'-d/--dovi-tool' is required")?;
        Ok(())
    }
}

fn check_exists(path: &Path, message: &str) -> CoreResult<()> {
    if path.as_os_str().is_empty() || !path.exists() {
        log::debug!("Input path does not exist: {}", path.display());
        return Err(CoreError::InputNotFound(message.to_string()));
    }
    Ok(())
}

/// Builder for creating FelConfig instances.
///
/// # Examples
///
/// ```rust
/// use feldata_core::config::{FelConfigBuilder, RoundingPolicy};
///
/// let config = FelConfigBuilder::new()
///     .rpu_input("RPU.bin")
///     .video_input("movie.mkv")
///     .dovi_tool("/usr/local/bin/dovi_tool")
///     .rounding(RoundingPolicy::Round)
///     .save(true)
///     .build();
///
/// assert!(config.luminance_check);
/// ```
#[derive(Debug, Clone)]
pub struct FelConfigBuilder {
    rpu_input: PathBuf,
    video_input: PathBuf,
    dovi_tool: PathBuf,
    mediainfo: PathBuf,
    save: bool,
    rounding: RoundingPolicy,
    luminance_check: bool,
    report_template: Option<ReportTemplate>,
}

impl Default for FelConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FelConfigBuilder {
    pub fn new() -> Self {
        Self {
            rpu_input: PathBuf::new(),
            video_input: PathBuf::new(),
            dovi_tool: PathBuf::new(),
            mediainfo: PathBuf::from(DEFAULT_MEDIAINFO),
            save: false,
            rounding: RoundingPolicy::default(),
            luminance_check: true,
            report_template: None,
        }
    }

    pub fn rpu_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.rpu_input = path.into();
        self
    }

    pub fn video_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.video_input = path.into();
        self
    }

    pub fn dovi_tool(mut self, path: impl Into<PathBuf>) -> Self {
        self.dovi_tool = path.into();
        self
    }

    pub fn mediainfo(mut self, path: impl Into<PathBuf>) -> Self {
        self.mediainfo = path.into();
        self
    }

    pub fn save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    pub fn rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn luminance_check(mut self, enabled: bool) -> Self {
        self.luminance_check = enabled;
        self
    }

    /// Overrides the built-in report template.
    pub fn report_template(mut self, template: ReportTemplate) -> Self {
        self.report_template = Some(template);
        self
    }

    /// Builds the configuration. Without an explicit template the built-in
    /// one matching `luminance_check` is used.
    pub fn build(self) -> FelConfig {
        let report_template = self
            .report_template
            .unwrap_or_else(|| ReportTemplate::builtin(self.luminance_check));

        FelConfig {
            rpu_input: self.rpu_input,
            video_input: self.video_input,
            dovi_tool: self.dovi_tool,
            mediainfo: self.mediainfo,
            save: self.save,
            rounding: self.rounding,
            luminance_check: self.luminance_check,
            report_template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_rounding_policies() {
        assert_eq!(RoundingPolicy::Floor.apply(400.9), 400);
        assert_eq!(RoundingPolicy::Round.apply(400.9), 401);
        assert_eq!(RoundingPolicy::Round.apply(400.5), 401);
        assert_eq!(RoundingPolicy::Floor.apply(-3.0), 0);
    }

    #[test]
    fn test_luminance_scaling() {
        assert_eq!(RoundingPolicy::Floor.apply_luminance(1000.0), 10_000_000);
        assert_eq!(RoundingPolicy::Floor.apply_luminance(0.0), 0);
        assert_eq!(RoundingPolicy::Floor.apply_luminance(0.00499), 49);
        assert_eq!(RoundingPolicy::Round.apply_luminance(0.00499), 50);
    }

    #[test]
    fn test_builder_defaults() {
        let config = FelConfigBuilder::new().build();
        assert_eq!(config.mediainfo, PathBuf::from(DEFAULT_MEDIAINFO));
        assert_eq!(config.rounding, RoundingPolicy::Floor);
        assert!(config.luminance_check);
        assert!(!config.save);
        assert_eq!(config.report_template, ReportTemplate::builtin(true));

        let config = FelConfigBuilder::new().luminance_check(false).build();
        assert_eq!(config.report_template, ReportTemplate::builtin(false));
    }

    #[test]
    fn test_validate_reports_first_missing_input() {
        let dir = tempdir().unwrap();
        let rpu = dir.path().join("RPU.bin");
        let video = dir.path().join("video.mkv");
        fs::write(&rpu, b"rpu").unwrap();

        let config = FelConfigBuilder::new()
            .rpu_input(&rpu)
            .video_input(&video)
            .dovi_tool(dir.path().join("dovi_tool"))
            .build();

        match config.validate() {
            Err(CoreError::InputNotFound(msg)) => {
                assert_eq!(msg, "'-i/--input' is required (video.ext)")
            }
            other => panic!("unexpected result: {:?}", other),
        }

        fs::write(&video, b"video").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "'-d/--dovi-tool' is required");
    }
}
