//! dovi_tool RPU summary parsing
//!
//! `dovi_tool info -i RPU.bin -s` prints a human-readable summary. Two of its
//! lines carry the values needed for HDR10 static metadata:
//!
//! ```text
//! Summary:
//!   Frames: 259
//!   Profile: 7 (FEL)
//!   RPU mastering display: 0.0050/1000 nits
//!   RPU content light level (L1): MaxCLL: 1000.00 nits, MaxFALL: 400.00 nits
//! ```
//!
//! The patterns used to pull the values out live in [`SummaryPatterns`] so
//! they can be swapped without touching callers.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RoundingPolicy;
use crate::error::{CoreError, CoreResult, FieldValue, MissingFields};
use crate::external::RpuAnalyzer;

/// Marker preceding the summary section in dovi_tool's output.
pub const SUMMARY_MARKER: &str = "Summary:\n";
/// Substring identifying the mastering display line.
pub const MASTERING_DISPLAY_MARKER: &str = "RPU mastering display";
/// Substring identifying the content light level line.
pub const CONTENT_LIGHT_LEVEL_MARKER: &str = "RPU content light level";

static DEFAULT_PATTERNS: Lazy<SummaryPatterns> = Lazy::new(|| {
    SummaryPatterns::new(
        r"display:\s(?P<min>.+?)/(?P<max>.+?)\snits",
        r"MaxCLL:\s(?P<cll>.+?)\snits,\sMaxFALL:\s(?P<fall>.+?)\snits",
    )
    .expect("default summary patterns are valid")
});

/// Regular expressions extracting the four summary values.
///
/// The luma pattern must define the named groups `min` and `max`, the light
/// level pattern `cll` and `fall`.
#[derive(Debug, Clone)]
pub struct SummaryPatterns {
    luma: Regex,
    light_level: Regex,
}

impl SummaryPatterns {
    pub fn new(luma: &str, light_level: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            luma: Regex::new(luma)?,
            light_level: Regex::new(light_level)?,
        })
    }

    /// Luma (mastering display) pair from the mastering display line.
    fn luma(&self, line: &str) -> (Option<f64>, Option<f64>) {
        capture_pair(&self.luma, line, "min", "max")
    }

    /// MaxCLL / MaxFALL pair from the content light level line.
    fn light_level(&self, line: &str) -> (Option<f64>, Option<f64>) {
        capture_pair(&self.light_level, line, "cll", "fall")
    }
}

impl Default for SummaryPatterns {
    fn default() -> Self {
        DEFAULT_PATTERNS.clone()
    }
}

fn capture_pair(re: &Regex, line: &str, first: &str, second: &str) -> (Option<f64>, Option<f64>) {
    let Some(caps) = re.captures(line) else {
        return (None, None);
    };

    let number = |name: &str| {
        caps.name(name)
            .and_then(|m| m.as_str().trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
    };

    (number(first), number(second))
}

/// Values parsed from a dovi_tool summary.
///
/// Luma values are in units of 0.0001 cd/m2, light levels in cd/m2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpuSummary {
    pub minimum_luma: u64,
    pub maximum_luma: u64,
    pub maximum_cll: u64,
    pub maximum_fall: u64,
    /// Every summary line, trimmed, in order
    pub full_summary: String,
}

/// Options for [`analyze_rpu`].
#[derive(Debug, Clone, Default)]
pub struct SummaryOptions {
    pub patterns: SummaryPatterns,
    pub rounding: RoundingPolicy,
}

/// Runs the analyzer on `rpu_path` and parses its summary.
///
/// Output of a failed run is never parsed.
pub fn analyze_rpu<A: RpuAnalyzer + ?Sized>(
    analyzer: &A,
    rpu_path: &Path,
    options: &SummaryOptions,
) -> CoreResult<RpuSummary> {
    let output = analyzer.summarize(rpu_path)?;

    if !output.success() {
        log::error!(
            "dovi_tool exited with {:?}: {}",
            output.exit_code,
            output.stderr.trim()
        );
        return Err(CoreError::ToolExecutionFailed {
            exit_code: output.exit_code,
        });
    }

    parse_summary(&output.stdout, &options.patterns, options.rounding)
}

/// Parses dovi_tool's summary output.
pub fn parse_summary(
    stdout: &str,
    patterns: &SummaryPatterns,
    rounding: RoundingPolicy,
) -> CoreResult<RpuSummary> {
    let (_, section) = stdout
        .split_once(SUMMARY_MARKER)
        .ok_or(CoreError::MissingSummary)?;

    let mut lines = Vec::new();
    let mut mastering_display = None;
    let mut content_light_level = None;

    for line in section.trim().lines().map(str::trim) {
        lines.push(line);

        if line.contains(MASTERING_DISPLAY_MARKER) {
            mastering_display = Some(line);
        } else if line.contains(CONTENT_LIGHT_LEVEL_MARKER) {
            content_light_level = Some(line);
        }
    }

    let (Some(mastering_display), Some(content_light_level)) =
        (mastering_display, content_light_level)
    else {
        return Err(CoreError::MissingSummarySections);
    };

    let (minimum_luma, maximum_luma) = patterns.luma(mastering_display);
    let (maximum_cll, maximum_fall) = patterns.light_level(content_light_level);

    let (Some(min), Some(max), Some(cll), Some(fall)) =
        (minimum_luma, maximum_luma, maximum_cll, maximum_fall)
    else {
        return Err(CoreError::IncompleteMetadata(MissingFields {
            minimum_luma: FieldValue::from_option(minimum_luma),
            maximum_luma: FieldValue::from_option(maximum_luma),
            maximum_cll: FieldValue::from_option(maximum_cll),
            maximum_fall: FieldValue::from_option(maximum_fall),
        }));
    };

    log::debug!(
        "RPU summary values: luma {}/{} nits, MaxCLL {}, MaxFALL {}",
        min,
        max,
        cll,
        fall
    );

    Ok(RpuSummary {
        minimum_luma: rounding.apply_luminance(min),
        maximum_luma: rounding.apply_luminance(max),
        maximum_cll: rounding.apply(cll),
        maximum_fall: rounding.apply(fall),
        full_summary: lines.join("\n").trim().to_string(),
    })
}
