//! Report composition and persistence.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SIDECAR_SUFFIX;
use crate::error::CoreResult;
use crate::master_display::{MasterDisplay, MasteringLuminance};
use crate::rpu_summary::RpuSummary;

use super::template::{ReportTemplate, TemplateValues};

/// Line appended to the luminance comparison when MediaInfo and the RPU disagree.
pub const LUMINANCE_DIFFERENCE_WARNING: &str =
    "(detected a difference, be sure to use the 'Generated Values' below)";

/// The rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    text: String,
    master_display: String,
    luminance_differs: bool,
}

impl Report {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The x265 `--master-display` value included in the report.
    pub fn master_display(&self) -> &str {
        &self.master_display
    }

    /// Whether the container luminance was compared and did not match the RPU.
    pub fn luminance_differs(&self) -> bool {
        self.luminance_differs
    }

    /// `<video_stem>_fel_data.txt` in the directory of `video`.
    pub fn sidecar_path(video: &Path) -> PathBuf {
        let stem = video
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        video.with_file_name(format!("{}{}", stem, SIDECAR_SUFFIX))
    }

    /// Writes the report text to `path` as UTF-8, replacing any existing file.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        log::debug!("Writing report to {}", path.display());
        fs::write(path, self.text.as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds the MediaInfo/RPU luminance comparison block.
///
/// Returns the block and whether the two pairs differ.
pub fn luminance_comparison(container: &MasteringLuminance, rpu: &RpuSummary) -> (String, bool) {
    let mut block = format!(
        "MediaInfo: {}/{}\nRPU: {}/{}",
        container.minimum, container.maximum, rpu.minimum_luma, rpu.maximum_luma
    );

    let differs =
        container.minimum != rpu.minimum_luma || container.maximum != rpu.maximum_luma;
    if differs {
        log::warn!(
            "Container mastering luminance {}/{} differs from RPU {}/{}",
            container.minimum,
            container.maximum,
            rpu.minimum_luma,
            rpu.maximum_luma
        );
        block.push('\n');
        block.push_str(LUMINANCE_DIFFERENCE_WARNING);
    }

    (block, differs)
}

/// Merges the RPU summary and the master-display derivation into a report.
pub fn compose_report(
    summary: &RpuSummary,
    master_display: &MasterDisplay,
    template: &ReportTemplate,
) -> Report {
    let master_display_value = master_display
        .template
        .render(summary.maximum_luma, summary.minimum_luma);

    let (mi_rpu_diff, luminance_differs) = match &master_display.luminance {
        Some(container) => luminance_comparison(container, summary),
        None => (String::new(), false),
    };

    let text = template.render(&TemplateValues {
        summary: &summary.full_summary,
        mi_rpu_diff: &mi_rpu_diff,
        maximum_cll: summary.maximum_cll,
        maximum_fall: summary.maximum_fall,
        master_display: &master_display_value,
    });

    Report {
        text,
        master_display: master_display_value,
        luminance_differs,
    }
}
