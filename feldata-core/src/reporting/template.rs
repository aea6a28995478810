//! Report templates
//!
//! A template is plain text with `{name}` placeholders. Substitution is a
//! single pass, so placeholder-like text inside substituted values (the
//! dovi_tool summary, for instance) is left alone.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{CoreError, CoreResult};

/// Template used when the container luminance is compared with the RPU.
pub const DEFAULT_REPORT_TEMPLATE: &str = "\
Dovi_tool Summary:
{summary}

MediaInfo/RPU Luminance:
{mi_rpu_diff}

Generated Values:
Maximum CLL: {maximum_cll}
Maximum FALL: {maximum_fall}
Master Display: {master_display}
";

/// Template used without the luminance comparison.
pub const REPORT_TEMPLATE_WITHOUT_LUMINANCE: &str = "\
Dovi_tool Summary:
{summary}

Generated Values:
Maximum CLL: {maximum_cll}
Maximum FALL: {maximum_fall}
Master Display: {master_display}
";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(summary|mi_rpu_diff|maximum_cll|maximum_fall|master_display)\}")
        .expect("placeholder pattern is valid")
});

/// Values substituted into a [`ReportTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct TemplateValues<'a> {
    pub summary: &'a str,
    pub mi_rpu_diff: &'a str,
    pub maximum_cll: u64,
    pub maximum_fall: u64,
    pub master_display: &'a str,
}

/// Report layout with `{summary}`, `{mi_rpu_diff}`, `{maximum_cll}`,
/// `{maximum_fall}` and `{master_display}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate(String);

impl Default for ReportTemplate {
    fn default() -> Self {
        Self::builtin(true)
    }
}

impl ReportTemplate {
    /// Creates a template, requiring at least the `{master_display}` placeholder.
    pub fn new(text: impl Into<String>) -> CoreResult<Self> {
        let text = text.into();
        if !text.contains("{master_display}") {
            return Err(CoreError::Template(
                "template has no {master_display} placeholder".to_string(),
            ));
        }
        Ok(Self(text))
    }

    /// Reads a template from a UTF-8 file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::new(text).map_err(|e| match e {
            CoreError::Template(msg) => CoreError::Template(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// The built-in template, with or without the luminance section.
    pub fn builtin(with_luminance: bool) -> Self {
        if with_luminance {
            Self(DEFAULT_REPORT_TEMPLATE.to_string())
        } else {
            Self(REPORT_TEMPLATE_WITHOUT_LUMINANCE.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn render(&self, values: &TemplateValues<'_>) -> String {
        PLACEHOLDER_RE
            .replace_all(&self.0, |caps: &Captures<'_>| match &caps[1] {
                "summary" => values.summary.to_string(),
                "mi_rpu_diff" => values.mi_rpu_diff.to_string(),
                "maximum_cll" => values.maximum_cll.to_string(),
                "maximum_fall" => values.maximum_fall.to_string(),
                _ => values.master_display.to_string(),
            })
            .into_owned()
    }
}
