//! Report composition.
//!
//! Turns the RPU summary and the master-display derivation into the text
//! printed to the user and optionally saved beside the video.

mod report;
mod template;

pub use report::{LUMINANCE_DIFFERENCE_WARNING, Report, compose_report, luminance_comparison};
pub use template::{
    DEFAULT_REPORT_TEMPLATE, REPORT_TEMPLATE_WITHOUT_LUMINANCE, ReportTemplate, TemplateValues,
};
