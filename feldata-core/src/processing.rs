//! The single-pass extraction pipeline.
//!
//! RPU analysis runs first so a failing dovi_tool is reported before the
//! container is probed. The report is only saved once every stage succeeded.

use crate::config::FelConfig;
use crate::error::CoreResult;
use crate::external::{DoviToolAnalyzer, MediaInfoExecutor, MediaInfoProber, RpuAnalyzer};
use crate::master_display::{MasterDisplayOptions, detect_master_display};
use crate::reporting::{Report, compose_report};
use crate::rpu_summary::{SummaryOptions, analyze_rpu};

/// Runs the pipeline with explicit tool implementations.
pub fn generate_fel_report<P, A>(
    config: &FelConfig,
    prober: &P,
    analyzer: &A,
) -> CoreResult<Report>
where
    P: MediaInfoProber + ?Sized,
    A: RpuAnalyzer + ?Sized,
{
    log::info!("Analyzing RPU: {}", config.rpu_input.display());
    let summary_options = SummaryOptions {
        rounding: config.rounding,
        ..Default::default()
    };
    let summary = analyze_rpu(analyzer, &config.rpu_input, &summary_options)?;

    log::info!("Probing container: {}", config.video_input.display());
    let master_display = detect_master_display(
        prober,
        &config.video_input,
        MasterDisplayOptions {
            with_luminance: config.luminance_check,
            rounding: config.rounding,
        },
    )?;

    let report = compose_report(&summary, &master_display, &config.report_template);

    if config.save {
        let path = Report::sidecar_path(&config.video_input);
        report.save(&path)?;
        log::info!("Saved report to {}", path.display());
    }

    Ok(report)
}

/// Runs the pipeline with the dovi_tool and MediaInfo executables named in
/// the configuration.
pub fn extract_fel_data(config: &FelConfig) -> CoreResult<Report> {
    let prober = MediaInfoExecutor::new(&config.mediainfo);
    let analyzer = DoviToolAnalyzer::new(&config.dovi_tool);
    generate_fel_report(config, &prober, &analyzer)
}
