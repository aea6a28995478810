// ============================================================================
// feldata-cli/src/main.rs
// ============================================================================
//
// MAIN ENTRY POINT: feldata CLI Application
//
// Parses the command line, resolves it into a `FelConfig`, runs the
// extraction pipeline and prints the report. Failures print a single line to
// stdout and exit with status 1.
//
// AI-ASSISTANT-INFO: Entry point for the feldata CLI application

mod cli;
mod error;
mod logging;

use clap::Parser;
use std::io::{self, Write};
use std::process;

use feldata_core::{CoreError, CoreResult, FelConfig, FelConfigBuilder, ReportTemplate};

use crate::cli::Cli;
use crate::error::{FAILURE_EXIT_CODE, failure_message};
use crate::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            log::debug!("Run failed: {:?}", e);
            println!("{}", failure_message(&e));
            process::exit(FAILURE_EXIT_CODE);
        }
    }
}

fn run(cli: Cli) -> CoreResult<()> {
    let config = resolve_config(cli)?;
    let report = feldata_core::extract_fel_data(&config)?;

    // The report already ends with a newline when it comes from a built-in
    // template, so stdout matches the saved sidecar byte for byte.
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", report)?;
    stdout.flush()?;
    Ok(())
}

/// Builds and validates the configuration from the parsed arguments.
fn resolve_config(cli: Cli) -> CoreResult<FelConfig> {
    let mut config = FelConfigBuilder::new()
        .rpu_input(cli.rpu_input.unwrap_or_default())
        .video_input(cli.input.unwrap_or_default())
        .dovi_tool(cli.dovi_tool.unwrap_or_default())
        .mediainfo(cli.mediainfo)
        .save(cli.save)
        .rounding(cli.rounding.into())
        .luminance_check(!cli.skip_luminance_check)
        .build();
    config.validate()?;

    if let Some(path) = cli.template {
        if !path.is_file() {
            return Err(CoreError::InputNotFound(
                "'--template' file does not exist".to_string(),
            ));
        }
        log::debug!("Using report template from {}", path.display());
        config.report_template = ReportTemplate::from_file(&path)?;
    }

    Ok(config)
}
