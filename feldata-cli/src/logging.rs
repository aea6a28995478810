// ============================================================================
// feldata-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the feldata CLI
//
// Log records go to stderr so stdout only ever carries the report or the
// one-line failure message. The default level is `warn`; `--verbose` raises
// it to `debug`. RUST_LOG, when set, takes precedence over both.
//
// AI-ASSISTANT-INFO: Logging initialization for the CLI

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::io::Write;

/// Returns the default filter for the given verbosity.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initializes the global logger. Safe to call once per process.
pub fn init_logging(verbose: bool) {
    let default_filter = default_level(verbose).to_string().to_lowercase();

    Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(Target::Stderr)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{style}{:<5}{style:#} {}",
                record.level(),
                record.args()
            )
        })
        .init();
}
