// ============================================================================
// feldata-cli/src/cli.rs
// ============================================================================
//
// COMMAND-LINE INTERFACE: Argument Definitions
//
// The three input paths are optional at the clap level so that a missing or
// nonexistent path produces the same one-line message on stdout (see
// `FelConfig::validate`) instead of clap's usage error.
//
// AI-ASSISTANT-INFO: CLI argument definitions using clap

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

use feldata_core::RoundingPolicy;
use feldata_core::config::DEFAULT_MEDIAINFO;

#[derive(Parser, Debug)]
#[command(
    name = "feldata",
    version,
    disable_version_flag = true,
    about = "Extracts HDR10 master-display and light level values for Dolby Vision FEL content",
    long_about = "Combines MediaInfo's mastering display primaries with the RPU summary from \
                  dovi_tool to produce the x265 master-display string, MaxCLL and MaxFALL."
)]
pub struct Cli {
    #[arg(short = 'v', long, action = ArgAction::Version, help = "Print version")]
    pub version: Option<bool>,

    #[arg(
        short,
        long,
        value_name = "RPU.bin",
        help = "Input file (RPU.bin)",
        value_hint = ValueHint::FilePath
    )]
    pub rpu_input: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "video.ext",
        help = "Input file (video.ext)",
        value_hint = ValueHint::FilePath
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short,
        long,
        env = "DOVI_TOOL",
        help = "Path to dovi_tool executable",
        value_hint = ValueHint::ExecutablePath
    )]
    pub dovi_tool: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "If passed will save the results to a text file beside the 'input'"
    )]
    pub save: bool,

    #[arg(
        long,
        env = "MEDIAINFO",
        default_value = DEFAULT_MEDIAINFO,
        help = "Path to mediainfo executable",
        value_hint = ValueHint::ExecutablePath
    )]
    pub mediainfo: PathBuf,

    #[arg(
        long,
        value_enum,
        default_value_t = RoundingArg::Floor,
        help = "How luminance and light level values are converted to integers"
    )]
    pub rounding: RoundingArg,

    #[arg(
        long,
        help = "Don't compare the container's mastering luminance with the RPU values"
    )]
    pub skip_luminance_check: bool,

    #[arg(
        long,
        value_name = "FILE",
        help = "Custom report template",
        long_help = "Custom report template. Supported placeholders: {summary}, {mi_rpu_diff}, \
                     {maximum_cll}, {maximum_fall} and {master_display} (required)",
        value_hint = ValueHint::FilePath
    )]
    pub template: Option<PathBuf>,

    #[arg(long, help = "Enable detailed logging output on stderr")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundingArg {
    Floor,
    Round,
}

impl From<RoundingArg> for RoundingPolicy {
    fn from(arg: RoundingArg) -> RoundingPolicy {
        match arg {
            RoundingArg::Floor => RoundingPolicy::Floor,
            RoundingArg::Round => RoundingPolicy::Round,
        }
    }
}
