//! Core library for extracting HDR10 metadata from Dolby Vision FEL sources.
//!
//! Combines the mastering display color primaries reported by MediaInfo with
//! the luminance and light level values from a `dovi_tool` RPU summary, and
//! produces the x265 `--master-display`, MaxCLL and MaxFALL values needed to
//! re-encode the base layer with correct HDR10 metadata.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use feldata_core::config::FelConfigBuilder;
//!
//! let config = FelConfigBuilder::new()
//!     .rpu_input("RPU.bin")
//!     .video_input("movie.mkv")
//!     .dovi_tool("/usr/local/bin/dovi_tool")
//!     .save(true)
//!     .build();
//! config.validate().unwrap();
//!
//! let report = feldata_core::extract_fel_data(&config).unwrap();
//! print!("{}", report);
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod master_display;
pub mod processing;
pub mod reporting;
pub mod rpu_summary;

// Re-exports for public API
pub use config::{FelConfig, FelConfigBuilder, RoundingPolicy};
pub use error::{CoreError, CoreResult};
pub use external::{
    AnalyzerOutput, DoviToolAnalyzer, MediaInfoExecutor, MediaInfoProber, RpuAnalyzer,
};
pub use master_display::{ColorPrimaries, MasterDisplay, MasterDisplayTemplate, MasteringLuminance};
pub use processing::{extract_fel_data, generate_fel_report};
pub use reporting::{Report, ReportTemplate, compose_report};
pub use rpu_summary::{RpuSummary, SummaryPatterns, parse_summary};
