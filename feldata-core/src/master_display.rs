//! Master-display derivation from container metadata
//!
//! x265's `--master-display` option takes the mastering display chromaticity
//! coordinates and luminance range. The coordinates depend only on the color
//! primaries MediaInfo reports for the first video track, so each supported
//! primaries value maps to a fixed template whose luminance placeholders are
//! filled in later from the RPU.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RoundingPolicy;
use crate::error::{CoreError, CoreResult};
use crate::external::{MediaInfoProber, MediaInfoResponse};

/// Placeholder for the maximum luminance in a [`MasterDisplayTemplate`].
pub const MAXIMUM_LUMA_PLACEHOLDER: &str = "{maximum_luma}";
/// Placeholder for the minimum luminance in a [`MasterDisplayTemplate`].
pub const MINIMUM_LUMA_PLACEHOLDER: &str = "{minimum_luma}";

const DISPLAY_P3_TEMPLATE: &str =
    "G(13250,34500)B(7500,3000)R(34000,16000)WP(15635,16450)L({maximum_luma},{minimum_luma})";
const DCI_P3_TEMPLATE: &str =
    "G(13250,34500)B(7500,3000)R(34000,16000)WP(15700,17550)L({maximum_luma},{minimum_luma})";
const BT2020_TEMPLATE: &str =
    "G(8500,39850)B(6550,2300)R(35400,14600)WP(15635,16450)L({maximum_luma},{minimum_luma})";

static LUMINANCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"min:\s(?P<min>.+?)\scd/m2,\smax:\s(?P<max>.+?)\scd/m2")
        .expect("luminance pattern is valid")
});

/// Mastering display color primaries with a known master-display preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPrimaries {
    DisplayP3,
    DciP3,
    Bt2020,
}

impl ColorPrimaries {
    /// Matches a MediaInfo primaries description, case-insensitively.
    ///
    /// "display p3" is checked before "dci p3", then "bt.2020".
    pub fn detect(description: &str) -> CoreResult<Self> {
        let lowered = description.to_lowercase();

        if lowered.contains("display p3") {
            Ok(ColorPrimaries::DisplayP3)
        } else if lowered.contains("dci p3") {
            Ok(ColorPrimaries::DciP3)
        } else if lowered.contains("bt.2020") {
            Ok(ColorPrimaries::Bt2020)
        } else {
            Err(CoreError::UnsupportedPrimaries(description.to_string()))
        }
    }

    pub fn template(self) -> MasterDisplayTemplate {
        let template = match self {
            ColorPrimaries::DisplayP3 => DISPLAY_P3_TEMPLATE,
            ColorPrimaries::DciP3 => DCI_P3_TEMPLATE,
            ColorPrimaries::Bt2020 => BT2020_TEMPLATE,
        };
        MasterDisplayTemplate(template.to_string())
    }
}

/// A master-display string with unfilled luminance placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterDisplayTemplate(String);

impl MasterDisplayTemplate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fills in the luminance placeholders, in units of 0.0001 cd/m2.
    pub fn render(&self, maximum_luma: u64, minimum_luma: u64) -> String {
        self.0
            .replace(MAXIMUM_LUMA_PLACEHOLDER, &maximum_luma.to_string())
            .replace(MINIMUM_LUMA_PLACEHOLDER, &minimum_luma.to_string())
    }
}

impl fmt::Display for MasterDisplayTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Container mastering luminance, in units of 0.0001 cd/m2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasteringLuminance {
    pub minimum: u64,
    pub maximum: u64,
}

impl MasteringLuminance {
    /// Parses a MediaInfo value such as `min: 0.0050 cd/m2, max: 1000 cd/m2`.
    pub fn parse(value: &str, rounding: RoundingPolicy) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidLuminance(value.to_string());

        let caps = LUMINANCE_RE.captures(value).ok_or_else(invalid)?;
        let minimum: f64 = caps["min"].trim().parse().map_err(|_| invalid())?;
        let maximum: f64 = caps["max"].trim().parse().map_err(|_| invalid())?;

        Ok(MasteringLuminance {
            minimum: rounding.apply_luminance(minimum),
            maximum: rounding.apply_luminance(maximum),
        })
    }
}

/// Result of the derivation: the template for the detected primaries and,
/// when requested, the container's own mastering luminance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterDisplay {
    pub primaries: ColorPrimaries,
    pub template: MasterDisplayTemplate,
    pub luminance: Option<MasteringLuminance>,
}

/// Options for [`detect_master_display`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterDisplayOptions {
    /// Also read the container mastering luminance
    pub with_luminance: bool,
    pub rounding: RoundingPolicy,
}

/// Probes `input` and derives its master-display template.
pub fn detect_master_display<P: MediaInfoProber + ?Sized>(
    prober: &P,
    input: &Path,
    options: MasterDisplayOptions,
) -> CoreResult<MasterDisplay> {
    let media_info = prober.probe(input)?;
    master_display_from_media_info(&media_info, options)
}

/// Derives the master-display template from an already probed file.
pub fn master_display_from_media_info(
    media_info: &MediaInfoResponse,
    options: MasterDisplayOptions,
) -> CoreResult<MasterDisplay> {
    let track = media_info
        .video_tracks()
        .next()
        .ok_or(CoreError::NoVideoTrack)?;

    let primaries_description = track
        .mastering_display_color_primaries
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(CoreError::MissingColorPrimaries)?;

    let luminance = if options.with_luminance {
        let value = track
            .mastering_display_luminance
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(CoreError::MissingLuminance)?;
        Some(MasteringLuminance::parse(value, options.rounding)?)
    } else {
        None
    };

    let primaries = ColorPrimaries::detect(primaries_description)?;
    log::debug!(
        "Mastering display primaries '{}' matched {:?}",
        primaries_description,
        primaries
    );

    Ok(MasterDisplay {
        primaries,
        template: primaries.template(),
        luminance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockMediaInfoProber;
    use crate::external::{MediaInfoMedia, MediaInfoTrack};

    const LUMINANCE: &str = "min: 0.0050 cd/m2, max: 1000 cd/m2";

    fn with_luminance() -> MasterDisplayOptions {
        MasterDisplayOptions {
            with_luminance: true,
            rounding: RoundingPolicy::Floor,
        }
    }

    #[test]
    fn test_primaries_detection() {
        for value in ["Display P3", "display p3", "DISPLAY P3 D65", "Display P3 / BT.2020"] {
            assert_eq!(ColorPrimaries::detect(value).unwrap(), ColorPrimaries::DisplayP3);
        }
        for value in ["DCI P3", "dci p3 (theater)"] {
            assert_eq!(ColorPrimaries::detect(value).unwrap(), ColorPrimaries::DciP3);
        }
        for value in ["BT.2020", "bt.2020", "ITU-R BT.2020"] {
            assert_eq!(ColorPrimaries::detect(value).unwrap(), ColorPrimaries::Bt2020);
        }

        for value in ["BT.709", "DisplayP3", "BT 2020", ""] {
            assert!(matches!(
                ColorPrimaries::detect(value),
                Err(CoreError::UnsupportedPrimaries(_))
            ));
        }
    }

    #[test]
    fn test_templates_are_fixed() {
        assert_eq!(
            ColorPrimaries::DisplayP3.template().as_str(),
            "G(13250,34500)B(7500,3000)R(34000,16000)WP(15635,16450)L({maximum_luma},{minimum_luma})"
        );
        assert_eq!(
            ColorPrimaries::DciP3.template().as_str(),
            "G(13250,34500)B(7500,3000)R(34000,16000)WP(15700,17550)L({maximum_luma},{minimum_luma})"
        );
        assert_eq!(
            ColorPrimaries::Bt2020.template().as_str(),
            "G(8500,39850)B(6550,2300)R(35400,14600)WP(15635,16450)L({maximum_luma},{minimum_luma})"
        );
    }

    #[test]
    fn test_template_render() {
        let rendered = ColorPrimaries::Bt2020.template().render(10_000_000, 50);
        assert_eq!(
            rendered,
            "G(8500,39850)B(6550,2300)R(35400,14600)WP(15635,16450)L(10000000,50)"
        );
    }

    #[test]
    fn test_luminance_parse() {
        let luminance = MasteringLuminance::parse(LUMINANCE, RoundingPolicy::Floor).unwrap();
        assert_eq!(
            luminance,
            MasteringLuminance {
                minimum: 50,
                maximum: 10_000_000
            }
        );

        assert!(matches!(
            MasteringLuminance::parse("1000 nits", RoundingPolicy::Floor),
            Err(CoreError::InvalidLuminance(_))
        ));
        assert!(matches!(
            MasteringLuminance::parse("min: low cd/m2, max: 1000 cd/m2", RoundingPolicy::Floor),
            Err(CoreError::InvalidLuminance(_))
        ));
    }

    #[test]
    fn test_detect_with_mock_prober() {
        let prober = MockMediaInfoProber::new();
        let input = Path::new("/media/movie.mkv");
        prober.expect_video_track(input, Some("Display P3"), Some(LUMINANCE));

        let master = detect_master_display(&prober, input, with_luminance()).unwrap();
        assert_eq!(master.primaries, ColorPrimaries::DisplayP3);
        assert_eq!(
            master.luminance,
            Some(MasteringLuminance {
                minimum: 50,
                maximum: 10_000_000
            })
        );
        assert_eq!(prober.get_received_calls(), vec![input.to_path_buf()]);
    }

    #[test]
    fn test_luminance_is_optional() {
        let prober = MockMediaInfoProber::new();
        let input = Path::new("movie.mp4");
        prober.expect_video_track(input, Some("BT.2020"), None);

        let master =
            detect_master_display(&prober, input, MasterDisplayOptions::default()).unwrap();
        assert_eq!(master.primaries, ColorPrimaries::Bt2020);
        assert_eq!(master.luminance, None);

        let err = detect_master_display(&prober, input, with_luminance()).unwrap_err();
        assert!(matches!(err, CoreError::MissingLuminance));
    }

    #[test]
    fn test_no_video_track() {
        let response = MediaInfoResponse {
            media: Some(MediaInfoMedia {
                track: vec![MediaInfoTrack {
                    track_type: "Audio".to_string(),
                    ..Default::default()
                }],
            }),
        };
        let err = master_display_from_media_info(&response, with_luminance()).unwrap_err();
        assert!(matches!(err, CoreError::NoVideoTrack));

        let err = master_display_from_media_info(&MediaInfoResponse::default(), with_luminance())
            .unwrap_err();
        assert!(matches!(err, CoreError::NoVideoTrack));
    }

    #[test]
    fn test_missing_primaries() {
        let prober = MockMediaInfoProber::new();
        let input = Path::new("sdr.mkv");
        prober.expect_video_track(input, None, Some(LUMINANCE));
        let err = detect_master_display(&prober, input, with_luminance()).unwrap_err();
        assert!(matches!(err, CoreError::MissingColorPrimaries));

        prober.expect_video_track(input, Some("  "), Some(LUMINANCE));
        let err = detect_master_display(&prober, input, with_luminance()).unwrap_err();
        assert!(matches!(err, CoreError::MissingColorPrimaries));
    }

    #[test]
    fn test_unsupported_primaries() {
        let prober = MockMediaInfoProber::new();
        let input = Path::new("bt709.mkv");
        prober.expect_video_track(input, Some("BT.709"), Some(LUMINANCE));

        let err = detect_master_display(&prober, input, with_luminance()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Video doesn't appear to need a master-display string..."
        );
    }
}
