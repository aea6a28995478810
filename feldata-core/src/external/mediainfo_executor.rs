//! MediaInfo integration for mastering display metadata
//!
//! This module runs `mediainfo --Output=JSON` and deserializes the fields
//! needed to build an x265 master-display string: the mastering display
//! color primaries and luminance of each video track.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::MediaInfoProber;
use crate::config::DEFAULT_MEDIAINFO;

/// MediaInfo track. Only the fields feldata reads are modelled.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaInfoTrack {
    #[serde(rename = "@type")]
    pub track_type: String,
    #[serde(rename = "MasteringDisplay_ColorPrimaries", default)]
    pub mastering_display_color_primaries: Option<String>,
    #[serde(rename = "MasteringDisplay_Luminance", default)]
    pub mastering_display_luminance: Option<String>,
}

impl MediaInfoTrack {
    pub fn is_video(&self) -> bool {
        self.track_type == "Video"
    }
}

/// MediaInfo media container
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaInfoMedia {
    #[serde(default)]
    pub track: Vec<MediaInfoTrack>,
}

/// Root MediaInfo response structure
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaInfoResponse {
    /// `null` when MediaInfo could not open the file
    pub media: Option<MediaInfoMedia>,
}

impl MediaInfoResponse {
    /// Parses MediaInfo's JSON output.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            CoreError::JsonParse(format!("Failed to parse mediainfo JSON output: {}", e))
        })
    }

    /// Video tracks in container order.
    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaInfoTrack> {
        self.media
            .iter()
            .flat_map(|media| media.track.iter())
            .filter(|track| track.is_video())
    }
}

/// Probes files by running the MediaInfo executable.
#[derive(Debug, Clone)]
pub struct MediaInfoExecutor {
    executable: PathBuf,
}

impl Default for MediaInfoExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIAINFO)
    }
}

impl MediaInfoExecutor {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl MediaInfoProber for MediaInfoExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfoResponse> {
        log::debug!(
            "Running {} for mastering display metadata on: {}",
            self.executable.display(),
            input_path.display()
        );

        let tool = self.executable.display().to_string();
        let output = Command::new(&self.executable)
            .arg("--Output=JSON")
            .arg(input_path)
            .output()
            .map_err(|e| command_start_error(tool.clone(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed_error(tool, output.status, stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        MediaInfoResponse::from_json(&stdout).map_err(|e| {
            log::error!("Unreadable mediainfo output for {}", input_path.display());
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "creatingLibrary": {"name": "MediaLib", "version": "24.01"},
        "media": {
            "@ref": "movie.mkv",
            "track": [
                {"@type": "General", "Format": "Matroska"},
                {
                    "@type": "Video",
                    "Format": "HEVC",
                    "HDR_Format": "Dolby Vision / SMPTE ST 2086",
                    "MasteringDisplay_ColorPrimaries": "Display P3",
                    "MasteringDisplay_Luminance": "min: 0.0050 cd/m2, max: 1000 cd/m2",
                    "MaxCLL": "1000 cd/m2",
                    "MaxFALL": "400 cd/m2"
                },
                {"@type": "Audio", "Format": "E-AC-3", "Channels": "6"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_mediainfo_json() {
        let response = MediaInfoResponse::from_json(SAMPLE).unwrap();
        let video: Vec<_> = response.video_tracks().collect();

        assert_eq!(video.len(), 1);
        assert_eq!(
            video[0].mastering_display_color_primaries.as_deref(),
            Some("Display P3")
        );
        assert_eq!(
            video[0].mastering_display_luminance.as_deref(),
            Some("min: 0.0050 cd/m2, max: 1000 cd/m2")
        );
    }

    #[test]
    fn test_null_media_has_no_video_tracks() {
        let response = MediaInfoResponse::from_json(r#"{"media": null}"#).unwrap();
        assert_eq!(response.video_tracks().count(), 0);
    }

    #[test]
    fn test_invalid_json() {
        let err = MediaInfoResponse::from_json("not json").unwrap_err();
        assert!(matches!(err, CoreError::JsonParse(_)));
    }

    #[test]
    fn test_missing_executable() {
        let prober = MediaInfoExecutor::new("/nonexistent/feldata/mediainfo");
        let err = prober.probe(Path::new("movie.mkv")).unwrap_err();
        assert!(matches!(err, CoreError::CommandStart(..)));
        assert!(!err.is_expected());
    }
}
