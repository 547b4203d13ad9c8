//! Configuration type definitions.

use crate::constants::{DEFAULT_CHUNK_DURATION, DEFAULT_OUTPUT_DIR, ffmpeg, plot};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default run settings.
    pub defaults: DefaultsConfig,

    /// Analysis settings.
    pub analysis: AnalysisConfig,

    /// ffmpeg settings.
    pub ffmpeg: FfmpegConfig,

    /// Plot settings.
    pub plot: PlotConfig,
}

/// Default run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Chunk duration in seconds.
    pub chunk_duration: f64,

    /// Directory for all run outputs.
    pub output_dir: PathBuf,

    /// Chunk reports to write.
    pub reports: Vec<ReportFormat>,

    /// Keep per-chunk segment files after reassembly.
    pub keep_segments: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chunk_duration: DEFAULT_CHUNK_DURATION,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            reports: vec![ReportFormat::Csv],
            keep_segments: false,
        }
    }
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Analyze windows in parallel.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// ffmpeg settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegConfig {
    /// ffmpeg executable name or path.
    pub binary: String,

    /// Video codec for re-encoded segments.
    pub video_codec: String,

    /// Audio codec for re-encoded segments.
    pub audio_codec: String,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            binary: ffmpeg::BINARY.to_string(),
            video_codec: ffmpeg::VIDEO_CODEC.to_string(),
            audio_codec: ffmpeg::AUDIO_CODEC.to_string(),
        }
    }
}

/// Plot settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: plot::WIDTH,
            height: plot::HEIGHT,
        }
    }
}

/// Supported chunk report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One row per chunk, CSV.
    Csv,
    /// Run summary plus chunk list, JSON.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}
