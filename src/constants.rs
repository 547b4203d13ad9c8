//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "freqsort";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default chunk duration in seconds.
pub const DEFAULT_CHUNK_DURATION: f64 = 1.0;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "Results";

/// Relative tolerance for "is an integer" checks on duration ratios.
///
/// A ratio `r` counts as integral when `|r - round(r)| <= max(1, |r|) * RATIO_TOLERANCE`.
pub const RATIO_TOLERANCE: f64 = 1e-9;

/// Guard added before flooring `duration * rate` so that values like
/// `0.29 * 100.0 = 28.999999999999996` resolve to the intended sample count.
pub const WINDOW_LENGTH_EPSILON: f64 = 1e-9;

/// Chunk duration suggestion search parameters.
pub mod suggest {
    /// Candidates per second (a 0.01 s step).
    pub const STEPS_PER_SEC: f64 = 100.0;

    /// Search radius around the chosen duration, in seconds.
    pub const RADIUS_SECS: f64 = 0.05;

    /// Smallest candidate ever suggested, in seconds.
    pub const MIN_CANDIDATE_SECS: f64 = 0.01;

    /// Maximum number of suggestions returned.
    pub const MAX_SUGGESTIONS: usize = 5;
}

/// ffmpeg defaults.
pub mod ffmpeg {
    /// Binary name looked up on `PATH`.
    pub const BINARY: &str = "ffmpeg";

    /// Video codec used when re-encoding segments.
    pub const VIDEO_CODEC: &str = "libx264";

    /// Audio codec used when re-encoding segments.
    pub const AUDIO_CODEC: &str = "aac";

    /// PCM codec for the extracted audio track.
    pub const EXTRACT_AUDIO_CODEC: &str = "pcm_s16le";
}

/// Plot defaults.
pub mod plot {
    /// Default plot width in pixels.
    pub const WIDTH: u32 = 1000;

    /// Default plot height in pixels.
    pub const HEIGHT: u32 = 600;

    /// Plot title.
    pub const TITLE: &str = "Dominant Frequency of Each Chunk After Sorting";

    /// X axis label.
    pub const X_LABEL: &str = "Chunk Index";

    /// Y axis label.
    pub const Y_LABEL: &str = "Frequency (Hz)";
}

/// File names written to the output directory.
pub mod output_files {
    /// Extracted audio track.
    pub const EXTRACTED_AUDIO: &str = "extracted_audio.wav";

    /// Reassembled, sorted video.
    pub const SORTED_VIDEO: &str = "sorted_video.mp4";

    /// Frequency plot.
    pub const FREQUENCY_PLOT: &str = "sorted_frequencies.svg";

    /// Subdirectory holding per-chunk video segments.
    pub const SEGMENTS_DIR: &str = "segments";

    /// ffmpeg concat demuxer list file.
    pub const CONCAT_LIST: &str = "concat_list.txt";

    /// Segment file extension.
    pub const SEGMENT_EXTENSION: &str = "mp4";

    /// Stem shared by the chunk report files.
    pub const REPORT_STEM: &str = "chunk_frequencies";
}

/// Report file extensions by format.
pub mod report_extensions {
    /// CSV report extension.
    pub const CSV: &str = ".csv";

    /// JSON report extension.
    pub const JSON: &str = ".json";
}
