//! Error types for freqsort.

use crate::analysis::ChunkSuggestion;

/// Result type alias for freqsort operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for freqsort.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Chunk duration does not evenly divide the audio duration.
    #[error(
        "chunk duration {chunk_duration}s does not evenly divide the total duration {total_duration}s"
    )]
    InvalidChunkDuration {
        /// Requested chunk duration in seconds.
        chunk_duration: f64,
        /// Total audio duration in seconds.
        total_duration: f64,
        /// Nearby valid durations, closest first. May be empty.
        suggestions: Vec<ChunkSuggestion>,
    },

    /// Extracted audio is not available yet.
    #[error("extracted audio not available at '{path}' (extract audio first)")]
    SourceNotReady {
        /// Expected path of the extracted audio.
        path: std::path::PathBuf,
    },

    /// Chunk duration is shorter than one sample.
    #[error("chunk duration {chunk_duration}s yields no samples at {sample_rate} Hz")]
    DegenerateWindow {
        /// Requested chunk duration in seconds.
        chunk_duration: f64,
        /// Sample rate in Hz.
        sample_rate: u32,
    },

    /// Audio is shorter than a single chunk.
    #[error("audio is shorter than one {chunk_duration}s chunk")]
    NoChunks {
        /// Requested chunk duration in seconds.
        chunk_duration: f64,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// FFT computation failed.
    #[error("spectral analysis failed: {reason}")]
    Spectrum {
        /// Description of the failure.
        reason: String,
    },

    /// Index sequence is not a permutation of the items it reorders.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation {
        /// Description of the defect.
        reason: String,
    },

    /// Parallel sequences that must be reordered together differ in length.
    #[error("cannot reorder {what}: expected {expected} items, got {actual}")]
    SequenceLengthMismatch {
        /// Which sequence was mismatched.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Source video does not exist.
    #[error("source video not found: {path}")]
    SourceVideoNotFound {
        /// Path to the missing video.
        path: std::path::PathBuf,
    },

    /// Failed to start ffmpeg.
    #[error("failed to run '{binary}'")]
    FfmpegSpawn {
        /// Binary that was invoked.
        binary: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// ffmpeg exited with a failure status.
    #[error("ffmpeg failed while {action}: {stderr}")]
    FfmpegFailed {
        /// What ffmpeg was doing.
        action: String,
        /// Captured standard error (trimmed).
        stderr: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to render the frequency plot.
    #[error("failed to render plot '{path}': {reason}")]
    PlotRender {
        /// Path to the plot file.
        path: std::path::PathBuf,
        /// Description of the rendering failure.
        reason: String,
    },

    /// Failed to write CSV report.
    #[error("failed to write CSV report '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON report.
    #[error("failed to write JSON report '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
