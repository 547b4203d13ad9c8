//! CLI argument definitions.

use crate::cli::validators::parse_chunk_duration;
use crate::config::ReportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reorder the chunks of a video by the dominant frequency of their audio.
#[derive(Debug, Parser)]
#[command(name = "freqsort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input video to sort.
    pub input: Option<PathBuf>,

    /// Options for a sorting run.
    #[command(flatten)]
    pub sort: SortArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a chunk duration against extracted audio and list alternatives.
    Suggest {
        /// Extracted audio to check (default: `<output-dir>/extracted_audio.wav`).
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// Chunk duration in seconds.
        #[arg(short = 'd', long, value_parser = parse_chunk_duration, env = "FREQSORT_CHUNK_DURATION")]
        chunk_duration: f64,

        /// Output directory holding extracted audio.
        #[arg(short, long, env = "FREQSORT_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for a sorting run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct SortArgs {
    /// Chunk duration in seconds (must divide the audio duration evenly).
    #[arg(short = 'd', long, value_parser = parse_chunk_duration, env = "FREQSORT_CHUNK_DURATION")]
    pub chunk_duration: Option<f64>,

    /// Output directory (default: Results).
    #[arg(short, long, env = "FREQSORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Chunk reports to write (comma-separated: csv,json).
    #[arg(short, long, value_delimiter = ',', env = "FREQSORT_REPORTS")]
    pub reports: Option<Vec<ReportFormat>>,

    /// Keep per-chunk segment files after reassembly.
    #[arg(long)]
    pub keep_segments: bool,

    /// Analyze windows on a single thread.
    #[arg(long)]
    pub sequential: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
