//! Output locations for a run.

use crate::config::ReportFormat;
use crate::constants::{output_files, report_extensions};
use std::path::{Path, PathBuf};

/// Determine the output directory: explicit flag, else the configured one.
pub fn output_dir_for(explicit_output_dir: Option<&Path>, configured: &Path) -> PathBuf {
    explicit_output_dir.map_or_else(|| configured.to_path_buf(), Path::to_path_buf)
}

/// Where extracted audio lives (and where a previous run left it).
pub fn extracted_audio_path(output_dir: &Path) -> PathBuf {
    output_dir.join(output_files::EXTRACTED_AUDIO)
}

/// Where the reassembled video is written.
pub fn sorted_video_path(output_dir: &Path) -> PathBuf {
    output_dir.join(output_files::SORTED_VIDEO)
}

/// Where the frequency plot is written.
pub fn plot_path(output_dir: &Path) -> PathBuf {
    output_dir.join(output_files::FREQUENCY_PLOT)
}

/// Get report file path for a given format.
pub fn report_path_for(output_dir: &Path, format: ReportFormat) -> PathBuf {
    let extension = match format {
        ReportFormat::Csv => report_extensions::CSV,
        ReportFormat::Json => report_extensions::JSON,
    };

    output_dir.join(format!("{}{extension}", output_files::REPORT_STEM))
}
