//! Single video processing pipeline.

use crate::analysis::{
    IndexedChunk, SortedChunks, check_audio_file, check_duration, index_chunks, sort_in_lockstep,
};
use crate::audio::{analyze_windows, chunk_signal};
use crate::config::ReportFormat;
use crate::error::{Error, Result};
use crate::media::{AudioSource, PlotSink, SegmentHandle, VideoSegmentSource, VideoSink};
use crate::output::{
    CsvReportWriter, JsonReportWriter, ReportRow, ReportWriter, RunSummary, progress,
};
use crate::pipeline::{extracted_audio_path, plot_path, report_path_for, sorted_video_path};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Source video.
    pub source: PathBuf,
    /// Directory for all outputs.
    pub output_dir: PathBuf,
    /// Chunk duration in seconds.
    pub chunk_duration: f64,
    /// Chunk reports to write.
    pub reports: Vec<ReportFormat>,
    /// Analyze windows in parallel.
    pub parallel: bool,
    /// Keep per-chunk segment files after reassembly.
    pub keep_segments: bool,
    /// Show a progress bar during segment extraction.
    pub progress_enabled: bool,
}

/// External collaborators used by a run.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Audio extraction.
    pub audio: &'a dyn AudioSource,
    /// Video segment extraction.
    pub segments: &'a dyn VideoSegmentSource,
    /// Video concatenation.
    pub video: &'a dyn VideoSink,
    /// Frequency plot rendering.
    pub plot: &'a dyn PlotSink,
}

/// Progress of a run. Each stage requires the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    /// Nothing extracted yet.
    Uninitialized,
    /// Audio decoded from the source.
    AudioExtracted,
    /// Chunk duration checked against the decoded audio.
    Validated,
    /// Windows cut and dominant frequencies computed.
    ChunkedAndAnalyzed,
    /// Chunks and segments reordered by frequency.
    Sorted,
    /// Sorted video written.
    Reassembled,
}

impl RunStage {
    /// The stage that must follow this one.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Uninitialized => Some(Self::AudioExtracted),
            Self::AudioExtracted => Some(Self::Validated),
            Self::Validated => Some(Self::ChunkedAndAnalyzed),
            Self::ChunkedAndAnalyzed => Some(Self::Sorted),
            Self::Sorted => Some(Self::Reassembled),
            Self::Reassembled => None,
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::AudioExtracted => "audio extracted",
            Self::Validated => "validated",
            Self::ChunkedAndAnalyzed => "chunked and analyzed",
            Self::Sorted => "sorted",
            Self::Reassembled => "reassembled",
        };
        f.write_str(name)
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunResult {
    /// Final stage reached.
    pub stage: RunStage,
    /// Number of chunks.
    pub chunks: usize,
    /// Audio sample rate in Hz.
    pub sample_rate: u32,
    /// Total audio duration in seconds.
    pub total_duration: f64,
    /// Original chunk indices in output order.
    pub permutation: Vec<usize>,
    /// Dominant frequencies in output order.
    pub sorted_frequencies: Vec<f64>,
    /// Reassembled video.
    pub video_path: PathBuf,
    /// Frequency plot.
    pub plot_path: PathBuf,
    /// Report files written.
    pub report_paths: Vec<PathBuf>,
    /// Processing duration in seconds.
    pub duration_secs: f64,
}

/// Reorder the chunks of a video by the dominant frequency of their audio.
///
/// Validation runs twice: once against audio left in the output directory by
/// an earlier run, and again against freshly extracted audio. Only the second
/// check is authoritative, but either failing aborts before any segment is
/// cut.
pub fn sort_video(options: &RunOptions, media: Collaborators<'_>) -> Result<RunResult> {
    use std::time::Instant;

    let start_time = Instant::now();
    let chunk_duration = options.chunk_duration;
    let mut stage = RunStage::Uninitialized;

    info!("Processing: {}", options.source.display());

    precheck_stale_audio(&extracted_audio_path(&options.output_dir), chunk_duration)?;

    std::fs::create_dir_all(&options.output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: options.output_dir.clone(),
        source: e,
    })?;

    info!("Extracting audio...");
    let audio = media.audio.load_audio(&options.source)?;
    let total_duration = audio.duration_secs();
    info!(
        "Extracted {} of audio ({} Hz, {} channel(s))",
        progress::format_duration(total_duration),
        audio.sample_rate,
        audio.channels
    );
    advance(&mut stage, RunStage::AudioExtracted);

    check_duration(total_duration, chunk_duration)?;
    advance(&mut stage, RunStage::Validated);

    info!("Processing audio...");
    let mono = audio.to_mono();
    let windows = chunk_signal(&mono, audio.sample_rate, chunk_duration)?;
    if windows.is_empty() {
        return Err(Error::NoChunks { chunk_duration });
    }
    debug!(
        "Analyzing {} windows of {} samples{}",
        windows.len(),
        windows[0].samples.len(),
        if options.parallel { " in parallel" } else { "" }
    );
    let frequencies = analyze_windows(&windows, audio.sample_rate, options.parallel)?;
    let chunks = index_chunks(&windows, &frequencies)?;
    advance(&mut stage, RunStage::ChunkedAndAnalyzed);

    let segments = extract_segments(
        media.segments,
        &options.source,
        &chunks,
        options.progress_enabled,
    )?;

    info!("Sorting chunks...");
    let sorted = sort_in_lockstep(chunks, segments)?;
    advance(&mut stage, RunStage::Sorted);
    let sorted_frequencies = sorted.frequencies();

    info!("Plotting frequencies...");
    let plot_path = plot_path(&options.output_dir);
    media.plot.render(&sorted_frequencies, &plot_path)?;

    let summary = RunSummary {
        source: options.source.clone(),
        sample_rate: audio.sample_rate,
        chunk_duration,
        total_duration,
    };
    let report_paths = write_reports(&options.reports, &options.output_dir, &summary, &sorted)?;

    info!("Reassembling and exporting video...");
    let video_path = sorted_video_path(&options.output_dir);
    media.video.concatenate(&sorted.segments, &video_path)?;
    advance(&mut stage, RunStage::Reassembled);

    if !options.keep_segments {
        remove_segments(&sorted.segments);
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    info!(
        "Sorted {} chunks in {:.2}s -> {}",
        sorted.chunks.len(),
        duration_secs,
        video_path.display()
    );

    Ok(RunResult {
        stage,
        chunks: sorted.chunks.len(),
        sample_rate: audio.sample_rate,
        total_duration,
        permutation: sorted.permutation,
        sorted_frequencies,
        video_path,
        plot_path,
        report_paths,
        duration_secs,
    })
}

fn advance(stage: &mut RunStage, next: RunStage) {
    debug_assert_eq!(stage.next(), Some(next), "run stages must not be skipped");
    *stage = next;
    info!("Stage: {next}");
}

/// Validate against audio left behind by an earlier run, if any.
///
/// Missing or unreadable stale audio is not fatal; a duration that the stale
/// audio already rules out is.
fn precheck_stale_audio(audio_path: &Path, chunk_duration: f64) -> Result<()> {
    match check_audio_file(audio_path, chunk_duration) {
        Ok(total) => {
            debug!("Pre-check passed against existing audio ({total:.3}s)");
            Ok(())
        }
        Err(Error::SourceNotReady { path }) => {
            debug!("Pre-check skipped, no extracted audio at {}", path.display());
            Ok(())
        }
        Err(e @ Error::InvalidChunkDuration { .. }) => Err(e),
        Err(e) => {
            warn!(
                "Pre-check skipped, could not read {}: {e}",
                audio_path.display()
            );
            Ok(())
        }
    }
}

/// Cut one segment per chunk, in temporal order.
fn extract_segments(
    source: &dyn VideoSegmentSource,
    video: &Path,
    chunks: &[IndexedChunk],
    progress_enabled: bool,
) -> Result<Vec<SegmentHandle>> {
    info!("Extracting {} video segments...", chunks.len());
    let pb = progress::create_segment_progress(chunks.len(), progress_enabled);

    let mut segments = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        match source.extract_segment(video, chunk.index, chunk.start_time, chunk.end_time) {
            Ok(segment) => segments.push(segment),
            Err(e) => {
                progress::finish_progress(pb, "Failed");
                return Err(e);
            }
        }
        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "Segments extracted");
    Ok(segments)
}

/// Write the requested chunk reports.
fn write_reports(
    formats: &[ReportFormat],
    output_dir: &Path,
    summary: &RunSummary,
    sorted: &SortedChunks<SegmentHandle>,
) -> Result<Vec<PathBuf>> {
    if formats.is_empty() {
        return Ok(Vec::new());
    }

    let rows = ReportRow::from_sorted(&sorted.chunks);
    let mut paths = Vec::with_capacity(formats.len());

    for &format in formats {
        let path = report_path_for(output_dir, format);
        debug!("Writing {} report: {}", format, path.display());

        let mut writer: Box<dyn ReportWriter> = match format {
            ReportFormat::Csv => Box::new(CsvReportWriter::new(&path)?),
            ReportFormat::Json => Box::new(JsonReportWriter::new(&path, summary.clone())),
        };

        writer.write_header()?;
        for row in &rows {
            writer.write_row(row)?;
        }
        writer.finalize()?;
        paths.push(path);
    }

    Ok(paths)
}

/// Delete segment files once the sorted video exists.
fn remove_segments(segments: &[SegmentHandle]) {
    for segment in segments {
        match std::fs::remove_file(&segment.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {e}", segment.path.display()),
        }
    }
}
