//! Media collaborators: audio extraction, video segments, concatenation, plotting.
//!
//! The pipeline only talks to these traits. [`FfmpegMedia`] implements the
//! video side by shelling out to ffmpeg; the plot sink lives in
//! [`crate::output::SvgPlotter`].

mod ffmpeg;

pub use ffmpeg::{FfmpegMedia, concat_list_contents};

use crate::audio::DecodedAudio;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// A time-aligned portion of the source video.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentHandle {
    /// Chunk index this segment was cut for.
    pub index: usize,
    /// Start time in the source, in seconds.
    pub start_time: f64,
    /// End time in the source, in seconds.
    pub end_time: f64,
    /// Location of the extracted segment.
    pub path: PathBuf,
}

/// Yields the audio track of a source video.
pub trait AudioSource {
    /// Extract and decode the audio of `source`.
    fn load_audio(&self, source: &Path) -> Result<DecodedAudio>;
}

/// Cuts time ranges out of a source video.
pub trait VideoSegmentSource {
    /// Extract `[start_time, end_time)` of `source` as segment `index`.
    fn extract_segment(
        &self,
        source: &Path,
        index: usize,
        start_time: f64,
        end_time: f64,
    ) -> Result<SegmentHandle>;
}

/// Joins segments into one video.
pub trait VideoSink {
    /// Concatenate `segments` into `output`, in exactly the given order.
    fn concatenate(&self, segments: &[SegmentHandle], output: &Path) -> Result<()>;
}

/// Renders the sorted frequency sequence.
pub trait PlotSink {
    /// Draw an index-vs-frequency plot to `output`.
    fn render(&self, frequencies: &[f64], output: &Path) -> Result<()>;
}
