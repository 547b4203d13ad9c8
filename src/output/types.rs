//! Report data types.

use crate::analysis::IndexedChunk;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One sorted chunk as written to reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Position in the sorted output (0-based).
    pub rank: usize,
    /// Original chunk index.
    pub chunk_index: usize,
    /// Start time in the source, in seconds.
    pub start_time: f64,
    /// End time in the source, in seconds.
    pub end_time: f64,
    /// Dominant frequency in Hz.
    pub dominant_frequency: f64,
}

impl ReportRow {
    /// Rows for chunks already in sorted order.
    pub fn from_sorted(chunks: &[IndexedChunk]) -> Vec<Self> {
        chunks
            .iter()
            .enumerate()
            .map(|(rank, chunk)| Self {
                rank,
                chunk_index: chunk.index,
                start_time: chunk.start_time,
                end_time: chunk.end_time,
                dominant_frequency: chunk.dominant_frequency,
            })
            .collect()
    }
}

/// Run-level facts shared by every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Source video.
    pub source: PathBuf,
    /// Audio sample rate in Hz.
    pub sample_rate: u32,
    /// Chunk duration in seconds.
    pub chunk_duration: f64,
    /// Total audio duration in seconds.
    pub total_duration: f64,
}
