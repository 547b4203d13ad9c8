//! Pairing windows with their dominant frequencies.

use crate::audio::Window;
use crate::error::{Error, Result};
use serde::Serialize;

/// A chunk's position in the source and its dominant frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexedChunk {
    /// Original (temporal) index.
    pub index: usize,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    /// Dominant frequency in Hz.
    pub dominant_frequency: f64,
}

/// Pair each window with the frequency at the same position.
pub fn index_chunks(windows: &[Window<'_>], frequencies: &[f64]) -> Result<Vec<IndexedChunk>> {
    if windows.len() != frequencies.len() {
        return Err(Error::SequenceLengthMismatch {
            what: "dominant frequencies",
            expected: windows.len(),
            actual: frequencies.len(),
        });
    }

    Ok(windows
        .iter()
        .zip(frequencies)
        .map(|(window, &dominant_frequency)| IndexedChunk {
            index: window.index,
            start_time: window.start_time,
            end_time: window.end_time,
            dominant_frequency,
        })
        .collect())
}
