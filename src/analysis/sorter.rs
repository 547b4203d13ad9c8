//! Stable frequency ordering applied to parallel sequences.

use crate::analysis::IndexedChunk;
use crate::error::{Error, Result};

/// Chunks and their segments after reordering by frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedChunks<S> {
    /// Chunks in ascending frequency order.
    pub chunks: Vec<IndexedChunk>,
    /// Segments in the same order as `chunks`.
    pub segments: Vec<S>,
    /// Permutation that produced the order (original indices).
    pub permutation: Vec<usize>,
}

impl<S> SortedChunks<S> {
    /// Dominant frequencies in sorted order.
    pub fn frequencies(&self) -> Vec<f64> {
        self.chunks.iter().map(|c| c.dominant_frequency).collect()
    }
}

/// Indices `0..n` ordered by ascending frequency.
///
/// Equal frequencies keep their original relative order.
pub fn sort_permutation(frequencies: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..frequencies.len()).collect();
    // `sort_by` is stable
    order.sort_by(|&a, &b| frequencies[a].total_cmp(&frequencies[b]));
    order
}

/// Reorder `items` so that position `i` holds `items[permutation[i]]`.
///
/// Fails unless `permutation` is a permutation of `0..items.len()`.
pub fn apply_permutation<T>(items: Vec<T>, permutation: &[usize]) -> Result<Vec<T>> {
    if items.len() != permutation.len() {
        return Err(Error::InvalidPermutation {
            reason: format!(
                "{} indices for {} items",
                permutation.len(),
                items.len()
            ),
        });
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    permutation
        .iter()
        .map(|&i| {
            slots
                .get_mut(i)
                .and_then(Option::take)
                .ok_or_else(|| Error::InvalidPermutation {
                    reason: format!("index {i} is out of range or repeated"),
                })
        })
        .collect()
}

/// Sort chunks by frequency and reorder `segments` identically.
///
/// Both sequences are checked before either is touched, so a length
/// mismatch leaves nothing half-sorted.
pub fn sort_in_lockstep<S>(chunks: Vec<IndexedChunk>, segments: Vec<S>) -> Result<SortedChunks<S>> {
    if chunks.len() != segments.len() {
        return Err(Error::SequenceLengthMismatch {
            what: "video segments",
            expected: chunks.len(),
            actual: segments.len(),
        });
    }

    let frequencies: Vec<f64> = chunks.iter().map(|c| c.dominant_frequency).collect();
    let permutation = sort_permutation(&frequencies);

    Ok(SortedChunks {
        chunks: apply_permutation(chunks, &permutation)?,
        segments: apply_permutation(segments, &permutation)?,
        permutation,
    })
}
