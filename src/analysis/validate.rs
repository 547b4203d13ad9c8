//! Chunk duration validation and nearby-duration suggestions.

use crate::audio::load_extracted_audio;
use crate::constants::{RATIO_TOLERANCE, suggest as search};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A chunk duration that evenly divides the total duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChunkSuggestion {
    /// Candidate chunk duration in seconds.
    pub duration: f64,
    /// Number of chunks at this duration.
    pub chunk_count: usize,
}

impl fmt::Display for ChunkSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(clippy::cast_precision_loss)]
        let total = self.chunk_count as f64 * self.duration;
        write!(
            f,
            "{:.2} seconds: {} chunks (total duration: {total:.2} seconds)",
            self.duration, self.chunk_count
        )
    }
}

/// Whether `total_duration / chunk_duration` is an integer.
///
/// Uses a relative tolerance of [`RATIO_TOLERANCE`] so that ratios such as
/// `0.3 / 0.1 = 2.9999999999999996` count as integral.
pub fn is_valid(total_duration: f64, chunk_duration: f64) -> bool {
    integral_ratio(total_duration, chunk_duration).is_some()
}

/// The ratio rounded to the nearest integer, if it is integral.
fn integral_ratio(total_duration: f64, chunk_duration: f64) -> Option<f64> {
    if !chunk_duration.is_finite() || chunk_duration <= 0.0 || !total_duration.is_finite() {
        return None;
    }
    let ratio = total_duration / chunk_duration;
    let nearest = ratio.round();
    ((ratio - nearest).abs() <= ratio.abs().max(1.0) * RATIO_TOLERANCE).then_some(nearest)
}

/// Validate a chunk duration against a known total duration.
///
/// On failure the error carries [`suggest`]ions, which may be empty.
pub fn check_duration(total_duration: f64, chunk_duration: f64) -> Result<()> {
    if is_valid(total_duration, chunk_duration) {
        return Ok(());
    }
    Err(Error::InvalidChunkDuration {
        chunk_duration,
        total_duration,
        suggestions: suggest(total_duration, chunk_duration),
    })
}

/// Validate a chunk duration against previously extracted audio.
///
/// Returns the total duration on success. A missing audio file is
/// [`Error::SourceNotReady`].
pub fn check_audio_file(audio_path: &Path, chunk_duration: f64) -> Result<f64> {
    let audio = load_extracted_audio(audio_path)?;
    let total_duration = audio.duration_secs();
    check_duration(total_duration, chunk_duration)?;
    Ok(total_duration)
}

/// Chunk durations near `chosen` that evenly divide `total_duration`.
///
/// Candidates are multiples of 0.01 s within 0.05 s of `chosen` (never below
/// 0.01 s), closest first, at most five. Equidistant candidates keep the
/// shorter one first.
pub fn suggest(total_duration: f64, chosen: f64) -> Vec<ChunkSuggestion> {
    if !chosen.is_finite() || !total_duration.is_finite() || total_duration <= 0.0 {
        return Vec::new();
    }

    let lower = (chosen - search::RADIUS_SECS).max(search::MIN_CANDIDATE_SECS);
    let upper = chosen + search::RADIUS_SECS;
    if upper < lower {
        return Vec::new();
    }

    // Walk integer hundredths so the window edges are not lost to float error
    #[allow(clippy::cast_possible_truncation)]
    let first = ((lower * search::STEPS_PER_SEC) - 1e-6).ceil().max(1.0) as i64;
    #[allow(clippy::cast_possible_truncation)]
    let last = ((upper * search::STEPS_PER_SEC) + 1e-6).floor() as i64;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let mut candidates: Vec<ChunkSuggestion> = (first..=last)
        .map(|step| step as f64 / search::STEPS_PER_SEC)
        .filter_map(|duration| {
            integral_ratio(total_duration, duration)
                .filter(|&count| count >= 1.0)
                .map(|count| ChunkSuggestion {
                    duration,
                    chunk_count: count as usize,
                })
        })
        .collect();

    // Quantize distances so float noise cannot reorder true ties
    #[allow(clippy::cast_possible_truncation)]
    candidates.sort_by_key(|c| ((c.duration - chosen).abs() / RATIO_TOLERANCE).round() as i64);
    candidates.truncate(search::MAX_SUGGESTIONS);
    candidates
}
