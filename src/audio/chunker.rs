//! Fixed-length, non-overlapping audio windowing.

use crate::constants::WINDOW_LENGTH_EPSILON;
use crate::error::{Error, Result};

/// A window of mono audio with its position in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    /// Window index in temporal order.
    pub index: usize,
    /// Samples for this window.
    pub samples: &'a [f32],
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
}

/// Number of samples in one window of `chunk_duration` seconds.
///
/// Fails with [`Error::DegenerateWindow`] when the duration is not a positive
/// finite number or is shorter than a single sample.
pub fn window_length(chunk_duration: f64, sample_rate: u32) -> Result<usize> {
    let degenerate = || Error::DegenerateWindow {
        chunk_duration,
        sample_rate,
    };

    if !chunk_duration.is_finite() || chunk_duration <= 0.0 {
        return Err(degenerate());
    }

    let exact = chunk_duration * f64::from(sample_rate) + WINDOW_LENGTH_EPSILON;
    if !exact.is_finite() || exact < 1.0 {
        return Err(degenerate());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(exact.floor() as usize)
}

/// Split mono samples into consecutive windows of `chunk_duration` seconds.
///
/// Samples past the last full window are dropped.
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `chunk_duration` - Duration of each window in seconds
pub fn chunk_signal(samples: &[f32], sample_rate: u32, chunk_duration: f64) -> Result<Vec<Window<'_>>> {
    let len = window_length(chunk_duration, sample_rate)?;

    #[allow(clippy::cast_precision_loss)]
    let windows = samples
        .chunks_exact(len)
        .enumerate()
        .map(|(index, chunk)| Window {
            index,
            samples: chunk,
            start_time: index as f64 * chunk_duration,
            end_time: (index + 1) as f64 * chunk_duration,
        })
        .collect();

    Ok(windows)
}
