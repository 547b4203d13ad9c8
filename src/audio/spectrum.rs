//! Dominant frequency extraction using realfft.
//!
//! The frequency axis spans `[0, sample_rate / 2]` with `len / 2` evenly
//! spaced points, both ends inclusive. This is slightly wider than the
//! canonical `k * rate / len` bin spacing; results are reported on this axis.

use crate::audio::Window;
use crate::error::{Error, Result};
use rayon::prelude::*;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Computes the dominant frequency of fixed-length windows.
///
/// The FFT is planned once per window length and shared across threads.
pub struct SpectralAnalyzer {
    fft: Arc<dyn RealToComplex<f64>>,
    window_len: usize,
    sample_rate: u32,
}

impl std::fmt::Debug for SpectralAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralAnalyzer")
            .field("window_len", &self.window_len)
            .field("sample_rate", &self.sample_rate)
            .finish_non_exhaustive()
    }
}

impl SpectralAnalyzer {
    /// Plan an analyzer for windows of `window_len` samples.
    pub fn new(window_len: usize, sample_rate: u32) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(window_len);
        Self {
            fft,
            window_len,
            sample_rate,
        }
    }

    /// Window length this analyzer was planned for.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Frequency in Hz of the strongest bin in the lower half of the spectrum.
    ///
    /// Returns 0 for windows too short to have a lower half. A silent window
    /// also yields 0, since every bin ties and the first one wins.
    pub fn dominant_frequency(&self, window: &[f32]) -> Result<f64> {
        if window.len() != self.window_len {
            return Err(Error::Spectrum {
                reason: format!(
                    "window has {} samples, analyzer expects {}",
                    window.len(),
                    self.window_len
                ),
            });
        }

        let half = self.window_len / 2;
        if half == 0 {
            return Ok(0.0);
        }

        let mut input = self.fft.make_input_vec();
        for (dst, &src) in input.iter_mut().zip(window) {
            *dst = f64::from(src);
        }
        let mut spectrum = self.fft.make_output_vec();
        self.fft
            .process(&mut input, &mut spectrum)
            .map_err(|e| Error::Spectrum {
                reason: e.to_string(),
            })?;

        let peak = argmax(spectrum[..half].iter().map(|c| c.norm()));
        Ok(peak.map_or(0.0, |index| {
            frequency_axis_point(index, half, f64::from(self.sample_rate) / 2.0)
        }))
    }
}

/// Dominant frequency of a single window.
pub fn dominant_frequency(window: &[f32], sample_rate: u32) -> Result<f64> {
    if window.len() < 2 {
        return Ok(0.0);
    }
    SpectralAnalyzer::new(window.len(), sample_rate).dominant_frequency(window)
}

/// Dominant frequency of every window, in window order.
///
/// All windows must share one length. With `parallel` set the windows are
/// analyzed on the rayon pool; the output order is unaffected.
pub fn analyze_windows(windows: &[Window<'_>], sample_rate: u32, parallel: bool) -> Result<Vec<f64>> {
    let Some(first) = windows.first() else {
        return Ok(Vec::new());
    };
    let analyzer = SpectralAnalyzer::new(first.samples.len(), sample_rate);

    if parallel {
        windows
            .par_iter()
            .map(|w| analyzer.dominant_frequency(w.samples))
            .collect()
    } else {
        windows
            .iter()
            .map(|w| analyzer.dominant_frequency(w.samples))
            .collect()
    }
}

/// Index of the first maximum. `None` for an empty sequence.
fn argmax(values: impl Iterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Value at `index` of `count` points evenly spaced over `[0, stop]`.
#[allow(clippy::cast_precision_loss)]
fn frequency_axis_point(index: usize, count: usize, stop: f64) -> f64 {
    if index >= count {
        return 0.0;
    }
    if count == 1 {
        return 0.0;
    }
    if index == count - 1 {
        return stop;
    }
    index as f64 * (stop / (count - 1) as f64)
}
