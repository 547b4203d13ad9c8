//! Frequency plot rendering with plotters.

use crate::config::PlotConfig;
use crate::constants::plot;
use crate::error::{Error, Result};
use crate::media::PlotSink;
use plotters::prelude::*;
use std::path::Path;

/// Renders the sorted frequency sequence as an SVG line plot.
#[derive(Debug, Clone, Copy)]
pub struct SvgPlotter {
    width: u32,
    height: u32,
}

impl SvgPlotter {
    /// Create a plotter with the configured canvas size.
    pub fn new(config: PlotConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }
}

impl PlotSink for SvgPlotter {
    fn render(&self, frequencies: &[f64], output: &Path) -> Result<()> {
        let plot_error = |reason: String| Error::PlotRender {
            path: output.to_path_buf(),
            reason,
        };

        let (x_max, y_max) = axis_bounds(frequencies);

        let root = SVGBackend::new(output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| plot_error(format!("backend error: {e}")))?;

        #[allow(clippy::cast_precision_loss)]
        {
            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .caption(plot::TITLE, ("sans-serif", 24))
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(0f64..x_max, 0f64..y_max)
                .map_err(|e| plot_error(format!("chart build error: {e}")))?;

            chart
                .configure_mesh()
                .x_desc(plot::X_LABEL)
                .y_desc(plot::Y_LABEL)
                .draw()
                .map_err(|e| plot_error(format!("mesh error: {e}")))?;

            let points = || {
                frequencies
                    .iter()
                    .enumerate()
                    .map(|(i, &f)| (i as f64, f))
            };

            chart
                .draw_series(LineSeries::new(points(), &BLUE))
                .map_err(|e| plot_error(format!("series error: {e}")))?;
            chart
                .draw_series(points().map(|p| Circle::new(p, 3, BLUE.filled())))
                .map_err(|e| plot_error(format!("marker error: {e}")))?;
        }

        root.present()
            .map_err(|e| plot_error(format!("write error: {e}")))?;
        Ok(())
    }
}

/// Upper bounds for the x (chunk index) and y (Hz) axes.
///
/// Both are kept strictly positive so an empty or all-zero series still
/// produces a drawable chart.
#[allow(clippy::cast_precision_loss)]
fn axis_bounds(frequencies: &[f64]) -> (f64, f64) {
    let x_max = frequencies.len().saturating_sub(1).max(1) as f64;
    let peak = frequencies
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };
    (x_max, y_max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_bounds() {
        assert_eq!(axis_bounds(&[]), (1.0, 1.0));
        assert_eq!(axis_bounds(&[0.0, 0.0]), (1.0, 1.0));
        let (x, y) = axis_bounds(&[100.0, 200.0, 400.0]);
        assert_eq!(x, 2.0);
        assert!((y - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let plotter = SvgPlotter::new(PlotConfig::default());
        plotter.render(&[50.0, 120.0, 120.0, 880.0], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("<polyline") || contents.contains("<path"));
    }
}
