//! Integration tests for the sorting pipeline with in-memory collaborators.

#![allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

use freqsort::Error;
use freqsort::audio::DecodedAudio;
use freqsort::config::ReportFormat;
use freqsort::media::{AudioSource, PlotSink, SegmentHandle, VideoSegmentSource, VideoSink};
use freqsort::output::JsonReport;
use freqsort::pipeline::{Collaborators, RunOptions, RunStage, sort_video};
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

const SAMPLE_RATE: u32 = 1000;

/// Mono signal with one sine tone per 0.1 s chunk.
fn tone_sequence(frequencies: &[f64]) -> Vec<f32> {
    let per_chunk = (SAMPLE_RATE / 10) as usize;
    frequencies
        .iter()
        .flat_map(|&f| {
            (0..per_chunk).map(move |i| (TAU * f * i as f64 / f64::from(SAMPLE_RATE)).sin() as f32)
        })
        .collect()
}

fn write_wav(path: &Path, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer
            .write_sample((s * f32::from(i16::MAX) * 0.5) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

struct FakeAudio {
    samples: Vec<f32>,
    loads: Cell<usize>,
}

impl FakeAudio {
    fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            loads: Cell::new(0),
        }
    }
}

impl AudioSource for FakeAudio {
    fn load_audio(&self, _source: &Path) -> freqsort::Result<DecodedAudio> {
        self.loads.set(self.loads.get() + 1);
        Ok(DecodedAudio::new(self.samples.clone(), 1, SAMPLE_RATE))
    }
}

#[derive(Default)]
struct FakeSegments {
    cut: RefCell<Vec<(usize, f64, f64)>>,
}

impl VideoSegmentSource for FakeSegments {
    fn extract_segment(
        &self,
        _source: &Path,
        index: usize,
        start_time: f64,
        end_time: f64,
    ) -> freqsort::Result<SegmentHandle> {
        self.cut.borrow_mut().push((index, start_time, end_time));
        Ok(SegmentHandle {
            index,
            start_time,
            end_time,
            path: PathBuf::from(format!("segment_{index:05}.mp4")),
        })
    }
}

#[derive(Default)]
struct FakeVideo {
    order: RefCell<Vec<usize>>,
}

impl VideoSink for FakeVideo {
    fn concatenate(&self, segments: &[SegmentHandle], _output: &Path) -> freqsort::Result<()> {
        *self.order.borrow_mut() = segments.iter().map(|s| s.index).collect();
        Ok(())
    }
}

#[derive(Default)]
struct FakePlot {
    frequencies: RefCell<Vec<f64>>,
}

impl PlotSink for FakePlot {
    fn render(&self, frequencies: &[f64], _output: &Path) -> freqsort::Result<()> {
        *self.frequencies.borrow_mut() = frequencies.to_vec();
        Ok(())
    }
}

fn options(output_dir: &Path, chunk_duration: f64) -> RunOptions {
    RunOptions {
        source: PathBuf::from("input.mp4"),
        output_dir: output_dir.to_path_buf(),
        chunk_duration,
        reports: Vec::new(),
        parallel: true,
        keep_segments: true,
        progress_enabled: false,
    }
}

#[test]
fn test_chunks_reassembled_by_ascending_frequency() {
    let dir = tempfile::tempdir().unwrap();
    let audio = FakeAudio::new(tone_sequence(&[300.0, 100.0, 200.0]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };

    let result = sort_video(&options(dir.path(), 0.1), media).unwrap();

    assert_eq!(result.stage, RunStage::Reassembled);
    assert_eq!(result.chunks, 3);
    assert_eq!(result.permutation, vec![1, 2, 0]);
    assert_eq!(*video.order.borrow(), vec![1, 2, 0]);

    // Segments are cut in temporal order before sorting.
    let cut = segments.cut.borrow();
    assert_eq!(cut.iter().map(|c| c.0).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!((cut[1].1 - 0.1).abs() < 1e-9);
    assert!((cut[1].2 - 0.2).abs() < 1e-9);

    let plotted = plot.frequencies.borrow();
    assert_eq!(*plotted, result.sorted_frequencies);
    assert!(plotted.windows(2).all(|w| w[0] <= w[1]));
    assert!((plotted[0] - 100.0).abs() < 10.0);
    assert!((plotted[2] - 300.0).abs() < 10.0);
}

#[test]
fn test_sequential_analysis_matches_parallel() {
    let dir = tempfile::tempdir().unwrap();
    let audio = FakeAudio::new(tone_sequence(&[250.0, 50.0, 400.0, 120.0]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };

    let parallel = sort_video(&options(dir.path(), 0.1), media).unwrap();
    let mut sequential_options = options(dir.path(), 0.1);
    sequential_options.parallel = false;
    let sequential = sort_video(&sequential_options, media).unwrap();

    assert_eq!(parallel.permutation, sequential.permutation);
    assert_eq!(parallel.sorted_frequencies, sequential.sorted_frequencies);
    assert_eq!(parallel.permutation, vec![1, 3, 0, 2]);
}

#[test]
fn test_invalid_duration_aborts_before_segments() {
    let dir = tempfile::tempdir().unwrap();
    let audio = FakeAudio::new(tone_sequence(&[100.0; 10]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };

    let err = sort_video(&options(dir.path(), 0.3), media).unwrap_err();

    match err {
        Error::InvalidChunkDuration {
            chunk_duration,
            total_duration,
            suggestions,
        } => {
            assert_eq!(chunk_duration, 0.3);
            assert!((total_duration - 1.0).abs() < 1e-9);
            assert!(!suggestions.is_empty());
            assert!((suggestions[0].duration - 0.25).abs() < 1e-9);
            assert_eq!(suggestions[0].chunk_count, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(audio.loads.get(), 1);
    assert!(segments.cut.borrow().is_empty());
    assert!(video.order.borrow().is_empty());
}

#[test]
fn test_stale_audio_precheck_aborts_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(
        &dir.path().join("extracted_audio.wav"),
        &tone_sequence(&[100.0; 10]),
    );

    let audio = FakeAudio::new(tone_sequence(&[100.0; 10]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };

    let err = sort_video(&options(dir.path(), 0.3), media).unwrap_err();

    assert!(matches!(err, Error::InvalidChunkDuration { .. }));
    assert_eq!(audio.loads.get(), 0);
}

#[test]
fn test_stale_audio_precheck_passes_through_valid_duration() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(
        &dir.path().join("extracted_audio.wav"),
        &tone_sequence(&[100.0; 10]),
    );

    let audio = FakeAudio::new(tone_sequence(&[200.0, 100.0]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };

    let result = sort_video(&options(dir.path(), 0.1), media).unwrap();
    assert_eq!(audio.loads.get(), 1);
    assert_eq!(result.permutation, vec![1, 0]);
}

#[test]
fn test_degenerate_window_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let audio = FakeAudio::new(tone_sequence(&[100.0; 10]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };

    // 0.0005 s divides 1 s evenly but is shorter than one sample at 1 kHz.
    let err = sort_video(&options(dir.path(), 0.0005), media).unwrap_err();

    assert!(matches!(
        err,
        Error::DegenerateWindow {
            sample_rate: SAMPLE_RATE,
            ..
        }
    ));
    assert!(segments.cut.borrow().is_empty());
}

#[test]
fn test_reports_written_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let audio = FakeAudio::new(tone_sequence(&[300.0, 100.0, 200.0]));
    let segments = FakeSegments::default();
    let video = FakeVideo::default();
    let plot = FakePlot::default();
    let media = Collaborators {
        audio: &audio,
        segments: &segments,
        video: &video,
        plot: &plot,
    };
    let mut run_options = options(dir.path(), 0.1);
    run_options.reports = vec![ReportFormat::Csv, ReportFormat::Json];

    let result = sort_video(&run_options, media).unwrap();
    assert_eq!(result.report_paths.len(), 2);

    let csv = std::fs::read_to_string(dir.path().join("chunk_frequencies.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "rank,chunk_index,start_time,end_time,dominant_frequency_hz"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("0,1,"));
    assert!(lines[3].starts_with("2,0,"));

    let json = std::fs::read_to_string(dir.path().join("chunk_frequencies.json")).unwrap();
    let report: JsonReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report.chunk_count, 3);
    assert_eq!(report.summary.sample_rate, SAMPLE_RATE);
    assert_eq!(
        report
            .chunks
            .iter()
            .map(|c| c.chunk_index)
            .collect::<Vec<_>>(),
        vec![1, 2, 0]
    );
}
