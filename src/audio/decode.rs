//! Audio decoding using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded audio data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Interleaved samples in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Number of interleaved channels (at least 1).
    pub channels: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Create decoded audio from interleaved samples.
    ///
    /// A channel count of zero is treated as mono.
    pub fn new(samples: Vec<f32>, channels: usize, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
        }
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Total duration in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Downmix to mono by averaging each frame across channels.
    ///
    /// A trailing incomplete frame is ignored.
    pub fn to_mono(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }

        #[allow(clippy::cast_precision_loss)]
        let channels = self.channels as f32;
        self.samples
            .chunks_exact(self.channels)
            .map(|frame| frame.iter().sum::<f32>() / channels)
            .collect()
    }
}

/// Decode an audio file to interleaved f32 samples.
///
/// Supports WAV, FLAC, MP3, and AAC formats.
pub fn decode_audio_file(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;
    let mut channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        // The decoded spec is authoritative when the container omits the layout
        let spec = *decoded.spec();
        channels = spec.channels.count();

        let buf = sample_buf.get_or_insert_with(|| {
            SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
        });
        if buf.capacity() < decoded.capacity() * channels {
            *buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        }
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    Ok(DecodedAudio::new(samples, channels, sample_rate))
}

/// Decode previously extracted audio.
///
/// A missing file means extraction has not happened yet and is reported as
/// [`Error::SourceNotReady`] rather than a generic open failure.
pub fn load_extracted_audio(path: &Path) -> Result<DecodedAudio> {
    if !path.is_file() {
        return Err(Error::SourceNotReady {
            path: path.to_path_buf(),
        });
    }
    decode_audio_file(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mono_averages_channels() {
        let audio = DecodedAudio::new(vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 2, 100);
        assert_eq!(audio.to_mono(), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_to_mono_passthrough_for_mono() {
        let audio = DecodedAudio::new(vec![0.1, 0.2, 0.3], 1, 100);
        assert_eq!(audio.to_mono(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_duration_counts_frames_not_samples() {
        let audio = DecodedAudio::new(vec![0.0; 1000], 2, 100);
        assert_eq!(audio.frames(), 500);
        assert_eq!(audio.duration_secs(), 5.0);
    }

    #[test]
    fn test_zero_channels_treated_as_mono() {
        let audio = DecodedAudio::new(vec![0.0; 10], 0, 10);
        assert_eq!(audio.channels, 1);
        assert_eq!(audio.duration_secs(), 1.0);
    }

    #[test]
    fn test_load_extracted_audio_missing_is_source_not_ready() {
        let err = load_extracted_audio(Path::new("/nonexistent/extracted_audio.wav")).unwrap_err();
        assert!(matches!(err, Error::SourceNotReady { .. }));
    }
}
