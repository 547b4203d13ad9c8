//! Audio decoding, windowing, and spectral analysis.

mod chunker;
mod decode;
mod spectrum;

pub use chunker::{Window, chunk_signal, window_length};
pub use decode::{DecodedAudio, decode_audio_file, load_extracted_audio};
pub use spectrum::{SpectralAnalyzer, analyze_windows, dominant_frequency};
