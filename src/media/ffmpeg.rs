//! ffmpeg-backed audio extraction, segment cutting, and concatenation.

use crate::audio::{DecodedAudio, load_extracted_audio};
use crate::config::FfmpegConfig;
use crate::constants::{ffmpeg, output_files};
use crate::error::{Error, Result};
use crate::media::{AudioSource, SegmentHandle, VideoSegmentSource, VideoSink};
use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs ffmpeg subprocesses, writing intermediates under a working directory.
#[derive(Debug, Clone)]
pub struct FfmpegMedia {
    binary: String,
    video_codec: String,
    audio_codec: String,
    work_dir: PathBuf,
}

impl FfmpegMedia {
    /// Create a backend that writes intermediates to `work_dir`.
    pub fn new(config: &FfmpegConfig, work_dir: PathBuf) -> Self {
        Self {
            binary: config.binary.clone(),
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            work_dir,
        }
    }

    /// Path the extracted audio track is written to.
    pub fn extracted_audio_path(&self) -> PathBuf {
        self.work_dir.join(output_files::EXTRACTED_AUDIO)
    }

    /// Directory holding extracted segments.
    pub fn segments_dir(&self) -> PathBuf {
        self.work_dir.join(output_files::SEGMENTS_DIR)
    }

    /// Path of the segment file for chunk `index`.
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.segments_dir().join(format!(
            "segment_{index:05}.{}",
            output_files::SEGMENT_EXTENSION
        ))
    }

    /// Arguments that extract the audio track of `source` to `destination`.
    ///
    /// Sample rate and channel layout are left untouched; downmixing is done
    /// after decoding.
    pub fn extract_audio_args(source: &Path, destination: &Path) -> Vec<OsString> {
        let mut args = common_args();
        args.extend([
            "-i".into(),
            source.into(),
            "-vn".into(),
            "-acodec".into(),
            ffmpeg::EXTRACT_AUDIO_CODEC.into(),
            destination.into(),
        ]);
        args
    }

    /// Arguments that re-encode `[start_time, end_time)` of `source`.
    pub fn segment_args(
        &self,
        source: &Path,
        start_time: f64,
        end_time: f64,
        destination: &Path,
    ) -> Vec<OsString> {
        let mut args = common_args();
        args.extend([
            "-ss".into(),
            format!("{start_time:.6}").into(),
            "-i".into(),
            source.into(),
            "-t".into(),
            format!("{:.6}", end_time - start_time).into(),
            "-c:v".into(),
            self.video_codec.as_str().into(),
            "-c:a".into(),
            self.audio_codec.as_str().into(),
            "-avoid_negative_ts".into(),
            "make_zero".into(),
            destination.into(),
        ]);
        args
    }

    /// Arguments that concatenate the files listed in `list_file`.
    pub fn concat_args(list_file: &Path, output: &Path) -> Vec<OsString> {
        let mut args = common_args();
        args.extend([
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list_file.into(),
            "-c".into(),
            "copy".into(),
            output.into(),
        ]);
        args
    }

    fn run(&self, args: &[OsString], action: &str) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("Running ffmpeg ({action}): {:?}", cmd);

        let output = cmd.output().map_err(|e| Error::FfmpegSpawn {
            binary: self.binary.clone(),
            source: e,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::FfmpegFailed {
                action: action.to_string(),
                stderr: if stderr.is_empty() {
                    format!("exit status {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(())
    }
}

impl AudioSource for FfmpegMedia {
    fn load_audio(&self, source: &Path) -> Result<DecodedAudio> {
        ensure_source_exists(source)?;
        create_dir(&self.work_dir)?;

        let destination = self.extracted_audio_path();
        self.run(
            &Self::extract_audio_args(source, &destination),
            "extracting audio",
        )?;

        load_extracted_audio(&destination)
    }
}

impl VideoSegmentSource for FfmpegMedia {
    fn extract_segment(
        &self,
        source: &Path,
        index: usize,
        start_time: f64,
        end_time: f64,
    ) -> Result<SegmentHandle> {
        ensure_source_exists(source)?;
        create_dir(&self.segments_dir())?;

        let path = self.segment_path(index);
        self.run(
            &self.segment_args(source, start_time, end_time, &path),
            &format!("extracting segment {index}"),
        )?;

        Ok(SegmentHandle {
            index,
            start_time,
            end_time,
            path,
        })
    }
}

impl VideoSink for FfmpegMedia {
    fn concatenate(&self, segments: &[SegmentHandle], output: &Path) -> Result<()> {
        create_dir(&self.segments_dir())?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }

        let list_file = self.segments_dir().join(output_files::CONCAT_LIST);
        let contents = concat_list_contents(segments);
        std::fs::write(&list_file, contents)?;

        self.run(&Self::concat_args(&list_file, output), "concatenating segments")
    }
}

/// Body of an ffmpeg concat demuxer list for `segments`, in order.
///
/// Paths are made absolute since the demuxer resolves relative entries
/// against the list file's directory.
pub fn concat_list_contents(segments: &[SegmentHandle]) -> String {
    let mut contents = String::new();
    for segment in segments {
        let path = std::path::absolute(&segment.path).unwrap_or_else(|_| segment.path.clone());
        let escaped = path.to_string_lossy().replace('\'', r"'\''");
        let _ = writeln!(contents, "file '{escaped}'");
    }
    contents
}

fn common_args() -> Vec<OsString> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
    ]
}

fn ensure_source_exists(source: &Path) -> Result<()> {
    if source.is_file() {
        Ok(())
    } else {
        Err(Error::SourceVideoNotFound {
            path: source.to_path_buf(),
        })
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::OutputDirCreateFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn media(work_dir: &str) -> FfmpegMedia {
        FfmpegMedia::new(&FfmpegConfig::default(), PathBuf::from(work_dir))
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_segment_path_is_zero_padded() {
        let m = media("/out");
        assert_eq!(
            m.segment_path(7),
            PathBuf::from("/out/segments/segment_00007.mp4")
        );
    }

    #[test]
    fn test_extract_audio_args_keep_native_format() {
        let args = strings(&FfmpegMedia::extract_audio_args(
            Path::new("in.mp4"),
            Path::new("out.wav"),
        ));
        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"pcm_s16le".to_string()));
        assert!(!args.contains(&"-ac".to_string()));
        assert!(!args.contains(&"-ar".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("out.wav"));
    }

    #[test]
    fn test_segment_args_time_range() {
        let m = media("/out");
        let args = strings(&m.segment_args(
            Path::new("in.mp4"),
            2.5,
            3.0,
            Path::new("seg.mp4"),
        ));
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "2.500000");
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "0.500000");
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"aac".to_string()));
    }

    #[test]
    fn test_concat_list_preserves_order_and_escapes_quotes() {
        let segments = vec![
            SegmentHandle {
                index: 2,
                start_time: 2.0,
                end_time: 3.0,
                path: PathBuf::from("/tmp/b's.mp4"),
            },
            SegmentHandle {
                index: 0,
                start_time: 0.0,
                end_time: 1.0,
                path: PathBuf::from("/tmp/a.mp4"),
            },
        ];
        let contents = concat_list_contents(&segments);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec![r"file '/tmp/b'\''s.mp4'", "file '/tmp/a.mp4'"]);
    }

    #[test]
    fn test_load_audio_missing_source() {
        let m = media("/nonexistent/out");
        let err = m.load_audio(Path::new("/nonexistent/video.mp4")).unwrap_err();
        assert!(matches!(err, Error::SourceVideoNotFound { .. }));
    }
}
