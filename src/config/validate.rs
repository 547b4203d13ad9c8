//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    validate_ffmpeg(config)?;
    validate_plot(config)?;
    Ok(())
}

/// Validate default settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let duration = config.defaults.chunk_duration;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("chunk_duration must be a positive number of seconds, got {duration}"),
        });
    }

    if config.defaults.output_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "output_dir must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate ffmpeg settings.
fn validate_ffmpeg(config: &Config) -> Result<()> {
    let ffmpeg = &config.ffmpeg;
    for (name, value) in [
        ("ffmpeg.binary", &ffmpeg.binary),
        ("ffmpeg.video_codec", &ffmpeg.video_codec),
        ("ffmpeg.audio_codec", &ffmpeg.audio_codec),
    ] {
        if value.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("{name} must not be empty"),
            });
        }
    }
    Ok(())
}

/// Validate plot settings.
fn validate_plot(config: &Config) -> Result<()> {
    if config.plot.width == 0 || config.plot.height == 0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "plot dimensions must be at least 1x1, got {}x{}",
                config.plot.width, config.plot.height
            ),
        });
    }
    Ok(())
}
