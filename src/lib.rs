//! Freqsort - reorder video chunks by the dominant frequency of their audio.
//!
//! A video is cut into fixed-duration chunks, the dominant frequency of each
//! chunk's audio is found with a real FFT, and the chunks are reassembled in
//! ascending frequency order.

#![warn(missing_docs)]

pub mod analysis;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod media;
pub mod output;
pub mod pipeline;

use analysis::ChunkSuggestion;
use clap::{CommandFactory, Parser};
use cli::{Cli, Command, SortArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use media::FfmpegMedia;
use output::SvgPlotter;
use pipeline::{Collaborators, RunOptions, extracted_audio_path, output_dir_for, sort_video};
use std::path::Path;
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for freqsort CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.sort.verbose, cli.sort.quiet);

    let config = load_default_config()?;
    config::validate_config(&config)?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    let Some(input) = cli.input else {
        Cli::command().print_help()?;
        return Ok(());
    };

    sort_file(&input, &cli.sort, &config)
}

/// Sort one video with CLI options layered over the configuration.
fn sort_file(input: &Path, args: &SortArgs, config: &Config) -> Result<()> {
    let output_dir = output_dir_for(args.output_dir.as_deref(), &config.defaults.output_dir);
    let options = RunOptions {
        source: input.to_path_buf(),
        output_dir: output_dir.clone(),
        chunk_duration: args
            .chunk_duration
            .unwrap_or(config.defaults.chunk_duration),
        reports: args
            .reports
            .clone()
            .unwrap_or_else(|| config.defaults.reports.clone()),
        parallel: config.analysis.parallel && !args.sequential,
        keep_segments: args.keep_segments || config.defaults.keep_segments,
        progress_enabled: !args.quiet && !args.no_progress,
    };

    let ffmpeg = FfmpegMedia::new(&config.ffmpeg, output_dir);
    let plotter = SvgPlotter::new(config.plot);
    let media = Collaborators {
        audio: &ffmpeg,
        segments: &ffmpeg,
        video: &ffmpeg,
        plot: &plotter,
    };

    let result = sort_video(&options, media)?;

    info!("Sorted video: {}", result.video_path.display());
    info!("Frequency plot: {}", result.plot_path.display());
    for path in &result.report_paths {
        info!("Report: {}", path.display());
    }
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Suggest {
            audio,
            chunk_duration,
            output_dir,
        } => {
            let audio = audio.unwrap_or_else(|| {
                let dir = output_dir_for(output_dir.as_deref(), &config.defaults.output_dir);
                extracted_audio_path(&dir)
            });
            handle_suggest_command(&audio, chunk_duration)
        }
        Command::Config { action } => handle_config_command(action),
    }
}

#[allow(clippy::print_stdout)]
fn handle_suggest_command(audio: &Path, chunk_duration: f64) -> Result<()> {
    let total_duration = analysis::check_audio_file(audio, chunk_duration)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let chunks = (total_duration / chunk_duration).round() as usize;
    println!(
        "{chunk_duration} seconds is valid: {chunks} chunks (total duration: {total_duration:.2} seconds)"
    );
    Ok(())
}

/// Print nearby valid chunk durations for a rejected one.
#[allow(clippy::print_stderr)]
pub fn print_suggestions(chosen: f64, suggestions: &[ChunkSuggestion]) {
    if suggestions.is_empty() {
        eprintln!("No valid chunk durations found near {chosen} seconds.");
        return;
    }
    eprintln!("Suggested chunk durations:");
    for suggestion in suggestions {
        eprintln!("  {suggestion}");
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
