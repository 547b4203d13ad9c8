//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    extracted_audio_path, output_dir_for, plot_path, report_path_for, sorted_video_path,
};
pub use processor::{Collaborators, RunOptions, RunResult, RunStage, sort_video};
