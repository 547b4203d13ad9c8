//! Freqsort CLI entry point.

#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use freqsort::Error;

fn main() {
    if let Err(e) = freqsort::run() {
        if let Error::InvalidChunkDuration {
            chunk_duration,
            suggestions,
            ..
        } = &e
        {
            freqsort::print_suggestions(*chunk_duration, suggestions);
        }
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
