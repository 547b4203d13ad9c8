//! Chunk indexing, frequency ordering, and chunk duration validation.

mod indexer;
mod sorter;
mod validate;

pub use indexer::{IndexedChunk, index_chunks};
pub use sorter::{SortedChunks, apply_permutation, sort_in_lockstep, sort_permutation};
pub use validate::{ChunkSuggestion, check_audio_file, check_duration, is_valid, suggest};
