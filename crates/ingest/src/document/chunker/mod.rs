//! Overlapping chunker.
//!
//! Splits normalized text into windows small enough for one model call,
//! preferring paragraph, line and sentence boundaries over mid-word cuts.

mod helpers;
mod splitter;
mod types;

pub use splitter::split_text;
pub use types::{Chunk, ChunkConfig, DEFAULT_SEPARATORS};

#[cfg(test)]
mod tests;
