//! Text acquisition and chunking: everything between a file on disk and the
//! ordered chunks handed to the summarizer.

pub mod document;

pub use document::chunker::{split_text, Chunk, ChunkConfig};
pub use document::preprocess::normalize;
pub use document::{extract_bytes, read_document, ExtractionError};
