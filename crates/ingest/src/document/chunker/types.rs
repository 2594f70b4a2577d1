//! Chunk configuration and output types.

use precis_core::config::ChunkingConfig;
use precis_core::CoreError;

/// Split points tried in order, coarsest first. The empty separator splits
/// between characters and always succeeds.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine. Sizes are in characters.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (default: 3000).
    pub chunk_size: usize,
    /// Characters carried from the end of one chunk into the next (default: 300).
    pub chunk_overlap: usize,
    /// Separator preference, coarsest first.
    pub separators: Vec<String>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(3000, 300)
    }
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.chunk_size == 0 {
            return Err(CoreError::InvalidChunkConfig("chunk_size must be positive".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(CoreError::InvalidChunkConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A window of the normalized document handed to one model call.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// 0-based position in document order.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// Length of `content` in characters.
    pub char_len: usize,
}
