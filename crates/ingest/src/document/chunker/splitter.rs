//! Recursive separator-driven splitting.

use super::helpers::{char_len, merge_splits, split_keeping_separator};
use super::types::{Chunk, ChunkConfig};

/// Split normalized text into ordered, overlapping chunks.
///
/// Text no longer than `chunk_size` comes back as a single chunk equal to the
/// input. Empty text produces no chunks.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let pieces = if char_len(text) <= config.chunk_size {
        vec![text.to_string()]
    } else {
        split_recursive(text, &config.separators, config)
    };

    pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(index, content)| Chunk {
            index,
            char_len: char_len(&content),
            content,
        })
        .collect()
}

/// Split on the coarsest separator present in `text`, recursing into any
/// piece still too large with the remaining finer separators.
fn split_recursive(text: &str, separators: &[String], config: &ChunkConfig) -> Vec<String> {
    let mut separator = separators.last().map(String::as_str).unwrap_or("");
    let mut finer: &[String] = &[];
    for (i, candidate) in separators.iter().enumerate() {
        if candidate.is_empty() {
            separator = "";
            break;
        }
        if text.contains(candidate.as_str()) {
            separator = candidate.as_str();
            finer = &separators[i + 1..];
            break;
        }
    }

    let mut chunks = Vec::new();
    let mut small: Vec<&str> = Vec::new();

    for piece in split_keeping_separator(text, separator) {
        if char_len(piece) < config.chunk_size {
            small.push(piece);
            continue;
        }
        if !small.is_empty() {
            chunks.extend(merge_splits(&small, config));
            small.clear();
        }
        if finer.is_empty() {
            // Nothing finer to try: keep the oversized piece whole.
            let piece = piece.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }
        } else {
            chunks.extend(split_recursive(piece, finer, config));
        }
    }

    if !small.is_empty() {
        chunks.extend(merge_splits(&small, config));
    }
    chunks
}
