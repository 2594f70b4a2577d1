//! Splitting and merging primitives used by the recursive splitter.

use std::collections::VecDeque;

use tracing::warn;

use super::types::ChunkConfig;

/// Length in characters, the unit every size bound is expressed in.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` on `separator`, leaving each separator attached to the end of
/// the piece it terminates. An empty separator yields single characters.
/// Empty pieces are dropped; concatenating the result gives back `text`.
pub(crate) fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, matched) in text.match_indices(separator) {
        let end = idx + matched.len();
        if end > start {
            pieces.push(&text[start..end]);
        }
        start = end;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Concatenate pieces and trim; `None` when nothing but whitespace remains.
fn join_pieces(pieces: &VecDeque<&str>) -> Option<String> {
    let joined: String = pieces.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Greedily pack small pieces into chunks of at most `chunk_size` characters.
///
/// After a chunk is emitted, trailing pieces totalling at most `chunk_overlap`
/// characters stay in the window and open the next chunk.
pub(crate) fn merge_splits(pieces: &[&str], config: &ChunkConfig) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for &piece in pieces {
        let len = char_len(piece);
        if total + len > config.chunk_size {
            if total > config.chunk_size {
                warn!(
                    "Created a chunk of size {}, which is longer than the specified {}",
                    total, config.chunk_size
                );
            }
            if !window.is_empty() {
                if let Some(chunk) = join_pieces(&window) {
                    chunks.push(chunk);
                }
                while total > config.chunk_overlap
                    || (total + len > config.chunk_size && total > 0)
                {
                    match window.pop_front() {
                        Some(first) => total -= char_len(first),
                        None => break,
                    }
                }
            }
        }
        window.push_back(piece);
        total += len;
    }

    if let Some(chunk) = join_pieces(&window) {
        chunks.push(chunk);
    }
    chunks
}
