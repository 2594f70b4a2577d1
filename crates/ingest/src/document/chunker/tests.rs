//! Tests for the chunking engine.

use super::helpers::{char_len, merge_splits, split_keeping_separator};
use super::splitter::split_text;
use super::types::ChunkConfig;
use crate::document::preprocess::normalize;

/// Unique numbered sentences until the text reaches at least `min_chars`.
fn sentences(min_chars: usize) -> String {
    let mut text = String::new();
    let mut i = 0;
    while text.len() < min_chars {
        text.push_str(&format!("Sentence number {i} describes event {i} in some detail. "));
        i += 1;
    }
    normalize(&text)
}

fn config(chunk_size: usize, chunk_overlap: usize) -> ChunkConfig {
    ChunkConfig::new(chunk_size, chunk_overlap)
}

// ── Single chunk ────────────────────────────────────────────────────

#[test]
fn short_text_is_one_chunk_equal_to_input() {
    let text = sentences(2500);
    let text: String = text.chars().take(2500).collect::<String>().trim().to_string();
    assert!(char_len(&text) <= 2500);

    let chunks = split_text(&text, &ChunkConfig::default());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, text);
    assert_eq!(chunks[0].index, 0);
}

#[test]
fn text_exactly_at_limit_is_one_chunk() {
    let text = "x".repeat(3000);
    let chunks = split_text(&text, &ChunkConfig::default());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].char_len, 3000);
}

#[test]
fn empty_text_produces_no_chunks() {
    assert!(split_text("", &ChunkConfig::default()).is_empty());
    assert!(split_text("   ", &ChunkConfig::default()).is_empty());
}

// ── Multi chunk ─────────────────────────────────────────────────────

#[test]
fn ten_thousand_chars_split_into_bounded_overlapping_chunks() {
    let text = sentences(10_000);
    assert!(text.len() >= 10_000);

    let chunks = split_text(&text, &config(3000, 300));
    assert!(chunks.len() >= 4, "expected >= 4 chunks, got {}", chunks.len());

    for chunk in &chunks {
        assert!(chunk.char_len <= 3000, "chunk {} has {} chars", chunk.index, chunk.char_len);
    }

    for pair in chunks.windows(2) {
        let (prev, next) = (&pair[0].content, &pair[1].content);
        // The next chunk opens with a sentence carried over from the previous one.
        let first_sentence = next.split(". ").next().unwrap();
        assert!(!first_sentence.is_empty());
        assert!(
            prev.contains(first_sentence),
            "chunk {} does not overlap its predecessor",
            pair[1].index
        );
    }
}

#[test]
fn overlap_is_bounded_by_configured_amount() {
    let text = sentences(10_000);
    let chunks = split_text(&text, &config(3000, 300));

    for pair in chunks.windows(2) {
        let prev = &pair[0].content;
        let next = &pair[1].content;
        // Longest prefix of `next` that is also a suffix of `prev`.
        let shared = (1..=next.len().min(prev.len()))
            .rev()
            .find(|&n| next.is_char_boundary(n) && prev.ends_with(&next[..n]))
            .unwrap_or(0);
        assert!(shared > 0);
        assert!(shared <= 300, "overlap of {shared} chars exceeds 300");
    }
}

#[test]
fn chunks_are_in_order_and_cover_the_text() {
    let text = sentences(10_000);
    let chunks = split_text(&text, &config(3000, 300));

    let mut search_from = 0;
    let mut covered_to = 0;
    for chunk in &chunks {
        let start = text[search_from..]
            .find(&chunk.content)
            .map(|i| i + search_from)
            .expect("chunk must be a substring of the text, in order");
        // At most the single trimmed space between two chunks is skipped.
        assert!(start <= covered_to + 1, "gap before chunk {}", chunk.index);
        covered_to = start + chunk.content.len();
        search_from = start + 1;
    }
    assert_eq!(covered_to, text.len());
}

#[test]
fn chunk_indices_are_sequential() {
    let chunks = split_text(&sentences(5000), &config(500, 50));
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.index, i);
    }
}

// ── Separator preference ────────────────────────────────────────────

#[test]
fn paragraph_breaks_win_over_sentences() {
    let text = "Para one words here.\n\nPara two words here.";
    let chunks = split_text(text, &config(25, 0));
    let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["Para one words here.", "Para two words here."]);
}

#[test]
fn sentences_keep_their_period() {
    let text = "Alpha beta gamma. Delta epsilon zeta. Eta theta iota.";
    let chunks = split_text(text, &config(25, 0));
    let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["Alpha beta gamma.", "Delta epsilon zeta.", "Eta theta iota."]);
}

#[test]
fn words_are_not_cut_when_spaces_exist() {
    let text = (0..400).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    let chunks = split_text(&text, &config(100, 10));
    for chunk in &chunks {
        assert!(chunk.char_len <= 100);
        for word in chunk.content.split(' ') {
            assert!(word.starts_with('w'), "word cut mid-way: {word:?}");
        }
    }
}

#[test]
fn unbroken_text_falls_back_to_characters_with_overlap() {
    let chunks = split_text("abcdefgh", &config(4, 2));
    let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["abcd", "cdef", "efgh"]);
}

#[test]
fn sizes_count_characters_not_bytes() {
    let text = "é".repeat(10);
    let chunks = split_text(&text, &config(4, 0));
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.char_len <= 4));
}

// ── Helpers ─────────────────────────────────────────────────────────

#[test]
fn split_keeps_separator_at_piece_end() {
    assert_eq!(split_keeping_separator("a. b. c", ". "), vec!["a. ", "b. ", "c"]);
    assert_eq!(split_keeping_separator("abc", ""), vec!["a", "b", "c"]);
    assert_eq!(split_keeping_separator("no match", "\n\n"), vec!["no match"]);
    assert_eq!(split_keeping_separator("x\n\n", "\n\n"), vec!["x\n\n"]);
}

#[test]
fn merge_carries_overlap_window() {
    let pieces = ["aa ", "bb ", "cc ", "dd "];
    let merged = merge_splits(&pieces, &config(6, 3));
    assert_eq!(merged, vec!["aa bb", "bb cc", "cc dd"]);
}

#[test]
fn config_validation() {
    assert!(ChunkConfig::default().validate().is_ok());
    assert!(config(0, 0).validate().is_err());
    assert!(config(100, 100).validate().is_err());
    assert!(config(100, 99).validate().is_ok());
}
