//! Property-based tests for TTS chunking.
//!
//! These tests verify that chunking maintains key invariants:
//! - Bounds: no chunk exceeds the limit in the chunker's unit
//! - Non-empty: no chunk is the empty string
//! - Ordered: chunks follow source order and carry sequential indices
//! - Lossless: chunks reproduce the text up to whitespace at boundaries
//! - Fast path: text within the limit comes back unchanged

use proptest::prelude::*;
use ttschunk::sentence::{split_sentences, DEFAULT_TERMINATORS};
use ttschunk::{Chunk, ChunkKind, Chunker, HardSlicer, LengthUnit, TextChunker};

// =============================================================================
// Test Generators
// =============================================================================

/// Arbitrary text, including multi-byte characters and control whitespace.
fn arbitrary_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("(.|\n){0,400}").unwrap()
}

/// Text built from sentences ending in the default terminators.
fn sentence_like_text() -> impl Strategy<Value = String> {
    let sentence = (
        prop::string::string_regex("[A-Za-z ]{1,30}|[一二三四五六七八九十字你好]{1,30}").unwrap(),
        prop::sample::select(vec!["。", "？", "！", "…", "?", "!", "\n", " "]),
    );
    prop::collection::vec(sentence, 1..30).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(body, end)| format!("{body}{end}"))
            .collect::<String>()
    })
}

/// Short sentences with whitespace inside and between them.
fn short_sentence_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("([a-c ]{0,6}[。!\n ]){1,20}").unwrap()
}

fn any_unit() -> impl Strategy<Value = LengthUnit> {
    prop::sample::select(vec![
        LengthUnit::Chars,
        LengthUnit::Bytes,
        LengthUnit::Graphemes,
    ])
}

// =============================================================================
// Invariant Helpers
// =============================================================================

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check that chunks, with whitespace removed, spell out the text.
fn chunks_reconstruct(chunks: &[Chunk], text: &str) -> bool {
    let joined: String = chunks.iter().map(|c| strip_whitespace(&c.text)).collect();
    joined == strip_whitespace(text)
}

/// Trimmed sentences of `text` joined by `separator`.
fn joined_sentences(text: &str, separator: char) -> String {
    split_sentences(text, DEFAULT_TERMINATORS)
        .iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Check that spans are in order, non-overlapping, and indices sequential.
fn chunks_ordered(chunks: &[Chunk]) -> bool {
    chunks.iter().enumerate().all(|(i, c)| c.index == i)
        && chunks.windows(2).all(|w| w[0].end <= w[1].start)
}

/// Check that chunk spans are valid and verbatim chunks match the source.
fn spans_valid(chunks: &[Chunk], text: &str) -> bool {
    chunks.iter().all(|c| {
        c.start <= c.end
            && c.end <= text.len()
            && text.is_char_boundary(c.start)
            && text.is_char_boundary(c.end)
            && match c.kind {
                ChunkKind::Whole | ChunkKind::Sliced => text[c.span()] == c.text,
                ChunkKind::Packed { .. } => true,
            }
    })
}

// =============================================================================
// TextChunker Tests
// =============================================================================

proptest! {
    #[test]
    fn chunks_respect_limit(
        text in arbitrary_text(),
        limit in 4usize..120,
        unit in any_unit(),
    ) {
        // limit >= 4 so that a single char always fits under the byte unit
        let chunker = TextChunker::new(limit).unwrap().with_unit(unit);
        for chunk in chunker.chunk(&text) {
            let len = unit.measure(&chunk.text);
            prop_assert!(len <= limit, "chunk {:?} measures {} > {}", chunk.text, len, limit);
        }
    }

    #[test]
    fn sentence_chunks_respect_limit(
        text in sentence_like_text(),
        limit in 1usize..80,
    ) {
        let chunker = TextChunker::new(limit).unwrap();
        for chunk in chunker.chunk(&text) {
            prop_assert!(chunk.char_len() <= limit);
        }
    }

    #[test]
    fn no_empty_chunks(text in arbitrary_text(), limit in 1usize..100) {
        let chunker = TextChunker::new(limit).unwrap();
        prop_assert!(chunker.chunk(&text).iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn empty_iff_nothing_to_say(text in arbitrary_text(), limit in 1usize..100) {
        let chunker = TextChunker::new(limit).unwrap();
        let chunks = chunker.chunk(&text);
        if text.is_empty() {
            prop_assert!(chunks.is_empty());
        } else if !text.trim().is_empty() {
            prop_assert!(!chunks.is_empty());
        }
    }

    #[test]
    fn chunks_in_source_order(text in sentence_like_text(), limit in 1usize..80) {
        let chunker = TextChunker::new(limit).unwrap();
        let chunks = chunker.chunk(&text);
        prop_assert!(chunks_ordered(&chunks));
        prop_assert!(spans_valid(&chunks, &text));
    }

    #[test]
    fn chunks_are_lossless(
        text in sentence_like_text(),
        limit in 1usize..80,
        unit in any_unit(),
        clauses in any::<bool>(),
    ) {
        let chunker = TextChunker::new(limit.max(4))
            .unwrap()
            .with_unit(unit)
            .with_clause_fallback(clauses);
        let chunks = chunker.chunk(&text);
        prop_assert!(chunks_reconstruct(&chunks, &text));
    }

    #[test]
    fn packed_chunks_rejoin_to_sentences(
        text in short_sentence_text(),
        limit in 8usize..40,
        separator in prop::sample::select(vec![' ', '|', '\n']),
    ) {
        // Sentences are at most 7 chars, so nothing is sliced
        prop_assume!(text.chars().count() > limit);
        let chunker = TextChunker::new(limit).unwrap().with_separator(separator);
        let chunks = chunker.chunk(&text);

        let sep = separator.to_string();
        let rejoined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(&sep);
        prop_assert_eq!(rejoined, joined_sentences(&text, separator));

        for chunk in &chunks {
            let is_packed = matches!(chunk.kind, ChunkKind::Packed { .. });
            prop_assert!(is_packed);
            prop_assert_eq!(&chunk.text, &joined_sentences(&text[chunk.span()], separator));
        }
    }

    #[test]
    fn short_text_is_returned_unchanged(text in arbitrary_text(), unit in any_unit()) {
        prop_assume!(!text.is_empty());
        let limit = unit.measure(&text);
        let chunker = TextChunker::new(limit).unwrap().with_unit(unit);
        prop_assert_eq!(chunker.chunk_strings(&text), vec![text.clone()]);
    }

    #[test]
    fn clause_fallback_respects_limit(text in sentence_like_text(), limit in 1usize..40) {
        let chunker = TextChunker::new(limit).unwrap().with_clause_fallback(true);
        for chunk in chunker.chunk(&text) {
            prop_assert!(chunk.char_len() <= limit);
        }
    }
}

// =============================================================================
// HardSlicer Tests
// =============================================================================

proptest! {
    #[test]
    fn slices_concatenate_to_input(
        text in arbitrary_text(),
        limit in 1usize..50,
        unit in any_unit(),
    ) {
        let slicer = HardSlicer::new(limit, unit).unwrap();
        let chunks = slicer.chunk(&text);
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        prop_assert_eq!(joined, text.clone());
        prop_assert!(spans_valid(&chunks, &text));
    }

    #[test]
    fn slices_are_full_except_last(text in arbitrary_text(), limit in 1usize..50) {
        let slicer = HardSlicer::new(limit, LengthUnit::Chars).unwrap();
        let chunks = slicer.chunk(&text);
        for (i, chunk) in chunks.iter().enumerate() {
            if i + 1 < chunks.len() {
                prop_assert_eq!(chunk.char_len(), limit);
            } else {
                prop_assert!(chunk.char_len() <= limit);
            }
        }
    }
}

// =============================================================================
// Consistency Tests
// =============================================================================

#[test]
fn chunking_is_deterministic() {
    let text = "第一句话。第二句话？第三句话！".repeat(20);
    let chunker = TextChunker::new(30).unwrap();

    assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
}

#[test]
fn chunker_is_shareable_across_threads() {
    let chunker = TextChunker::new(16).unwrap();
    let text = "一二三四五。六七八九十。".repeat(10);
    let expected = chunker.chunk(&text);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| chunker.chunk(&text)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
