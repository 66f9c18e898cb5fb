//! Sentence segmentation for speech input.
//!
//! Splits text right after terminator characters. The terminator stays with
//! the sentence it ends, and the next sentence starts immediately after it:
//!
//! ```text
//! Text:       "你好。今天天气很好！\n我们走吧"
//! Sentences:  ["你好。", "今天天气很好！", "我们走吧"]
//!                                      ^
//!              "\n" is a terminator too; the whitespace-only
//!              piece it ends is dropped after trimming
//! ```
//!
//! ## Why not UAX #29?
//!
//! Unicode sentence segmentation is tuned for reading, not speaking. A TTS
//! payload only needs cut points where a pause sounds natural, and the set
//! of such points is small and script-specific. The default set covers
//! full-width and ASCII question and exclamation marks, the ellipsis, the
//! ideographic full stop, and newlines. The ASCII period is deliberately
//! absent by default ("3.14", "Dr. Smith"); add it with
//! [`TextChunker::with_terminators`](crate::TextChunker::with_terminators)
//! if your text needs it.

/// Default sentence terminators.
pub const DEFAULT_TERMINATORS: &[char] = &['。', '？', '！', '…', '?', '!', '\n'];

/// Secondary punctuation used to split an oversized sentence into clauses.
pub const CLAUSE_SEPARATORS: &[char] = &['，', ',', ';', '；', '、'];

/// A trimmed, non-empty sentence borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// The sentence text, without surrounding whitespace.
    pub text: &'a str,
    /// Byte offset of `text` in the source.
    pub start: usize,
}

impl Sentence<'_> {
    /// Byte offset just past the end of the sentence in the source.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Split `text` into trimmed sentences, dropping whitespace-only pieces.
///
/// ```rust
/// use ttschunk::sentence::{split_sentences, DEFAULT_TERMINATORS};
///
/// let sentences = split_sentences("A。 B？\n\nC", DEFAULT_TERMINATORS);
/// let texts: Vec<&str> = sentences.iter().map(|s| s.text).collect();
/// assert_eq!(texts, vec!["A。", "B？", "C"]);
/// ```
pub fn split_sentences<'a>(text: &'a str, terminators: &[char]) -> Vec<Sentence<'a>> {
    split_after(text, terminators)
        .into_iter()
        .filter_map(|(start, piece)| {
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                return None;
            }
            let leading_ws = piece.len() - piece.trim_start().len();
            Some(Sentence {
                text: trimmed,
                start: start + leading_ws,
            })
        })
        .collect()
}

/// Split `text` right after every character in `boundaries`.
///
/// Returns `(byte_offset, piece)` pairs. Pieces are untrimmed and contiguous:
/// concatenating them reproduces `text`. No piece is empty.
pub fn split_after<'a>(text: &'a str, boundaries: &[char]) -> Vec<(usize, &'a str)> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if boundaries.contains(&c) {
            let end = i + c.len_utf8();
            pieces.push((start, &text[start..end]));
            start = end;
        }
    }
    if start < text.len() {
        pieces.push((start, &text[start..]));
    }

    pieces
}
