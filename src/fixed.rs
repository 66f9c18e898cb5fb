//! Fixed-width hard slicing.
//!
//! The last resort for a sentence that does not fit in one chunk: cut it into
//! consecutive pieces of exactly `limit` measured length, the final piece
//! taking whatever remains.
//!
//! ## How It Works
//!
//! ```text
//! limit = 4, unit = chars
//!
//! Sentence: "abcdefghij"
//!
//! Piece 0: "abcd"   [0..4]
//! Piece 1: "efgh"   [4..8]
//! Piece 2: "ij"     [8..10]  <- final piece may be shorter
//! ```
//!
//! Slicing walks the text one unsplittable atom at a time (a `char`, or a
//! grapheme cluster for [`LengthUnit::Graphemes`]), so a cut never lands
//! inside a UTF-8 sequence:
//!
//! ```text
//! limit = 7, unit = bytes
//!
//! Sentence: "ab字字字"          (2 + 3 * 3 = 11 bytes)
//!
//! Piece 0: "ab字"   7 bytes
//! Piece 1: "字字"   6 bytes   <- the next 字 would make 9
//! ```
//!
//! With the byte unit and a limit smaller than a single character's width,
//! that character is emitted as a piece of its own.
//!
//! Pieces are not trimmed, so a run of whitespace longer than the limit
//! yields pieces that are entirely blank. [`TextChunker`](crate::TextChunker)
//! drops those when slicing an oversized sentence; `HardSlicer` used on its
//! own keeps them so its output always concatenates back to the input.

use tracing::trace;

use crate::{Chunk, ChunkKind, Chunker, LengthUnit, Limit, Result};

/// Fixed-width slicer over a measured length.
///
/// ## Example
///
/// ```rust
/// use ttschunk::{Chunker, HardSlicer, LengthUnit};
///
/// let slicer = HardSlicer::new(600, LengthUnit::Chars).unwrap();
/// let text = "字".repeat(650);
/// let chunks = slicer.chunk(&text);
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].char_len(), 600);
/// assert_eq!(chunks[1].char_len(), 50);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HardSlicer {
    limit: Limit,
    unit: LengthUnit,
}

impl HardSlicer {
    /// Create a slicer producing pieces of at most `limit` in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`](crate::Error::InvalidLimit) if
    /// `limit == 0`.
    pub fn new(limit: usize, unit: LengthUnit) -> Result<Self> {
        Ok(Self::with_limit(Limit::new(limit)?, unit))
    }

    /// Create a slicer from an already validated limit.
    #[must_use]
    pub const fn with_limit(limit: Limit, unit: LengthUnit) -> Self {
        Self { limit, unit }
    }

    /// The maximum measured length of a piece.
    #[must_use]
    pub const fn limit(&self) -> Limit {
        self.limit
    }

    /// The unit pieces are measured in.
    #[must_use]
    pub const fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Slice `text` into `(byte_offset, piece)` pairs.
    ///
    /// Pieces are contiguous and non-empty; concatenating them reproduces
    /// `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        let mut pieces = Vec::with_capacity(self.estimate_chunks(text.len()));
        let mut start = 0;
        let mut pos = 0;
        let mut len = 0;

        for atom in self.unit.atoms(text) {
            let width = self.unit.measure(atom);
            if len > 0 && self.limit.would_overflow(len, width) {
                pieces.push((start, &text[start..pos]));
                start = pos;
                len = 0;
            }
            len += width;
            pos += atom.len();
        }

        if pos > start {
            pieces.push((start, &text[start..pos]));
        }

        trace!(
            bytes = text.len(),
            pieces = pieces.len(),
            limit = self.limit.get(),
            unit = %self.unit,
            "hard-sliced text"
        );
        pieces
    }
}

impl Chunker for HardSlicer {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return vec![];
        }

        self.slice(text)
            .into_iter()
            .enumerate()
            .map(|(index, (start, piece))| {
                Chunk::new(piece, start, start + piece.len(), index, ChunkKind::Sliced)
            })
            .collect()
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        if text_len == 0 {
            return 0;
        }
        // A measured unit is at most 4 bytes for chars; rough for graphemes.
        text_len.div_ceil(self.limit.get().saturating_mul(4)).max(1)
    }
}
