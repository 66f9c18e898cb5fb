//! Sentence-packing chunker for TTS requests.
//!
//! ## The Algorithm
//!
//! ```text
//! 1. Whole text fits?            -> one chunk, verbatim
//! 2. Split after terminators     -> trimmed sentences
//! 3. Pack sentences greedily     -> "S1 S2 S3" while len + 1 + next <= limit
//! 4. A sentence alone too long?  -> hard-slice it into limit-sized pieces
//! ```
//!
//! Step 3 counts one separator between sentences, because that is what the
//! chunk will contain once the sentences are joined:
//!
//! ```text
//! limit = 3, text = "A。B。C。"
//!
//! group ["A。"]        len 2
//! + "B。"             2 + 1 + 2 = 5 > 3  -> flush "A。"
//! group ["B。"]        len 2
//! + "C。"             5 > 3              -> flush "B。"
//! group ["C。"]                          -> flush "C。"
//! ```
//!
//! Chunks are never joined across a flush: each one is an independent
//! synthesis request.
//!
//! ## Oversized Sentences
//!
//! By default a sentence longer than the limit goes straight to the
//! [`HardSlicer`]. With [`TextChunker::with_clause_fallback`] it is first
//! split after secondary punctuation (`，,;；、`), and only a clause that is
//! still too long is sliced, the same coarse-to-fine idea as a recursive
//! separator hierarchy.

use tracing::debug;

use crate::sentence::{
    split_after, split_sentences, Sentence, CLAUSE_SEPARATORS, DEFAULT_TERMINATORS,
};
use crate::{Chunk, ChunkKind, ChunkStats, Chunker, HardSlicer, LengthUnit, Limit, Result};

/// Splits text into chunks no longer than a limit, at sentence boundaries
/// where possible.
///
/// ## Example
///
/// ```rust
/// use ttschunk::{Chunker, TextChunker};
///
/// let chunker = TextChunker::new(12).unwrap();
/// let chunks = chunker.chunk("第一句话。第二句话。第三句话。");
///
/// // 5 + 1 + 5 = 11 fits, a third sentence would not
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].text, "第一句话。 第二句话。");
/// assert_eq!(chunks[1].text, "第三句话。");
/// ```
#[derive(Debug, Clone)]
pub struct TextChunker {
    limit: Limit,
    unit: LengthUnit,
    separator: char,
    terminators: Vec<char>,
    clause_fallback: bool,
}

impl TextChunker {
    /// Create a chunker with a limit measured in characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`](crate::Error::InvalidLimit) if
    /// `limit == 0`.
    pub fn new(limit: usize) -> Result<Self> {
        Ok(Self::with_limit(Limit::new(limit)?))
    }

    /// Create a chunker from an already validated limit.
    #[must_use]
    pub fn with_limit(limit: Limit) -> Self {
        Self {
            limit,
            unit: LengthUnit::default(),
            separator: ' ',
            terminators: DEFAULT_TERMINATORS.to_vec(),
            clause_fallback: false,
        }
    }

    /// Measure chunks in `unit` instead of characters.
    #[must_use]
    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Join sentences within a chunk with `separator` instead of a space.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Replace the sentence terminator set.
    ///
    /// ```rust
    /// use ttschunk::TextChunker;
    ///
    /// // Also end sentences at ASCII periods.
    /// let chunker = TextChunker::new(20)
    ///     .unwrap()
    ///     .with_terminators("。？！…?!\n.".chars());
    /// let chunks = chunker.chunk_strings("First one. Second one. Third.");
    /// assert_eq!(chunks, vec!["First one.", "Second one. Third."]);
    /// ```
    #[must_use]
    pub fn with_terminators(mut self, terminators: impl IntoIterator<Item = char>) -> Self {
        self.terminators = terminators.into_iter().collect();
        self
    }

    /// Split oversized sentences at clause punctuation before hard slicing.
    #[must_use]
    pub fn with_clause_fallback(mut self, enabled: bool) -> Self {
        self.clause_fallback = enabled;
        self
    }

    /// The maximum measured length of a chunk.
    #[must_use]
    pub const fn limit(&self) -> Limit {
        self.limit
    }

    /// The unit chunk lengths are measured in.
    #[must_use]
    pub const fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// The character inserted between sentences within a chunk.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// The sentence terminator set.
    #[must_use]
    pub fn terminators(&self) -> &[char] {
        &self.terminators
    }

    /// Whether oversized sentences are split at clauses first.
    #[must_use]
    pub const fn clause_fallback(&self) -> bool {
        self.clause_fallback
    }

    /// Chunk `text`, keeping only the chunk strings.
    pub fn chunk_strings(&self, text: &str) -> Vec<String> {
        self.chunk(text).into_iter().map(Chunk::into_text).collect()
    }

    /// Chunk `text` and summarize the result.
    pub fn stats(&self, text: &str) -> ChunkStats {
        ChunkStats::compute(text, &self.chunk(text))
    }

    fn separator_len(&self) -> usize {
        let mut buf = [0u8; 4];
        self.unit.measure(self.separator.encode_utf8(&mut buf))
    }

    fn slicer(&self) -> HardSlicer {
        HardSlicer::with_limit(self.limit, self.unit)
    }

    /// Emit the current group as one chunk and clear it.
    fn flush(&self, group: &mut Vec<Sentence<'_>>, out: &mut Vec<Chunk>) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return;
        };
        let (start, end) = (first.start, last.end());

        let mut text = String::with_capacity(end - start);
        for (i, sentence) in group.iter().enumerate() {
            if i > 0 {
                text.push(self.separator);
            }
            text.push_str(sentence.text);
        }

        let kind = ChunkKind::Packed {
            sentences: group.len(),
        };
        out.push(Chunk::new(text, start, end, out.len(), kind));
        group.clear();
    }

    /// Emit an oversized sentence as pieces no longer than the limit.
    fn split_oversized(&self, sentence: Sentence<'_>, out: &mut Vec<Chunk>) {
        if self.clause_fallback {
            self.split_clauses(sentence, out);
        } else {
            self.push_slices(sentence.text, sentence.start, out);
        }
    }

    /// Blank pieces are skipped: they would be silent synthesis requests.
    fn push_slices(&self, text: &str, base: usize, out: &mut Vec<Chunk>) {
        for (offset, piece) in self.slicer().slice(text) {
            if piece.trim().is_empty() {
                continue;
            }
            let start = base + offset;
            out.push(Chunk::new(
                piece,
                start,
                start + piece.len(),
                out.len(),
                ChunkKind::Sliced,
            ));
        }
    }

    /// Pack adjacent clauses of one sentence; clauses are contiguous source
    /// text, so no separator is inserted between them.
    fn split_clauses(&self, sentence: Sentence<'_>, out: &mut Vec<Chunk>) {
        let text = sentence.text;
        let mut run_start = 0;
        let mut run_end = 0;
        let mut run_len = 0;

        for (offset, clause) in split_after(text, CLAUSE_SEPARATORS) {
            let len = self.unit.measure(clause);

            if run_len > 0 && self.limit.would_overflow(run_len, len) {
                self.push_run(&text[run_start..run_end], sentence.start + run_start, out);
                run_len = 0;
            }
            if run_len == 0 {
                run_start = offset;
            }

            if self.limit.fits(len) {
                run_len += len;
                run_end = offset + clause.len();
            } else {
                self.push_slices(clause, sentence.start + offset, out);
                run_start = offset + clause.len();
            }
        }

        if run_len > 0 {
            self.push_run(&text[run_start..run_end], sentence.start + run_start, out);
        }
    }

    fn push_run(&self, run: &str, base: usize, out: &mut Vec<Chunk>) {
        let trimmed = run.trim();
        if trimmed.is_empty() {
            return;
        }
        let start = base + (run.len() - run.trim_start().len());
        out.push(Chunk::new(
            trimmed,
            start,
            start + trimmed.len(),
            out.len(),
            ChunkKind::Sliced,
        ));
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::with_limit(Limit::default())
    }
}

impl Chunker for TextChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return vec![];
        }

        let total = self.unit.measure(text);
        if self.limit.fits(total) {
            debug!(
                len = total,
                limit = self.limit.get(),
                unit = %self.unit,
                "text fits in one chunk"
            );
            return vec![Chunk::new(text, 0, text.len(), 0, ChunkKind::Whole)];
        }

        let sentences = split_sentences(text, &self.terminators);
        let sentence_count = sentences.len();
        let separator_len = self.separator_len();

        let mut chunks = Vec::with_capacity(self.estimate_chunks(text.len()));
        let mut group: Vec<Sentence<'_>> = Vec::new();
        let mut accumulated = 0;

        for sentence in sentences {
            let len = self.unit.measure(sentence.text);
            let extra = if group.is_empty() {
                len
            } else {
                len + separator_len
            };

            if !self.limit.would_overflow(accumulated, extra) {
                group.push(sentence);
                accumulated += extra;
                continue;
            }

            self.flush(&mut group, &mut chunks);
            accumulated = 0;

            if self.limit.fits(len) {
                group.push(sentence);
                accumulated = len;
            } else {
                self.split_oversized(sentence, &mut chunks);
            }
        }
        self.flush(&mut group, &mut chunks);

        debug!(
            len = total,
            limit = self.limit.get(),
            unit = %self.unit,
            sentences = sentence_count,
            chunks = chunks.len(),
            "chunked text"
        );
        chunks
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / self.limit.get()).max(1)
    }
}
