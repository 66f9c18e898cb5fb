//! The Chunk type: one synthesis request's worth of text.

/// How a chunk was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// The whole input fit within the limit and is passed through verbatim.
    Whole,
    /// One or more whole sentences joined by the separator.
    Packed {
        /// Number of sentences in this chunk.
        sentences: usize,
    },
    /// A piece of a sentence too long to fit on its own.
    Sliced,
}

/// A chunk of text with the span of source text it covers.
///
/// ## Byte Offsets
///
/// `start` and `end` are byte offsets into the original text. For
/// [`ChunkKind::Whole`] and [`ChunkKind::Sliced`] chunks the text is exactly
/// `&source[start..end]`. A [`ChunkKind::Packed`] chunk joins trimmed
/// sentences with a separator, so its text may differ from the source span
/// in the whitespace between sentences:
///
/// ```text
/// Source: "你好。\n再见。"
/// Chunk:  "你好。 再见。"   span [0..19]
///               ^
///          separator replaces the trimmed "\n" boundary
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text, ready to send to a provider.
    pub text: String,
    /// Byte offset where the covered source region starts.
    pub start: usize,
    /// Byte offset where the covered source region ends (exclusive).
    pub end: usize,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
    /// How this chunk was produced.
    pub kind: ChunkKind,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        index: usize,
        kind: ChunkKind,
    ) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
            kind,
        }
    }

    /// The length of this chunk in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this chunk is empty. Chunkers never emit empty chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The byte span of the source text this chunk covers.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Consume the chunk, keeping only its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl AsRef<str> for Chunk {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, span: {}..{}, len: {}, kind: {:?} }}",
            self.index,
            self.start,
            self.end,
            self.len(),
            self.kind
        )
    }
}
