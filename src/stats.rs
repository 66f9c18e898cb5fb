//! Summary statistics for a chunk sequence.

use std::fmt;

use crate::Chunk;

/// Sizes of a chunked text, for logs and debugging.
///
/// Chunk lengths are reported in both bytes and characters regardless of the
/// unit the chunker measured in, since providers differ in which they cap.
///
/// ```rust
/// use ttschunk::TextChunker;
///
/// let chunker = TextChunker::new(11).unwrap();
/// let stats = chunker.stats("第一句话。第二句话。第三句话。");
///
/// assert_eq!(stats.total_chars, 15);
/// assert_eq!(stats.total_bytes, 45);
/// assert_eq!(stats.chunk_count, 2);
/// assert_eq!(stats.max_chunk_chars, 11);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkStats {
    /// Characters in the input text.
    pub total_chars: usize,
    /// UTF-8 bytes in the input text.
    pub total_bytes: usize,
    /// Number of chunks.
    pub chunk_count: usize,
    /// Mean chunk length in bytes, rounded down.
    pub avg_chunk_bytes: usize,
    /// Longest chunk in bytes.
    pub max_chunk_bytes: usize,
    /// Shortest chunk in bytes.
    pub min_chunk_bytes: usize,
    /// Longest chunk in characters.
    pub max_chunk_chars: usize,
    /// Shortest chunk in characters.
    pub min_chunk_chars: usize,
}

impl ChunkStats {
    /// Compute statistics for `chunks` produced from `text`.
    #[must_use]
    pub fn compute(text: &str, chunks: &[Chunk]) -> Self {
        let mut stats = Self {
            total_chars: text.chars().count(),
            total_bytes: text.len(),
            chunk_count: chunks.len(),
            ..Self::default()
        };
        if chunks.is_empty() {
            return stats;
        }

        let bytes = chunks.iter().map(Chunk::len);
        let chars = chunks.iter().map(Chunk::char_len);

        stats.avg_chunk_bytes = bytes.clone().sum::<usize>() / chunks.len();
        stats.max_chunk_bytes = bytes.clone().max().unwrap_or(0);
        stats.min_chunk_bytes = bytes.min().unwrap_or(0);
        stats.max_chunk_chars = chars.clone().max().unwrap_or(0);
        stats.min_chunk_chars = chars.min().unwrap_or(0);
        stats
    }
}

impl fmt::Display for ChunkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chunk stats:")?;
        writeln!(
            f,
            "  input:   {} chars ({} bytes)",
            self.total_chars, self.total_bytes
        )?;
        writeln!(f, "  chunks:  {}", self.chunk_count)?;
        writeln!(f, "  average: {} bytes", self.avg_chunk_bytes)?;
        writeln!(
            f,
            "  longest: {} bytes ({} chars)",
            self.max_chunk_bytes, self.max_chunk_chars
        )?;
        write!(
            f,
            "  shortest: {} bytes ({} chars)",
            self.min_chunk_bytes, self.min_chunk_chars
        )
    }
}
