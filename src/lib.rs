//! # ttschunk
//!
//! Text chunking for text-to-speech (TTS) requests.
//!
//! ## The Problem
//!
//! Synthesis providers cap the size of a single request, often at a few
//! hundred characters or bytes. Long text has to be split, and where it is
//! split is audible:
//!
//! - A cut mid-sentence produces an unnatural pause and broken prosody
//! - A cut mid-character produces invalid UTF-8 and a rejected request
//! - A chunk one byte over the cap is rejected outright
//!
//! So chunks should end at sentence boundaries, stay within the cap, and
//! only fall back to hard cuts when a single sentence is too long.
//!
//! ## The Algorithm
//!
//! ```text
//! Text:   "第一句话。第二句话。第三句话。"      limit = 11 chars
//!
//! 1. Fits whole?     15 > 11, no
//! 2. Sentences:      ["第一句话。", "第二句话。", "第三句话。"]
//! 3. Pack greedily:  5 + 1 + 5 = 11 <= 11   -> "第一句话。 第二句话。"
//!                    11 + 1 + 5 = 17 > 11   -> flush, start "第三句话。"
//!
//! Chunks: ["第一句话。 第二句话。", "第三句话。"]
//! ```
//!
//! The `+ 1` is the single space inserted between sentences in a chunk.
//! A sentence that alone exceeds the limit is hard-sliced into pieces of
//! exactly `limit` (the last may be shorter).
//!
//! ## Units
//!
//! Providers disagree on what a "600 limit" means. The unit is explicit:
//!
//! | Unit | `"你好"` | Use for |
//! |------|----------|---------|
//! | [`LengthUnit::Chars`] (default) | 2 | Character-capped APIs |
//! | [`LengthUnit::Bytes`] | 6 | Byte-capped APIs |
//! | [`LengthUnit::Graphemes`] | 2 | User-perceived characters |
//!
//! ## Quick Start
//!
//! ```rust
//! use ttschunk::{Chunker, LengthUnit, TextChunker};
//!
//! // Plain strings, character limit
//! let chunks = ttschunk::chunk("你好。再见。", 600).unwrap();
//! assert_eq!(chunks, vec!["你好。再见。"]);
//!
//! // Byte limit, with chunk metadata
//! let chunker = TextChunker::new(600).unwrap().with_unit(LengthUnit::Bytes);
//! let text = "这是一个测试句子。".repeat(100);
//! for chunk in chunker.chunk(&text) {
//!     assert!(chunk.len() <= 600);
//! }
//! ```
//!
//! ## Feeding a Provider
//!
//! [`synthesize`] sends each chunk to a [`SpeechProvider`] in order and
//! collects the audio. The provider is yours: HTTP client, credentials,
//! response parsing and retries all live behind that trait.

mod chunk;
mod chunker;
mod config;
mod error;
mod fixed;
mod measure;
mod provider;
pub mod sentence;
mod stats;

pub use chunk::{Chunk, ChunkKind};
pub use chunker::TextChunker;
pub use config::{ChunkerConfig, ENV_CLAUSE_FALLBACK, ENV_LIMIT, ENV_UNIT};
pub use error::{Error, Result};
pub use fixed::HardSlicer;
pub use measure::{Atoms, LengthUnit, Limit, DEFAULT_LIMIT};
pub use provider::{synthesize, AudioSegment, SpeechProvider, SynthesisError};
pub use stats::ChunkStats;

/// A text chunking strategy.
///
/// Both the sentence-packing [`TextChunker`] and the fixed-width
/// [`HardSlicer`] implement this trait:
///
/// ```rust
/// use ttschunk::{Chunk, Chunker, HardSlicer, LengthUnit, TextChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<Chunk> {
///     chunker.chunk(text)
/// }
///
/// let packed = TextChunker::new(8).unwrap();
/// let sliced = HardSlicer::new(8, LengthUnit::Chars).unwrap();
///
/// let text = "Hello! How are you?";
/// assert_eq!(chunk_document(&packed, text)[0].text, "Hello!");
/// assert_eq!(chunk_document(&sliced, text)[0].text, "Hello! H");
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each [`Chunk`] carries its text and the byte span of the source it
    /// covers. Empty text yields no chunks.
    fn chunk(&self, text: &str) -> Vec<Chunk>;

    /// Estimate the number of chunks for a given text length in bytes.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize;
}

/// Chunk `text` into strings of at most `limit` characters.
///
/// Shorthand for `TextChunker::new(limit)?.chunk_strings(text)`.
///
/// # Errors
///
/// Returns [`Error::InvalidLimit`] if `limit == 0`.
///
/// ```rust
/// let chunks = ttschunk::chunk(&"字".repeat(650), 600).unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert!(ttschunk::chunk("text", 0).is_err());
/// ```
pub fn chunk(text: &str, limit: usize) -> Result<Vec<String>> {
    Ok(TextChunker::new(limit)?.chunk_strings(text))
}
