//! The seam between chunking and a speech synthesis provider.
//!
//! A provider turns one chunk of text into one opaque audio payload. It owns
//! its transport, credentials and response parsing; this crate only decides
//! what text each request carries and keeps the results in order.
//!
//! ```text
//! text --TextChunker--> [c0, c1, c2] --provider--> [a0, a1, a2]
//!                                                   same order, one per chunk
//! ```
//!
//! There is no retry here. The first failing chunk aborts the run and is
//! reported with its index so the caller can decide what to do.

use tracing::{debug, warn};

use crate::{Chunk, Chunker, TextChunker};

/// Something that synthesizes speech for one chunk of text.
///
/// Implementations are injected with their own configuration (endpoint,
/// credentials, voice) at construction.
///
/// ```rust
/// use ttschunk::{synthesize, SpeechProvider, TextChunker};
///
/// struct Echo;
///
/// impl SpeechProvider for Echo {
///     type Error = std::convert::Infallible;
///
///     fn synthesize(&self, chunk: &str) -> Result<Vec<u8>, Self::Error> {
///         Ok(chunk.as_bytes().to_vec())
///     }
/// }
///
/// let chunker = TextChunker::new(5).unwrap();
/// let segments = synthesize(&chunker, &Echo, "A。B。C。").unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].audio, "A。 B。".as_bytes());
/// ```
pub trait SpeechProvider: Send + Sync {
    /// Provider-specific failure (transport, status, malformed response).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Synthesize `chunk`, returning encoded audio bytes.
    ///
    /// # Errors
    ///
    /// Whatever the provider reports; it is passed through unchanged.
    fn synthesize(&self, chunk: &str) -> Result<Vec<u8>, Self::Error>;
}

impl<P: SpeechProvider + ?Sized> SpeechProvider for &P {
    type Error = P::Error;

    fn synthesize(&self, chunk: &str) -> Result<Vec<u8>, Self::Error> {
        (**self).synthesize(chunk)
    }
}

/// Audio for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    /// Index of the chunk this audio was synthesized from.
    pub index: usize,
    /// The chunk that was sent to the provider.
    pub chunk: Chunk,
    /// Encoded audio as returned by the provider.
    pub audio: Vec<u8>,
}

/// Failure while synthesizing a chunked text.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError<E>
where
    E: std::error::Error + 'static,
{
    /// The provider failed on a chunk.
    #[error("provider failed on chunk {index}: {source}")]
    Provider {
        /// Index of the failing chunk.
        index: usize,
        /// The provider's error.
        #[source]
        source: E,
    },

    /// The provider answered without audio.
    #[error("provider returned no audio for chunk {index}")]
    EmptyAudio {
        /// Index of the chunk with no audio.
        index: usize,
    },
}

impl<E: std::error::Error + 'static> SynthesisError<E> {
    /// Index of the chunk that failed.
    pub fn index(&self) -> usize {
        match self {
            Self::Provider { index, .. } | Self::EmptyAudio { index } => *index,
        }
    }
}

/// Chunk `text` and synthesize every chunk in order.
///
/// Returns one [`AudioSegment`] per chunk, in chunk order. Empty text yields
/// no segments and makes no provider calls.
///
/// # Errors
///
/// Stops at the first chunk the provider fails on or returns no audio for.
pub fn synthesize<P: SpeechProvider>(
    chunker: &TextChunker,
    provider: &P,
    text: &str,
) -> Result<Vec<AudioSegment>, SynthesisError<P::Error>> {
    let chunks = chunker.chunk(text);
    let total = chunks.len();
    let mut segments = Vec::with_capacity(total);

    for chunk in chunks {
        let index = chunk.index;
        debug!(index, total, len = chunk.len(), "synthesizing chunk");

        let audio = provider.synthesize(&chunk.text).map_err(|source| {
            warn!(index, total, error = %source, "provider failed");
            SynthesisError::Provider { index, source }
        })?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio { index });
        }

        segments.push(AudioSegment {
            index,
            chunk,
            audio,
        });
    }

    Ok(segments)
}
