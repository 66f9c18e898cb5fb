//! Length units and chunk limits.
//!
//! ## The Problem
//!
//! "600 characters" and "600 bytes" are not the same limit. Synthesis
//! providers disagree on what they count, and the difference is large for
//! non-Latin scripts:
//!
//! ```text
//! Text:   "你好"
//! Chars:  2
//! Bytes:  6     <- each CJK character is 3 bytes in UTF-8
//! ```
//!
//! A chunker that counts characters against a provider that counts bytes
//! produces chunks three times too large for Chinese text. So the unit is
//! explicit and configurable, never assumed.
//!
//! ## Units
//!
//! | Unit | Counts | Typical provider |
//! |------|--------|------------------|
//! | `Chars` | Unicode scalar values | Character-limited APIs (default) |
//! | `Bytes` | UTF-8 bytes | Byte-limited APIs (e.g. 600-byte payloads) |
//! | `Graphemes` | Extended grapheme clusters (UAX #29) | User-perceived characters |

use std::fmt;
use std::num::NonZeroUsize;
use std::str::{CharIndices, FromStr};

use serde::{Deserialize, Serialize};
use unicode_segmentation::{Graphemes, UnicodeSegmentation};

use crate::{Error, Result};

/// Default chunk limit, matching common per-request TTS payload caps.
pub const DEFAULT_LIMIT: usize = 600;

/// How the length of a chunk is measured.
///
/// # Examples
///
/// ```rust
/// use ttschunk::LengthUnit;
///
/// assert_eq!(LengthUnit::Chars.measure("你好"), 2);
/// assert_eq!(LengthUnit::Bytes.measure("你好"), 6);
/// assert_eq!("bytes".parse::<LengthUnit>().unwrap(), LengthUnit::Bytes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-8 encoded bytes.
    Bytes,
    /// Extended grapheme clusters.
    Graphemes,
}

impl LengthUnit {
    /// Measure `text` in this unit.
    #[must_use]
    pub fn measure(self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Bytes => text.len(),
            Self::Graphemes => text.graphemes(true).count(),
        }
    }

    /// Iterate over the smallest pieces of `text` that may not be split.
    ///
    /// Characters for `Chars` and `Bytes` (a UTF-8 sequence is never cut),
    /// grapheme clusters for `Graphemes`.
    pub fn atoms(self, text: &str) -> Atoms<'_> {
        match self {
            Self::Chars | Self::Bytes => Atoms(AtomsInner::Chars {
                text,
                inner: text.char_indices(),
            }),
            Self::Graphemes => Atoms(AtomsInner::Graphemes(text.graphemes(true))),
        }
    }

    /// The lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chars => "chars",
            Self::Bytes => "bytes",
            Self::Graphemes => "graphemes",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chars" | "char" | "characters" => Ok(Self::Chars),
            "bytes" | "byte" | "utf8" | "utf-8" => Ok(Self::Bytes),
            "graphemes" | "grapheme" => Ok(Self::Graphemes),
            _ => Err(Error::UnknownUnit(s.to_string())),
        }
    }
}

/// Iterator over unsplittable pieces of a string.
///
/// Created by [`LengthUnit::atoms`].
#[derive(Debug, Clone)]
pub struct Atoms<'a>(AtomsInner<'a>);

#[derive(Debug, Clone)]
enum AtomsInner<'a> {
    Chars { text: &'a str, inner: CharIndices<'a> },
    Graphemes(Graphemes<'a>),
}

impl<'a> Iterator for Atoms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match &mut self.0 {
            AtomsInner::Chars { text, inner } => {
                let text: &'a str = *text;
                let (i, c) = inner.next()?;
                Some(&text[i..i + c.len_utf8()])
            }
            AtomsInner::Graphemes(inner) => inner.next(),
        }
    }
}

/// Maximum measured length of a chunk.
///
/// Always at least 1; constructing a zero limit fails with
/// [`Error::InvalidLimit`].
///
/// ```rust
/// use ttschunk::Limit;
///
/// let limit = Limit::new(600).unwrap();
/// assert_eq!(limit.get(), 600);
/// assert!(!limit.would_overflow(598, 2));
/// assert!(limit.would_overflow(598, 3));
///
/// assert!(Limit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit(NonZeroUsize);

impl Limit {
    /// Create a limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] if `limit == 0`.
    pub fn new(limit: usize) -> Result<Self> {
        NonZeroUsize::new(limit)
            .map(Self)
            .ok_or(Error::InvalidLimit(limit))
    }

    /// The limit as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Whether a chunk of measured length `size` fits.
    #[must_use]
    pub const fn fits(self, size: usize) -> bool {
        size <= self.get()
    }

    /// Whether growing a chunk of length `current` by `additional` would
    /// exceed the limit. Reaching the limit exactly is not an overflow.
    #[must_use]
    pub const fn would_overflow(self, current: usize, additional: usize) -> bool {
        current.saturating_add(additional) > self.get()
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_LIMIT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for Limit {
    type Error = Error;

    fn try_from(limit: usize) -> Result<Self> {
        Self::new(limit)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
