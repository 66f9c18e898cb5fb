//! Error types for ttschunk.

/// Errors that can occur while configuring a chunker.
///
/// Chunking itself cannot fail once a [`TextChunker`](crate::TextChunker)
/// exists; every variant here is an invalid-argument or invalid-config error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk limit (must be >= 1).
    #[error("invalid chunk limit: {0} (must be >= 1)")]
    InvalidLimit(usize),

    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig {
        /// The configuration key (environment variable or field name).
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// Unrecognized length unit name.
    #[error("unknown length unit {0:?} (expected chars, bytes or graphemes)")]
    UnknownUnit(String),

    /// Malformed TOML configuration.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for ttschunk operations.
pub type Result<T> = std::result::Result<T, Error>;
