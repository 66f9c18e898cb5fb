//! Chunker configuration from code, environment variables, or TOML.
//!
//! Every field has a default, so an empty TOML table or an empty environment
//! yields the default chunker (600 characters, sentence packing, no clause
//! fallback).
//!
//! ```toml
//! limit = 600
//! unit = "bytes"
//! clause_fallback = true
//! ```
//!
//! Provider credentials and endpoints do not belong here: the synthesis
//! provider owns its own configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentence::DEFAULT_TERMINATORS;
use crate::{Error, LengthUnit, Limit, Result, TextChunker, DEFAULT_LIMIT};

/// Environment variable for [`ChunkerConfig::limit`].
pub const ENV_LIMIT: &str = "TTS_CHUNK_LIMIT";
/// Environment variable for [`ChunkerConfig::unit`].
pub const ENV_UNIT: &str = "TTS_CHUNK_UNIT";
/// Environment variable for [`ChunkerConfig::clause_fallback`].
pub const ENV_CLAUSE_FALLBACK: &str = "TTS_CHUNK_CLAUSE_FALLBACK";

/// Serializable settings for a [`TextChunker`].
///
/// ```rust
/// use ttschunk::{ChunkerConfig, LengthUnit};
///
/// let config = ChunkerConfig::from_toml_str("limit = 200\nunit = \"bytes\"").unwrap();
/// assert_eq!(config.limit, 200);
/// assert_eq!(config.unit, LengthUnit::Bytes);
///
/// let chunker = config.build().unwrap();
/// assert_eq!(chunker.limit().get(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkerConfig {
    /// Maximum measured length of a chunk (must be >= 1).
    pub limit: usize,
    /// Unit the limit is measured in.
    pub unit: LengthUnit,
    /// Character joining sentences within a chunk.
    pub separator: char,
    /// Sentence terminators; `None` keeps the default set.
    pub terminators: Option<String>,
    /// Split oversized sentences at clause punctuation before slicing.
    pub clause_fallback: bool,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            unit: LengthUnit::default(),
            separator: ' ',
            terminators: None,
            clause_fallback: false,
        }
    }
}

impl ChunkerConfig {
    /// Read overrides from `TTS_CHUNK_LIMIT`, `TTS_CHUNK_UNIT` and
    /// `TTS_CHUNK_CLAUSE_FALLBACK`. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] or [`Error::UnknownUnit`] if a
    /// variable is set to an unparsable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_LIMIT) {
            config.limit = value.trim().parse().map_err(|_| Error::InvalidConfig {
                key: ENV_LIMIT,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_UNIT) {
            config.unit = value.parse()?;
        }
        if let Some(value) = lookup(ENV_CLAUSE_FALLBACK) {
            config.clause_fallback = parse_bool(&value).ok_or(Error::InvalidConfig {
                key: ENV_CLAUSE_FALLBACK,
                value,
            })?;
        }

        debug!(
            limit = config.limit,
            unit = %config.unit,
            clause_fallback = config.clause_fallback,
            "loaded chunker config from environment"
        );
        Ok(config)
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] on syntax errors, unknown keys, or mistyped
    /// values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Build the configured chunker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] if `limit == 0`.
    pub fn build(&self) -> Result<TextChunker> {
        let terminators: Vec<char> = match &self.terminators {
            Some(set) => set.chars().collect(),
            None => DEFAULT_TERMINATORS.to_vec(),
        };
        Ok(TextChunker::with_limit(Limit::new(self.limit)?)
            .with_unit(self.unit)
            .with_separator(self.separator)
            .with_terminators(terminators)
            .with_clause_fallback(self.clause_fallback))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChunkerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ChunkerConfig::default());
        assert_eq!(config.limit, 600);
        assert_eq!(config.unit, LengthUnit::Chars);
    }

    #[test]
    fn test_env_overrides() {
        let config = ChunkerConfig::from_lookup(lookup(&[
            (ENV_LIMIT, " 300 "),
            (ENV_UNIT, "bytes"),
            (ENV_CLAUSE_FALLBACK, "yes"),
        ]))
        .unwrap();
        assert_eq!(config.limit, 300);
        assert_eq!(config.unit, LengthUnit::Bytes);
        assert!(config.clause_fallback);
    }

    #[test]
    fn test_env_bad_limit() {
        let err = ChunkerConfig::from_lookup(lookup(&[(ENV_LIMIT, "lots")])).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig { key: ENV_LIMIT, .. }
        ));
    }

    #[test]
    fn test_env_bad_unit_and_flag() {
        assert!(matches!(
            ChunkerConfig::from_lookup(lookup(&[(ENV_UNIT, "tokens")])),
            Err(Error::UnknownUnit(_))
        ));
        assert!(matches!(
            ChunkerConfig::from_lookup(lookup(&[(ENV_CLAUSE_FALLBACK, "maybe")])),
            Err(Error::InvalidConfig { key: ENV_CLAUSE_FALLBACK, .. })
        ));
    }

    #[test]
    fn test_zero_limit_fails_at_build() {
        let config = ChunkerConfig::from_lookup(lookup(&[(ENV_LIMIT, "0")])).unwrap();
        assert!(matches!(config.build(), Err(Error::InvalidLimit(0))));
    }

    #[test]
    fn test_toml_full() {
        let config = ChunkerConfig::from_toml_str(
            r#"
            limit = 40
            unit = "graphemes"
            separator = "\n"
            terminators = "。."
            clause_fallback = true
            "#,
        )
        .unwrap();
        assert_eq!(config.separator, '\n');

        let chunker = config.build().unwrap();
        assert_eq!(chunker.unit(), LengthUnit::Graphemes);
        assert_eq!(chunker.terminators(), &['。', '.']);
        assert!(chunker.clause_fallback());
    }

    #[test]
    fn test_toml_empty_is_default() {
        assert_eq!(
            ChunkerConfig::from_toml_str("").unwrap(),
            ChunkerConfig::default()
        );
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(matches!(
            ChunkerConfig::from_toml_str("api_key = \"secret\""),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_toml_rejects_bad_unit() {
        assert!(ChunkerConfig::from_toml_str("unit = \"tokens\"").is_err());
    }
}
