//! Text tokenization and stemming for indexing and querying.

use crate::config::TokenizerConfig;
use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;

/// Common English stop words to filter out from indexing.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "he", "if",
    "in", "into", "is", "it", "its", "no", "not", "of", "on", "or", "so", "such", "that", "the",
    "their", "then", "there", "these", "they", "this", "to", "was", "will", "with",
];

/// Splits text into lower-cased alphanumeric terms.
///
/// The same instance must be used at index-build time and at query time; indices
/// hold an `Arc<Tokenizer>` for that reason.
pub struct Tokenizer {
    /// English stemmer, or `None` when stemming is disabled
    stemmer: Option<Stemmer>,
    min_token_length: usize,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stem", &self.stemmer.is_some())
            .field("min_token_length", &self.min_token_length)
            .finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: &TokenizerConfig) -> Self {
        Self {
            stemmer: config
                .stem
                .then(|| Stemmer::create(Algorithm::English)),
            min_token_length: config.min_token_length.max(1),
        }
    }

    /// Tokenize `text` into terms.
    ///
    /// Any non-alphanumeric character is a boundary, so "dark-mode" and "dark_mode"
    /// both yield ["dark", "mode"]. Stop words and terms shorter than the configured
    /// minimum are dropped before stemming.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|raw| raw.chars().count() >= self.min_token_length)
            .filter_map(|raw| self.normalize(raw))
            .collect()
    }

    /// Lowercase, drop stop words, then stem.
    fn normalize(&self, raw: &str) -> Option<String> {
        let lowercase = raw.to_lowercase();

        if STOP_WORDS.contains(&lowercase.as_str()) {
            return None;
        }

        Some(match &self.stemmer {
            Some(stemmer) => stemmer.stem(&lowercase).into_owned(),
            None => lowercase,
        })
    }
}
