//! Polarity lexicon: token -> integer weight.
//!
//! The lexicon is loaded once at startup and shared read-only between
//! requests. Words that are not listed weigh zero.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::tokenizer::tokenize;

const BUILTIN_SOURCE: &str = include_str!("../data/lexicon.tsv");

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    // Compiled in; test_builtin_lexicon_loads guards the format.
    Arc::new(Lexicon::parse_tsv(BUILTIN_SOURCE, "builtin").expect("embedded lexicon is valid"))
});

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON lexicon {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin}:{line}: invalid entry {content:?}")]
    InvalidLine {
        origin: String,
        line: usize,
        content: String,
    },

    #[error("{origin}: key {key:?} is not a single word")]
    InvalidKey { origin: String, key: String },

    #[error("lexicon {0} has no entries")]
    Empty(String),
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    weights: HashMap<String, i32>,
    source: String,
}

impl Lexicon {
    /// The word list compiled into the binary.
    pub fn builtin() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Builds a lexicon from in-memory pairs. Keys are lower-cased.
    #[cfg(test)]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let weights = pairs
            .into_iter()
            .map(|(word, weight)| (word.as_ref().to_lowercase(), weight))
            .collect();

        Self {
            weights,
            source: "inline".to_string(),
        }
    }

    /// Loads a lexicon from disk. `.json` files hold a `{"word": weight}`
    /// object, anything else is read as `word<TAB>weight` lines.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: display.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&raw, &display)
        } else {
            Self::parse_tsv(&raw, &display)
        }
    }

    pub fn parse_tsv(raw: &str, origin: &str) -> Result<Self, LexiconError> {
        let mut weights = HashMap::new();

        for (idx, line) in raw.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let invalid = || LexiconError::InvalidLine {
                origin: origin.to_string(),
                line: idx + 1,
                content: line.to_string(),
            };

            let mut fields = trimmed.split_whitespace();
            let (Some(word), Some(weight), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(invalid());
            };
            let weight: i32 = weight.parse().map_err(|_| invalid())?;
            let key = normalize_key(word).ok_or_else(invalid)?;

            weights.insert(key, weight);
        }

        Self::finish(weights, origin)
    }

    pub fn parse_json(raw: &str, origin: &str) -> Result<Self, LexiconError> {
        let entries: HashMap<String, i32> =
            serde_json::from_str(raw).map_err(|source| LexiconError::Json {
                path: origin.to_string(),
                source,
            })?;

        let mut weights = HashMap::with_capacity(entries.len());
        for (word, weight) in entries {
            let Some(key) = normalize_key(&word) else {
                return Err(LexiconError::InvalidKey {
                    origin: origin.to_string(),
                    key: word,
                });
            };
            weights.insert(key, weight);
        }

        Self::finish(weights, origin)
    }

    fn finish(weights: HashMap<String, i32>, origin: &str) -> Result<Self, LexiconError> {
        if weights.is_empty() {
            return Err(LexiconError::Empty(origin.to_string()));
        }

        Ok(Self {
            weights,
            source: origin.to_string(),
        })
    }

    /// Weight of an already-normalized token, if listed.
    pub fn weight(&self, token: &str) -> Option<i32> {
        self.weights.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Keys go through the same normalization as input text, so a key is usable
/// only when it comes out as exactly one token.
fn normalize_key(word: &str) -> Option<String> {
    let mut tokens = tokenize(word).into_iter();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Some(token),
        _ => None,
    }
}
