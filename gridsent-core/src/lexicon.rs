//! Weighted phrase lexicon
//!
//! Each entry maps a phrase of one or more lower-case tokens, joined by
//! single spaces, to a signed weight. The longest phrase length (in tokens)
//! is computed once at load time and bounds the MaxMatch window.

use crate::error::{CoreError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Immutable phrase -> weight table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, i32>,
    max_phrase_len: usize,
}

impl Lexicon {
    /// Build a lexicon from `(phrase, weight)` pairs
    ///
    /// Phrases are normalized the same way as file entries: lower-cased and
    /// re-joined with single spaces. Later duplicates overwrite earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::default();
        for (phrase, weight) in entries {
            let tokens: Vec<String> = phrase
                .as_ref()
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            lexicon.insert(tokens, weight);
        }
        lexicon
    }

    /// Parse the textual lexicon format
    ///
    /// One entry per line: every whitespace-separated token but the last forms
    /// the phrase, the last token is the signed integer weight. Blank lines are
    /// ignored.
    pub fn parse(source: &str) -> Result<Self> {
        let mut lexicon = Self::default();

        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim_start_matches('\u{feff}');
            let mut tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(weight_token) = tokens.pop() else {
                continue;
            };

            if tokens.is_empty() {
                return Err(CoreError::LexiconParse {
                    line: index + 1,
                    reason: format!("expected '<phrase> <score>', got '{}'", line.trim()),
                });
            }

            let weight = weight_token
                .parse::<i32>()
                .map_err(|e| CoreError::LexiconParse {
                    line: index + 1,
                    reason: format!("invalid score '{weight_token}': {e}"),
                })?;

            lexicon.insert(tokens.iter().map(|t| t.to_lowercase()).collect(), weight);
        }

        Ok(lexicon)
    }

    /// Load and parse a lexicon file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    fn insert(&mut self, tokens: Vec<String>, weight: i32) {
        if tokens.is_empty() {
            return;
        }
        self.max_phrase_len = self.max_phrase_len.max(tokens.len());
        self.entries.insert(tokens.join(" "), weight);
    }

    /// Look up an already-normalized phrase
    pub fn get(&self, phrase: &str) -> Option<i32> {
        self.entries.get(phrase).copied()
    }

    /// Longest phrase length in tokens (K)
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(phrase, weight)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
