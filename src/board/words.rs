//! Word sources.
//!
//! A `WordSource` hands the engine a deduplicated, lowercase vocabulary.
//! `WordList` reads the plain-text format: one token per line.

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::core::LoadError;

/// Supplies candidate board words.
pub trait WordSource {
    /// Distinct lowercase words, in source order.
    fn words(&self) -> &[String];
}

/// In-memory word list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build from arbitrary words.
    ///
    /// Words are trimmed and lowercased; blanks, tokens with embedded
    /// whitespace and repeats are dropped. First occurrence wins.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let words = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    /// Parse newline-delimited text.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Read a newline-delimited word file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let list = Self::from_text(&text);
        tracing::debug!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Is the list empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for WordList {
    fn words(&self) -> &[String] {
        &self.words
    }
}

fn normalize(raw: &str) -> Option<String> {
    let word = raw.trim();
    if word.is_empty() || word.chars().any(char::is_whitespace) {
        return None;
    }
    Some(word.to_lowercase())
}
