//! Shared fixtures: a deterministic similarity-table model and word lists.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use codenames_engine::{
    Allegiance, Board, EmbeddingError, EmbeddingModel, Neighbor, WordList, WordSource,
};

/// Embedding stub backed by an explicit similarity table.
///
/// Pairs missing from the table fall back to `default_sim`; a word is always
/// fully similar to itself. Neighbours are ranked by mean similarity to the
/// positive words, ties alphabetically.
#[derive(Clone, Debug, Default)]
pub struct TableModel {
    vocab: BTreeSet<String>,
    table: HashMap<(String, String), f32>,
    default_sim: f32,
    unavailable: bool,
}

impl TableModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocab.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_default(mut self, sim: f32) -> Self {
        self.default_sim = sim;
        self
    }

    pub fn with_sim(mut self, a: &str, b: &str, sim: f32) -> Self {
        self.vocab.insert(a.to_string());
        self.vocab.insert(b.to_string());
        self.table.insert(key(a, b), sim);
        self
    }

    /// Every query fails as if the backing service were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn lookup(&self, a: &str, b: &str) -> f32 {
        if a == b {
            return 1.0;
        }
        self.table.get(&key(a, b)).copied().unwrap_or(self.default_sim)
    }

    fn check(&self) -> Result<(), EmbeddingError> {
        if self.unavailable {
            Err(EmbeddingError::Unavailable("service offline".into()))
        } else {
            Ok(())
        }
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl EmbeddingModel for TableModel {
    fn contains(&self, word: &str) -> bool {
        self.vocab.contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        self.check()?;
        for word in [a, b] {
            if !self.contains(word) {
                return Err(EmbeddingError::UnknownWord(word.to_string()));
            }
        }
        Ok(self.lookup(a, b))
    }

    fn nearest_neighbors(
        &self,
        positive: &[&str],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, EmbeddingError> {
        self.check()?;
        let mut hits: Vec<Neighbor> = self
            .vocab
            .iter()
            .filter(|w| !positive.contains(&w.as_str()))
            .map(|w| {
                let total: f32 = positive.iter().map(|p| self.lookup(w, p)).sum();
                Neighbor::new(w.as_str(), total / positive.len().max(1) as f32)
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
        hits.truncate(top_k);
        Ok(hits)
    }
}

/// `n` distinct board words: `w00`, `w01`, ...
pub fn word_list(n: usize) -> WordList {
    WordList::new((0..n).map(|i| format!("w{i:02}")))
}

/// Clue words the table model offers beyond the board.
pub const CLUE_WORDS: [&str; 6] = ["apple", "berry", "cloud", "dune", "ember", "frost"];

/// Model that knows every word of `word_list(n)` plus `CLUE_WORDS`, all
/// pairs equally similar.
pub fn flat_model(n: usize) -> TableModel {
    TableModel::new()
        .with_words(word_list(n).words().iter().cloned())
        .with_words(CLUE_WORDS)
        .with_default(0.1)
}

/// Board indices holding the given allegiance.
pub fn indices_of(board: &Board, allegiance: Allegiance) -> Vec<usize> {
    board
        .cards()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.allegiance() == allegiance)
        .map(|(i, _)| i)
        .collect()
}
