//! Embedding model capability.
//!
//! The clue engine never talks to a concrete embedding library. It sees
//! only this trait, so tests can plug in a fixed similarity table and
//! hosts can wrap whatever model they load.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameError;

/// A nearest-neighbour hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub word: String,
    pub score: f32,
}

impl Neighbor {
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Errors raised by an embedding model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmbeddingError {
    #[error("{0}")]
    Unavailable(String),

    #[error("word {0:?} is not in the vocabulary")]
    UnknownWord(String),

    #[error("expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vector for {0:?} has a non-finite component")]
    NonFinite(String),
}

impl From<EmbeddingError> for GameError {
    fn from(err: EmbeddingError) -> Self {
        GameError::EmbeddingUnavailable(err.to_string())
    }
}

/// Word-embedding queries used by the clue engine.
pub trait EmbeddingModel {
    /// Is `word` in the vocabulary?
    fn contains(&self, word: &str) -> bool;

    /// Similarity of two vocabulary words, in `[-1, 1]`.
    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError>;

    /// Up to `top_k` words closest to the `positive` set, best first.
    ///
    /// The positive words themselves are never returned.
    fn nearest_neighbors(
        &self,
        positive: &[&str],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, EmbeddingError>;
}

impl<T: EmbeddingModel + ?Sized> EmbeddingModel for &T {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        (**self).similarity(a, b)
    }

    fn nearest_neighbors(
        &self,
        positive: &[&str],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, EmbeddingError> {
        (**self).nearest_neighbors(positive, top_k)
    }
}

impl<T: EmbeddingModel + ?Sized> EmbeddingModel for Box<T> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        (**self).similarity(a, b)
    }

    fn nearest_neighbors(
        &self,
        positive: &[&str],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, EmbeddingError> {
        (**self).nearest_neighbors(positive, top_k)
    }
}

impl<T: EmbeddingModel + ?Sized> EmbeddingModel for Arc<T> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        (**self).similarity(a, b)
    }

    fn nearest_neighbors(
        &self,
        positive: &[&str],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, EmbeddingError> {
        (**self).nearest_neighbors(positive, top_k)
    }
}
