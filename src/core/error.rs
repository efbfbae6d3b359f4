//! Error types.
//!
//! `GameError` covers everything the rules engine and controller can
//! report. Only `InsufficientWords` is fatal to a game; the rest leave the
//! board and turn state intact.
//!
//! `LoadError` covers reading word lists and vector files.

use thiserror::Error;

use super::team::Team;
use crate::state::Phase;

/// Errors reported by the board, state machine, clue engine and controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("need at least {required} distinct words to deal a board, found {found}")]
    InsufficientWords { found: usize, required: usize },

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    #[error("none of {team}'s unrevealed words are in the embedding vocabulary")]
    NoValidWords { team: Team },

    #[error("no eligible clue for {team} among the top {top_k} neighbours")]
    NoCandidate { team: Team, top_k: usize },

    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] InvalidGuess),

    #[error("invalid clue {word:?}: {reason}")]
    InvalidClue { word: String, reason: String },

    #[error("cannot {action} while {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("embedding model unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("no game in progress")]
    NoActiveGame,

    #[error("a clue request is still pending")]
    CluePending,
}

/// Why a reveal was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGuess {
    #[error("not accepting guesses while {0}")]
    NotGuessing(Phase),

    #[error("no guesses remaining this turn")]
    NoGuessesRemaining,

    #[error("card {index} is out of range (board has {len} cards)")]
    OutOfRange { index: usize, len: usize },

    #[error("card {0} is already revealed")]
    AlreadyRevealed(usize),

    #[error("at least one guess is required before passing")]
    NoGuessMadeYet,
}

/// Errors reading word lists and embedding files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },
}

impl LoadError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        LoadError::Format {
            line,
            message: message.into(),
        }
    }
}
