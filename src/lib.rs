//! # codenames-engine
//!
//! Rules engine for a Codenames-style word game plus an automated spymaster
//! that picks clues from a word-embedding model.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `GameController` is the only thing that mutates the
//!    board and turn state. Presentation layers read projections.
//!
//! 2. **Injected capabilities**: randomness (`GameRng`) and the embedding
//!    model (`EmbeddingModel`) are passed in, so every deal and every clue
//!    is reproducible in tests.
//!
//! 3. **Explicit state**: turn, clue and guess bookkeeping live in one
//!    `GameState` value with a strict phase machine.
//!
//! ## Clue scoring
//!
//! Candidates are the model's nearest neighbours of the team's unrevealed
//! words, minus board words, phrases and used clues. Each is scored as
//! `sum(sim to own words) / (max(sim to opposing words and assassin) + eps)`.
//!
//! ## Modules
//!
//! - `core`: teams, clues, RNG, configuration, errors
//! - `board`: word sources, cards, the dealt board
//! - `state`: turn phase machine
//! - `embedding`: embedding model trait and in-memory vector model
//! - `clue`: clue scoring and selection
//! - `controller`: orchestration, projections, deferred actions

pub mod core;
pub mod board;
pub mod state;
pub mod embedding;
pub mod clue;
pub mod controller;

// Re-export commonly used types
pub use crate::core::{
    Allegiance, Team, Clue,
    GameRng,
    GameConfig, BOARD_SIZE,
    GameError, InvalidGuess, LoadError,
};

pub use crate::board::{Board, Card, CardView, WordList, WordSource};

pub use crate::state::{GameResult, GameState, Phase, RevealOutcome, Transition, TurnEnd, TurnEvent};

pub use crate::embedding::{EmbeddingError, EmbeddingModel, Neighbor, VectorModel};

pub use crate::clue::{ClueConfig, ClueEngine, ScoredCandidate};

pub use crate::controller::{ClueRequest, ClueTicket, GameController, Scoreboard, Status};
