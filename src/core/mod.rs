//! Core types: teams, clues, RNG, configuration, errors.
//!
//! Everything here is shared by the board, the state machine, the clue
//! engine and the controller.

pub mod team;
pub mod clue;
pub mod rng;
pub mod config;
pub mod error;

pub use team::{Allegiance, Team};
pub use clue::Clue;
pub use rng::GameRng;
pub use config::{
    GameConfig, ASSASSIN_CARDS, BLUE_CARDS, BOARD_SIZE, BYSTANDER_CARDS, RED_CARDS,
};
pub use error::{GameError, InvalidGuess, LoadError};
