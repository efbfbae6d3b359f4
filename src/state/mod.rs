//! Turn/clue/guess state machine.
//!
//! - `phase`: phases, results, transition records
//! - `machine`: `GameState`, the single value that owns turn progression

pub mod phase;
pub mod machine;

pub use phase::{GameResult, Phase, RevealOutcome, Transition, TurnEnd, TurnEvent};
pub use machine::GameState;
