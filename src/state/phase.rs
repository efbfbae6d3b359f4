//! Turn phases, game results and transition records.

use serde::{Deserialize, Serialize};

use crate::core::{Allegiance, Team};

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the current team's spymaster.
    AwaitingClue,
    /// Guessers may reveal cards.
    Guessing,
    /// Guessing is over; the turn must be ended.
    TurnResolution,
    /// Terminal.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingClue => write!(f, "awaiting a clue"),
            Phase::Guessing => write!(f, "guessing"),
            Phase::TurnResolution => write!(f, "resolving the turn"),
            Phase::GameOver => write!(f, "the game is over"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    BlueWins,
    RedWins,
}

impl GameResult {
    /// Result in which `team` wins.
    #[must_use]
    pub const fn won_by(team: Team) -> Self {
        match team {
            Team::Blue => GameResult::BlueWins,
            Team::Red => GameResult::RedWins,
        }
    }

    /// The winning team.
    #[must_use]
    pub const fn winner(self) -> Team {
        match self {
            GameResult::BlueWins => Team::Blue,
            GameResult::RedWins => Team::Red,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins", self.winner())
    }
}

/// Why guessing stopped without ending the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnd {
    /// Revealed an opposing team's card.
    OpponentCard,
    /// Revealed a bystander.
    Bystander,
    /// Used every guess the clue allowed.
    GuessesExhausted,
    /// The team chose to stop.
    Passed,
}

/// What a reveal did to the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    KeepGuessing { remaining: u32 },
    TurnOver(TurnEnd),
    GameOver(GameResult),
}

/// Result of a successful reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub index: usize,
    pub word: String,
    pub allegiance: Allegiance,
    pub transition: Transition,
}

/// Entry in the per-game transition log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    ClueGiven { team: Team, word: String, count: u8 },
    Revealed { team: Team, index: usize, allegiance: Allegiance },
    Passed { team: Team },
    TurnEnded { team: Team },
    GameOver { result: GameResult },
}
