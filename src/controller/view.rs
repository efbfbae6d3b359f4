//! Read-only projections handed to presentation layers.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Allegiance, Team};
use crate::state::{GameResult, Transition, TurnEnd};

/// Unrevealed cards left per team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub blue_remaining: usize,
    pub red_remaining: usize,
}

impl Scoreboard {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            blue_remaining: board.remaining(Allegiance::Blue),
            red_remaining: board.remaining(Allegiance::Red),
        }
    }

    #[must_use]
    pub fn remaining(&self, team: Team) -> usize {
        match team {
            Team::Blue => self.blue_remaining,
            Team::Red => self.red_remaining,
        }
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blue {} - Red {}", self.blue_remaining, self.red_remaining)
    }
}

/// What the last controller transition means for the players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Status {
    Idle,
    AwaitingClue { team: Team },
    CluePending { team: Team },
    ClueGiven { team: Team, word: String, count: u8 },
    ClueUnavailable { team: Team, reason: String },
    Guessed {
        team: Team,
        word: String,
        allegiance: Allegiance,
        transition: Transition,
    },
    Passed { team: Team },
    GameOver { result: GameResult, assassin: bool },
    Announced { result: GameResult },
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => write!(f, "No game in progress"),
            Status::AwaitingClue { team } => write!(f, "Waiting for {team}'s spymaster"),
            Status::CluePending { team } => write!(f, "{team}'s spymaster is thinking"),
            Status::ClueGiven { team, word, count } => {
                write!(f, "{team} clue: {word} ({count})")
            }
            Status::ClueUnavailable { team, reason } => {
                write!(f, "No clue for {team}: {reason}")
            }
            Status::Guessed {
                team,
                word,
                allegiance,
                transition,
            } => {
                write!(f, "{word} is {allegiance}. ")?;
                match transition {
                    Transition::KeepGuessing { remaining: 1 } => write!(f, "1 guess left"),
                    Transition::KeepGuessing { remaining } => write!(f, "{remaining} guesses left"),
                    Transition::TurnOver(TurnEnd::GuessesExhausted) => {
                        write!(f, "{team} is out of guesses")
                    }
                    Transition::TurnOver(_) => write!(f, "{team}'s turn is over"),
                    Transition::GameOver(result) => write!(f, "{result}"),
                }
            }
            Status::Passed { team } => write!(f, "{team} stops guessing"),
            Status::GameOver {
                result,
                assassin: true,
            } => write!(f, "The assassin was revealed. {result}"),
            Status::GameOver { result, .. } => write!(f, "{result}"),
            Status::Announced { result } => write!(f, "Game over: {result}!"),
        }
    }
}
