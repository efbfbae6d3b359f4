//! Turn state machine.
//!
//! ## Transitions
//!
//! ```text
//! AwaitingClue --accept_clue--> Guessing --reveal--> Guessing
//!                                   |                   |
//!                                   +--> TurnResolution <+
//!                                   |         |
//!                                   |     end_turn --> AwaitingClue (other team)
//!                                   +--> GameOver (terminal)
//! ```
//!
//! An assassin reveal always ends the game before the card-count win check
//! is looked at. Every rejected operation leaves the state untouched.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::{GameResult, Phase, RevealOutcome, Transition, TurnEnd, TurnEvent};
use crate::board::Board;
use crate::core::{Allegiance, Clue, GameError, InvalidGuess, Team};

/// Turn, clue and guess bookkeeping for one game.
///
/// Uses an `im` vector for the event log so snapshots are O(1) clones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    current_team: Team,
    active_clue: Option<Clue>,
    guesses_remaining: u32,
    guesses_made: u32,
    phase: Phase,
    result: Option<GameResult>,
    turn_number: u32,
    history: Vector<TurnEvent>,
}

impl GameState {
    /// Fresh state awaiting the first clue from `starting_team`.
    #[must_use]
    pub fn new(starting_team: Team) -> Self {
        Self {
            current_team: starting_team,
            active_clue: None,
            guesses_remaining: 0,
            guesses_made: 0,
            phase: Phase::AwaitingClue,
            result: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    // === Read access ===

    #[must_use]
    pub fn current_team(&self) -> Team {
        self.current_team
    }

    #[must_use]
    pub fn active_clue(&self) -> Option<&Clue> {
        self.active_clue.as_ref()
    }

    #[must_use]
    pub fn guesses_remaining(&self) -> u32 {
        self.guesses_remaining
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Every transition since the game started, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnEvent> {
        &self.history
    }

    /// The most recent transition.
    #[must_use]
    pub fn last_event(&self) -> Option<&TurnEvent> {
        self.history.last()
    }

    // === Transitions ===

    /// Accept a clue and open guessing with `count + 1` guesses.
    pub fn accept_clue(&mut self, clue: Clue) -> Result<(), GameError> {
        self.expect_phase(Phase::AwaitingClue, "accept a clue")?;

        self.guesses_remaining = u32::from(clue.count) + 1;
        self.guesses_made = 0;
        self.history.push_back(TurnEvent::ClueGiven {
            team: self.current_team,
            word: clue.word.clone(),
            count: clue.count,
        });
        self.active_clue = Some(clue);
        self.phase = Phase::Guessing;
        Ok(())
    }

    /// Reveal the card at `index` on `board` for the current team.
    pub fn reveal(&mut self, board: &mut Board, index: usize) -> Result<RevealOutcome, GameError> {
        if self.phase != Phase::Guessing {
            return Err(InvalidGuess::NotGuessing(self.phase).into());
        }
        if self.guesses_remaining == 0 {
            return Err(InvalidGuess::NoGuessesRemaining.into());
        }

        let allegiance = board.reveal(index)?;
        let team = self.current_team;
        self.guesses_remaining -= 1;
        self.guesses_made += 1;
        self.history.push_back(TurnEvent::Revealed {
            team,
            index,
            allegiance,
        });

        let transition = if allegiance == Allegiance::Assassin {
            self.finish(GameResult::won_by(team.opponent()))
        } else if let Some(cleared) = cleared_team(board) {
            self.finish(GameResult::won_by(cleared))
        } else if !allegiance.is_team(team) {
            self.guesses_remaining = 0;
            self.phase = Phase::TurnResolution;
            Transition::TurnOver(if allegiance == Allegiance::Bystander {
                TurnEnd::Bystander
            } else {
                TurnEnd::OpponentCard
            })
        } else if self.guesses_remaining == 0 {
            self.phase = Phase::TurnResolution;
            Transition::TurnOver(TurnEnd::GuessesExhausted)
        } else {
            Transition::KeepGuessing {
                remaining: self.guesses_remaining,
            }
        };

        let word = board
            .card(index)
            .map(|c| c.word().to_string())
            .unwrap_or_default();

        Ok(RevealOutcome {
            index,
            word,
            allegiance,
            transition,
        })
    }

    /// Stop guessing early. At least one card must have been revealed this turn.
    pub fn pass_turn(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::Guessing, "pass")?;
        if self.guesses_made == 0 {
            return Err(InvalidGuess::NoGuessMadeYet.into());
        }

        self.guesses_remaining = 0;
        self.phase = Phase::TurnResolution;
        self.history.push_back(TurnEvent::Passed {
            team: self.current_team,
        });
        Ok(())
    }

    /// Hand the turn to the other team.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::TurnResolution, "end the turn")?;

        self.history.push_back(TurnEvent::TurnEnded {
            team: self.current_team,
        });
        self.current_team = self.current_team.opponent();
        self.active_clue = None;
        self.guesses_remaining = 0;
        self.guesses_made = 0;
        self.turn_number += 1;
        self.phase = Phase::AwaitingClue;
        Ok(())
    }

    fn finish(&mut self, result: GameResult) -> Transition {
        self.phase = Phase::GameOver;
        self.result = Some(result);
        self.history.push_back(TurnEvent::GameOver { result });
        Transition::GameOver(result)
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }
}

fn cleared_team(board: &Board) -> Option<Team> {
    Team::ALL
        .into_iter()
        .find(|&team| board.remaining(team.into()) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Blue: 0-8, Red: 9-16, Bystander: 17-23, Assassin: 24.
    fn board() -> Board {
        let layout = (0..25).map(|i| {
            let allegiance = match i {
                0..=8 => Allegiance::Blue,
                9..=16 => Allegiance::Red,
                17..=23 => Allegiance::Bystander,
                _ => Allegiance::Assassin,
            };
            (format!("w{i}"), allegiance)
        });
        Board::from_assignments(layout).unwrap()
    }

    fn guessing(count: u8) -> GameState {
        let mut state = GameState::new(Team::Blue);
        state.accept_clue(Clue::manual("hint", count)).unwrap();
        state
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(Team::Red);
        assert_eq!(state.phase(), Phase::AwaitingClue);
        assert_eq!(state.current_team(), Team::Red);
        assert_eq!(state.guesses_remaining(), 0);
        assert!(state.result().is_none());
    }

    #[test]
    fn test_accept_clue() {
        let state = guessing(2);
        assert_eq!(state.phase(), Phase::Guessing);
        assert_eq!(state.guesses_remaining(), 3);
        assert_eq!(state.active_clue().unwrap().word, "hint");
    }

    #[test]
    fn test_accept_clue_twice_rejected() {
        let mut state = guessing(1);
        let err = state.accept_clue(Clue::manual("again", 1)).unwrap_err();
        assert_eq!(
            err,
            GameError::WrongPhase {
                action: "accept a clue",
                phase: Phase::Guessing
            }
        );
    }

    #[test]
    fn test_exhaust_guesses() {
        let mut board = board();
        let mut state = guessing(2);

        for i in 0..2 {
            let outcome = state.reveal(&mut board, i).unwrap();
            assert!(matches!(outcome.transition, Transition::KeepGuessing { .. }));
        }
        let outcome = state.reveal(&mut board, 2).unwrap();

        assert_eq!(
            outcome.transition,
            Transition::TurnOver(TurnEnd::GuessesExhausted)
        );
        assert_eq!(state.phase(), Phase::TurnResolution);
        assert_eq!(state.guesses_remaining(), 0);
    }

    #[test]
    fn test_bystander_ends_turn() {
        let mut board = board();
        let mut state = guessing(3);

        let outcome = state.reveal(&mut board, 17).unwrap();

        assert_eq!(outcome.transition, Transition::TurnOver(TurnEnd::Bystander));
        assert_eq!(state.guesses_remaining(), 0);
        assert_eq!(state.phase(), Phase::TurnResolution);
    }

    #[test]
    fn test_opponent_card_ends_turn() {
        let mut board = board();
        let mut state = guessing(3);

        let outcome = state.reveal(&mut board, 9).unwrap();

        assert_eq!(outcome.allegiance, Allegiance::Red);
        assert_eq!(outcome.transition, Transition::TurnOver(TurnEnd::OpponentCard));
    }

    #[test]
    fn test_assassin_ends_game() {
        let mut board = board();
        let mut state = guessing(1);

        let outcome = state.reveal(&mut board, 24).unwrap();

        assert_eq!(outcome.transition, Transition::GameOver(GameResult::RedWins));
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.result(), Some(GameResult::RedWins));
    }

    #[test]
    fn test_last_card_wins() {
        let mut board = board();
        let mut state = guessing(9);

        for i in 0..8 {
            state.reveal(&mut board, i).unwrap();
        }
        let outcome = state.reveal(&mut board, 8).unwrap();

        assert_eq!(outcome.transition, Transition::GameOver(GameResult::BlueWins));
        assert!(state.is_over());
    }

    #[test]
    fn test_revealing_opponents_last_card_hands_them_the_win() {
        let mut board = board();
        for i in 9..16 {
            board.reveal(i).unwrap();
        }
        let mut state = guessing(1);

        let outcome = state.reveal(&mut board, 16).unwrap();

        assert_eq!(outcome.transition, Transition::GameOver(GameResult::RedWins));
    }

    #[test]
    fn test_invalid_reveals_are_noops() {
        let mut board = board();
        let mut state = GameState::new(Team::Blue);

        assert_eq!(
            state.reveal(&mut board, 0),
            Err(InvalidGuess::NotGuessing(Phase::AwaitingClue).into())
        );

        state.accept_clue(Clue::manual("hint", 1)).unwrap();
        assert_eq!(
            state.reveal(&mut board, 99),
            Err(InvalidGuess::OutOfRange { index: 99, len: 25 }.into())
        );

        state.reveal(&mut board, 0).unwrap();
        let before = state.clone();
        assert_eq!(
            state.reveal(&mut board, 0),
            Err(InvalidGuess::AlreadyRevealed(0).into())
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_end_turn() {
        let mut board = board();
        let mut state = guessing(0);

        assert!(state.end_turn().is_err());

        state.reveal(&mut board, 0).unwrap();
        state.end_turn().unwrap();

        assert_eq!(state.current_team(), Team::Red);
        assert_eq!(state.phase(), Phase::AwaitingClue);
        assert!(state.active_clue().is_none());
        assert_eq!(state.turn_number(), 2);
    }

    #[test]
    fn test_pass_turn() {
        let mut board = board();
        let mut state = guessing(2);

        assert_eq!(
            state.pass_turn(),
            Err(InvalidGuess::NoGuessMadeYet.into())
        );

        state.reveal(&mut board, 0).unwrap();
        state.pass_turn().unwrap();

        assert_eq!(state.phase(), Phase::TurnResolution);
        assert_eq!(state.guesses_remaining(), 0);
        assert_eq!(
            state.last_event(),
            Some(&TurnEvent::Passed { team: Team::Blue })
        );
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut board = board();
        let mut state = guessing(1);
        state.reveal(&mut board, 24).unwrap();

        let snapshot = state.clone();
        assert!(state.reveal(&mut board, 0).is_err());
        assert!(state.end_turn().is_err());
        assert!(state.pass_turn().is_err());
        assert!(state.accept_clue(Clue::manual("late", 1)).is_err());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_history() {
        let mut board = board();
        let mut state = guessing(1);
        state.reveal(&mut board, 17).unwrap();
        state.end_turn().unwrap();

        let events: Vec<_> = state.history().iter().cloned().collect();
        assert_eq!(
            events,
            vec![
                TurnEvent::ClueGiven {
                    team: Team::Blue,
                    word: "hint".into(),
                    count: 1
                },
                TurnEvent::Revealed {
                    team: Team::Blue,
                    index: 17,
                    allegiance: Allegiance::Bystander
                },
                TurnEvent::TurnEnded { team: Team::Blue },
            ]
        );
    }

    #[test]
    fn test_state_serde() {
        let state = guessing(2);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
