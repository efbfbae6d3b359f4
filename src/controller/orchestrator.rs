//! Game orchestration.
//!
//! `GameController` owns the board, the turn state and the clue engine for
//! one game at a time, and is the only thing that mutates them. Hosts call
//! its operations and read its projections; nothing else holds a reference
//! to the board or state.
//!
//! ## Clue requests
//!
//! Clues can be produced inline (`request_clue`, and automatically at the
//! start of an automated team's turn) or handed off:
//!
//! ```text
//! begin_clue_request() -> ClueRequest   // game now rejects guesses
//! request.resolve(&model)               // anywhere, any thread
//! complete_clue_request(ticket, result) // applied, or discarded if stale
//! ```

use std::time::Instant;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::scheduler::{DeferredAction, Scheduler};
use super::view::{Scoreboard, Status};
use crate::board::{Board, CardView, WordSource};
use crate::clue::ClueEngine;
use crate::core::{Allegiance, Clue, GameConfig, GameError, GameRng, Team};
use crate::embedding::EmbeddingModel;
use crate::state::{GameResult, GameState, Phase, RevealOutcome, Transition, TurnEvent};

/// Identifies an outstanding offloaded clue request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClueTicket {
    generation: u64,
    serial: u64,
}

/// Everything needed to compute a clue away from the controller.
#[derive(Clone, Debug)]
pub struct ClueRequest {
    ticket: ClueTicket,
    team: Team,
    board: Board,
    used_clues: FxHashSet<String>,
    engine: ClueEngine,
}

impl ClueRequest {
    #[must_use]
    pub fn ticket(&self) -> ClueTicket {
        self.ticket
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    /// Run the engine against a board snapshot.
    pub fn resolve<M: EmbeddingModel + ?Sized>(&self, model: &M) -> Result<Clue, GameError> {
        self.engine
            .generate(self.team, &self.board, model, &self.used_clues)
    }
}

struct Game {
    board: Board,
    state: GameState,
    used_clues: FxHashSet<String>,
    pending: Option<ClueTicket>,
}

impl Game {
    fn install_clue(&mut self, clue: Clue) -> Result<Status, GameError> {
        let team = self.state.current_team();
        let status = Status::ClueGiven {
            team,
            word: clue.word.clone(),
            count: clue.count,
        };
        let word = clue.word.to_lowercase();
        tracing::info!(%team, clue = %clue, generated = clue.is_generated(), "clue accepted");
        self.state.accept_clue(clue)?;
        self.used_clues.insert(word);
        Ok(status)
    }
}

/// Orchestrates board, turn state and clue engine for one game at a time.
pub struct GameController<M> {
    model: M,
    config: GameConfig,
    engine: ClueEngine,
    automated: SmallVec<[Team; 2]>,
    game: Option<Game>,
    generation: u64,
    next_serial: u64,
    scheduler: Scheduler,
    status: Status,
    announced: Option<GameResult>,
}

impl<M: EmbeddingModel> GameController<M> {
    /// Controller with both spymasters automated and no game dealt yet.
    pub fn new(model: M, config: GameConfig) -> Self {
        Self {
            model,
            engine: ClueEngine::new(config.clue.clone()),
            config,
            automated: SmallVec::from_slice(&Team::ALL),
            game: None,
            generation: 0,
            next_serial: 0,
            scheduler: Scheduler::new(),
            status: Status::Idle,
            announced: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    // === Operations ===

    /// Deal a new board and start the first turn.
    ///
    /// Supersedes the current game: scheduled tasks are cancelled and any
    /// outstanding clue request will be discarded. Only dealing can fail;
    /// if the opening clue cannot be generated the game waits in
    /// `AwaitingClue` and the status says why.
    pub fn new_game<W: WordSource + ?Sized>(
        &mut self,
        words: &W,
        mut rng: GameRng,
    ) -> Result<(), GameError> {
        let mut pool: Vec<&str> = words.words().iter().map(String::as_str).collect();
        if self.config.shuffle_words {
            rng.for_context("words").shuffle(&mut pool);
        }
        let board = Board::deal(&pool, &mut rng)?;

        let cancelled = self.scheduler.cancel_all();
        self.generation += 1;
        self.announced = None;

        let starting_team = self.config.starting_team;
        self.game = Some(Game {
            board,
            state: GameState::new(starting_team),
            used_clues: FxHashSet::default(),
            pending: None,
        });
        self.status = Status::AwaitingClue {
            team: starting_team,
        };
        tracing::info!(
            generation = self.generation,
            seed = rng.seed(),
            %starting_team,
            cancelled,
            "new game"
        );

        self.begin_turn();
        Ok(())
    }

    /// Automate only `team`'s spymaster; the other team gives manual clues.
    pub fn choose_spymaster_team(&mut self, team: Team) {
        self.automated = SmallVec::from_slice(&[team]);

        let waiting = self.game.as_ref().is_some_and(|g| {
            g.pending.is_none()
                && g.state.phase() == Phase::AwaitingClue
                && g.state.current_team() == team
        });
        if waiting {
            self.begin_turn();
        }
    }

    /// Teams whose clues the engine generates automatically.
    #[must_use]
    pub fn automated_teams(&self) -> &[Team] {
        &self.automated
    }

    /// Generate and accept a clue for the current team now.
    pub fn request_clue(&mut self) -> Result<Clue, GameError> {
        let game = ready(&mut self.game)?;
        expect_awaiting_clue(&game.state, "request a clue")?;

        let team = game.state.current_team();
        match self
            .engine
            .generate(team, &game.board, &self.model, &game.used_clues)
        {
            Ok(clue) => {
                self.status = game.install_clue(clue.clone())?;
                Ok(clue)
            }
            Err(err) => {
                tracing::warn!(%team, error = %err, "clue generation failed");
                self.status = Status::ClueUnavailable {
                    team,
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Accept a clue typed in by a human spymaster.
    ///
    /// The word must be a single token, not on the board, and (unless
    /// `reject_used` is off) not a clue already given this game.
    pub fn give_clue(&mut self, word: &str, count: u8) -> Result<(), GameError> {
        let game = ready(&mut self.game)?;
        expect_awaiting_clue(&game.state, "give a clue")?;

        let word = word.trim().to_lowercase();
        if !self.config.clue.is_single_token(&word) {
            return Err(GameError::InvalidClue {
                word,
                reason: "clues must be a single word".into(),
            });
        }
        if game.board.contains_word(&word) {
            return Err(GameError::InvalidClue {
                word,
                reason: "that word is on the board".into(),
            });
        }
        if self.config.clue.reject_used && game.used_clues.contains(&word) {
            return Err(GameError::InvalidClue {
                word,
                reason: "that clue was already given this game".into(),
            });
        }

        self.status = game.install_clue(Clue::manual(word, count))?;
        Ok(())
    }

    /// Reveal a card for the current team.
    pub fn reveal(&mut self, index: usize) -> Result<RevealOutcome, GameError> {
        let game = ready(&mut self.game)?;
        let team = game.state.current_team();
        let outcome = game.state.reveal(&mut game.board, index)?;

        tracing::debug!(
            %team,
            index,
            word = %outcome.word,
            allegiance = %outcome.allegiance,
            transition = ?outcome.transition,
            "card revealed"
        );

        self.status = Status::Guessed {
            team,
            word: outcome.word.clone(),
            allegiance: outcome.allegiance,
            transition: outcome.transition,
        };
        if let Transition::GameOver(result) = outcome.transition {
            self.finish(result, outcome.allegiance == Allegiance::Assassin);
        }
        Ok(outcome)
    }

    /// Stop guessing for this turn.
    pub fn pass_turn(&mut self) -> Result<(), GameError> {
        let game = ready(&mut self.game)?;
        game.state.pass_turn()?;
        self.status = Status::Passed {
            team: game.state.current_team(),
        };
        Ok(())
    }

    /// Hand the turn over; automated spymasters clue immediately.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        let game = ready(&mut self.game)?;
        game.state.end_turn()?;
        self.status = Status::AwaitingClue {
            team: game.state.current_team(),
        };
        self.begin_turn();
        Ok(())
    }

    /// Snapshot the current turn for off-controller clue generation.
    ///
    /// Until the request completes, guesses, turn changes and other clue
    /// requests are refused with `CluePending`.
    pub fn begin_clue_request(&mut self) -> Result<ClueRequest, GameError> {
        let game = ready(&mut self.game)?;
        expect_awaiting_clue(&game.state, "request a clue")?;

        let ticket = ClueTicket {
            generation: self.generation,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        game.pending = Some(ticket);

        let team = game.state.current_team();
        self.status = Status::CluePending { team };
        Ok(ClueRequest {
            ticket,
            team,
            board: game.board.clone(),
            used_clues: game.used_clues.clone(),
            engine: self.engine.clone(),
        })
    }

    /// Apply the result of an offloaded clue request.
    ///
    /// Returns `Ok(false)` if the request was superseded (new game, game
    /// over, or unknown ticket) and the result was thrown away.
    pub fn complete_clue_request(
        &mut self,
        ticket: ClueTicket,
        result: Result<Clue, GameError>,
    ) -> Result<bool, GameError> {
        let current = ticket.generation == self.generation;
        let Some(game) = self.game.as_mut().filter(|g| current && g.pending == Some(ticket)) else {
            tracing::warn!(?ticket, generation = self.generation, "discarding stale clue result");
            return Ok(false);
        };
        game.pending = None;
        if game.state.is_over() {
            tracing::warn!(?ticket, "discarding clue result after game over");
            return Ok(false);
        }

        let team = game.state.current_team();
        match result {
            Ok(clue) => {
                self.status = game.install_clue(clue)?;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(%team, error = %err, "offloaded clue generation failed");
                self.status = Status::ClueUnavailable {
                    team,
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Is an offloaded clue request outstanding?
    #[must_use]
    pub fn is_clue_pending(&self) -> bool {
        self.game.as_ref().is_some_and(|g| g.pending.is_some())
    }

    /// Run every scheduled action due at `now`. Returns how many fired.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        for (generation, action) in self.scheduler.take_due(now) {
            if generation != self.generation {
                continue;
            }
            match action {
                DeferredAction::AnnounceResult(result) => self.announce(result),
            }
            fired += 1;
        }
        fired
    }

    /// Number of scheduled actions still waiting.
    #[must_use]
    pub fn scheduled_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // === Projections ===

    /// The board, if a game has been dealt.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.game.as_ref().map(|g| &g.board)
    }

    /// The turn state, if a game has been dealt.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref().map(|g| &g.state)
    }

    /// Guesser view of every card.
    #[must_use]
    pub fn board_view(&self) -> Vec<CardView> {
        self.board().map(Board::views).unwrap_or_default()
    }

    /// Spymaster view: every allegiance visible.
    #[must_use]
    pub fn spymaster_view(&self) -> Vec<CardView> {
        self.board().map(Board::key).unwrap_or_default()
    }

    #[must_use]
    pub fn scoreboard(&self) -> Option<Scoreboard> {
        self.board().map(Scoreboard::from_board)
    }

    #[must_use]
    pub fn active_clue(&self) -> Option<&Clue> {
        self.state().and_then(GameState::active_clue)
    }

    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.state().map(GameState::phase)
    }

    #[must_use]
    pub fn current_team(&self) -> Option<Team> {
        self.state().map(GameState::current_team)
    }

    #[must_use]
    pub fn guesses_remaining(&self) -> u32 {
        self.state().map_or(0, GameState::guesses_remaining)
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state().and_then(GameState::result)
    }

    /// Transition log of the current game.
    #[must_use]
    pub fn history(&self) -> Vec<TurnEvent> {
        self.state()
            .map(|s| s.history().iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub fn status_message(&self) -> String {
        self.status.to_string()
    }

    /// The winner, once the game-over announcement has fired.
    #[must_use]
    pub fn game_over_notice(&self) -> Option<GameResult> {
        self.announced
    }

    // === Internals ===

    fn begin_turn(&mut self) {
        let Some(team) = self.current_team() else {
            return;
        };
        if !self.automated.contains(&team) {
            self.status = Status::AwaitingClue { team };
            return;
        }
        // Failure is already recorded in the status.
        let _ = self.request_clue();
    }

    fn finish(&mut self, result: GameResult, assassin: bool) {
        tracing::info!(%result, assassin, generation = self.generation, "game over");
        self.status = Status::GameOver { result, assassin };

        let delay = self.config.announce_delay;
        if delay.is_zero() {
            self.announce(result);
            return;
        }
        match Instant::now().checked_add(delay) {
            Some(due) => {
                self.scheduler.schedule(
                    due,
                    self.generation,
                    DeferredAction::AnnounceResult(result),
                );
            }
            None => {
                tracing::warn!(?delay, "announce delay out of range, announcing now");
                self.announce(result);
            }
        }
    }

    fn announce(&mut self, result: GameResult) {
        self.announced = Some(result);
        self.status = Status::Announced { result };
    }
}

fn ready(game: &mut Option<Game>) -> Result<&mut Game, GameError> {
    let game = game.as_mut().ok_or(GameError::NoActiveGame)?;
    if game.pending.is_some() {
        return Err(GameError::CluePending);
    }
    Ok(game)
}

fn expect_awaiting_clue(state: &GameState, action: &'static str) -> Result<(), GameError> {
    if state.phase() == Phase::AwaitingClue {
        Ok(())
    } else {
        Err(GameError::WrongPhase {
            action,
            phase: state.phase(),
        })
    }
}
