//! Game configuration.
//!
//! `GameConfig` collects the knobs a host sets once per controller:
//! - which team opens the game
//! - whether a large word source is sampled before dealing
//! - how long the game-over announcement is held back
//! - clue engine parameters (`ClueConfig`)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::team::Team;
use crate::clue::ClueConfig;

/// Number of cards on a board.
pub const BOARD_SIZE: usize = 25;

/// Cards dealt to the Blue team.
pub const BLUE_CARDS: usize = 9;

/// Cards dealt to the Red team.
pub const RED_CARDS: usize = 8;

/// Neutral cards.
pub const BYSTANDER_CARDS: usize = 7;

/// Assassin cards.
pub const ASSASSIN_CARDS: usize = 1;

/// Controller-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Team that gives the first clue. Defaults to Blue, the nine-card team.
    pub starting_team: Team,

    /// Draw a random 25-word sample from the source instead of taking the
    /// first 25 distinct words.
    pub shuffle_words: bool,

    /// Delay between the final reveal and the game-over announcement.
    pub announce_delay: Duration,

    /// Clue engine parameters.
    pub clue: ClueConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_team: Team::Blue,
            shuffle_words: true,
            announce_delay: Duration::from_millis(1500),
            clue: ClueConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the opening team.
    pub fn with_starting_team(mut self, team: Team) -> Self {
        self.starting_team = team;
        self
    }

    /// Enable or disable word sampling.
    pub fn with_shuffle_words(mut self, shuffle: bool) -> Self {
        self.shuffle_words = shuffle;
        self
    }

    /// Set the game-over announcement delay.
    pub fn with_announce_delay(mut self, delay: Duration) -> Self {
        self.announce_delay = delay;
        self
    }

    /// Replace the clue engine parameters.
    pub fn with_clue(mut self, clue: ClueConfig) -> Self {
        self.clue = clue;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_board() {
        assert_eq!(
            BLUE_CARDS + RED_CARDS + BYSTANDER_CARDS + ASSASSIN_CARDS,
            BOARD_SIZE
        );
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.starting_team, Team::Blue);
        assert!(config.shuffle_words);
        assert_eq!(config.clue.top_k, 200);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_starting_team(Team::Red)
            .with_shuffle_words(false)
            .with_announce_delay(Duration::ZERO);

        assert_eq!(config.starting_team, Team::Red);
        assert!(!config.shuffle_words);
        assert_eq!(config.announce_delay, Duration::ZERO);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_starting_team(Team::Red);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
