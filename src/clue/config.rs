//! Clue engine parameters.

use serde::{Deserialize, Serialize};

/// Clue engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClueConfig {
    /// Neighbours requested from the model per clue (default: 200).
    pub top_k: usize,

    /// Added to the danger term so the score never divides by zero.
    pub epsilon: f32,

    /// Characters that mark a multi-token vocabulary entry (`new_york`).
    /// Whitespace always counts.
    pub phrase_markers: Vec<char>,

    /// Skip words already given as clues this game.
    pub reject_used: bool,

    /// Also skip candidates that contain, or are contained in, a board word.
    pub reject_board_substrings: bool,

    /// A team word counts towards the clue number only if its similarity
    /// to the clue beats the danger by more than this margin.
    pub count_margin: f32,
}

impl Default for ClueConfig {
    fn default() -> Self {
        Self {
            top_k: 200,
            epsilon: 1e-6,
            phrase_markers: vec!['_'],
            reject_used: true,
            reject_board_substrings: false,
            count_margin: 0.0,
        }
    }
}

impl ClueConfig {
    /// Set the neighbour count.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Toggle the substring filter.
    pub fn with_board_substrings_rejected(mut self, reject: bool) -> Self {
        self.reject_board_substrings = reject;
        self
    }

    /// Set the count margin.
    pub fn with_count_margin(mut self, margin: f32) -> Self {
        self.count_margin = margin;
        self
    }

    /// Is `word` a single token under these markers?
    #[must_use]
    pub fn is_single_token(&self, word: &str) -> bool {
        !word.is_empty()
            && !word
                .chars()
                .any(|c| c.is_whitespace() || self.phrase_markers.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClueConfig::default();
        assert_eq!(config.top_k, 200);
        assert_eq!(config.epsilon, 1e-6);
        assert!(config.reject_used);
        assert!(!config.reject_board_substrings);
    }

    #[test]
    fn test_single_token() {
        let config = ClueConfig::default();
        assert!(config.is_single_token("ocean"));
        assert!(!config.is_single_token("new_york"));
        assert!(!config.is_single_token("ice cream"));
        assert!(!config.is_single_token(""));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClueConfig::default()
            .with_top_k(50)
            .with_board_substrings_rejected(true)
            .with_count_margin(0.1);

        assert_eq!(config.top_k, 50);
        assert!(config.reject_board_substrings);
        assert_eq!(config.count_margin, 0.1);
    }
}
