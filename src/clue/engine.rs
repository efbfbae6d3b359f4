//! Automated spymaster.
//!
//! For the requested team the engine:
//! 1. keeps the team's unrevealed words the model knows
//! 2. asks the model for the `top_k` nearest neighbours of that set
//! 3. drops board words, phrases and already-used clues
//! 4. scores the rest by relevance over danger
//! 5. picks the best score, breaking ties alphabetically
//!
//! Words outside the vocabulary are skipped rather than treated as errors,
//! so a sparse model still produces clues while any team word is known.
//! Neighbours the model cannot score, or that score NaN or infinity, are
//! dropped as well.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::ClueConfig;
use super::scoring::{score_candidate, ScoredCandidate};
use crate::board::Board;
use crate::core::{Allegiance, Clue, GameError, Team};
use crate::embedding::{EmbeddingError, EmbeddingModel};

/// Clue generator. Stateless apart from its configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClueEngine {
    config: ClueConfig,
}

impl ClueEngine {
    #[must_use]
    pub fn new(config: ClueConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClueConfig {
        &self.config
    }

    /// Best clue for `team` on `board`.
    pub fn generate<M: EmbeddingModel + ?Sized>(
        &self,
        team: Team,
        board: &Board,
        model: &M,
        used_clues: &FxHashSet<String>,
    ) -> Result<Clue, GameError> {
        let ranked = self.rank(team, board, model, used_clues)?;
        let best = ranked
            .into_iter()
            .next()
            .ok_or(GameError::NoCandidate {
                team,
                top_k: self.config.top_k,
            })?;

        let targets = best.targets(self.config.count_margin);
        let count = u8::try_from(targets.len()).unwrap_or(u8::MAX);

        tracing::debug!(
            %team,
            clue = %best.word,
            count,
            score = best.score,
            team_score = best.team_score,
            danger = best.danger,
            "selected clue"
        );

        Ok(Clue {
            word: best.word,
            count,
            targets,
            score: Some(best.score),
        })
    }

    /// Every eligible candidate for `team`, best first.
    ///
    /// Fails with `NoValidWords` when none of the team's unrevealed words are
    /// in the vocabulary; an empty list means every neighbour was filtered.
    pub fn rank<M: EmbeddingModel + ?Sized>(
        &self,
        team: Team,
        board: &Board,
        model: &M,
        used_clues: &FxHashSet<String>,
    ) -> Result<Vec<ScoredCandidate>, GameError> {
        let team_words: Vec<&str> = board
            .unrevealed_words_of(team.into())
            .filter(|w| model.contains(w))
            .collect();
        if team_words.is_empty() {
            return Err(GameError::NoValidWords { team });
        }

        let danger_words: Vec<&str> = board
            .unrevealed_words_of(Allegiance::from(team.opponent()))
            .chain(board.unrevealed_words_of(Allegiance::Assassin))
            .filter(|w| model.contains(w))
            .collect();

        let neighbors = model.nearest_neighbors(&team_words, self.config.top_k)?;
        let fetched = neighbors.len();

        let mut ranked = Vec::with_capacity(fetched);
        for neighbor in neighbors {
            if !self.is_eligible(&neighbor.word, board, used_clues) {
                continue;
            }
            let scored = match score_candidate(
                model,
                &neighbor.word,
                &team_words,
                &danger_words,
                self.config.epsilon,
            ) {
                Ok(scored) => scored,
                // Team and danger words were checked against the vocabulary,
                // so only the neighbour itself can be unknown here.
                Err(EmbeddingError::UnknownWord(word)) => {
                    tracing::warn!(
                        %team,
                        candidate = %neighbor.word,
                        unknown = %word,
                        "skipping candidate the model cannot score"
                    );
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !scored.score.is_finite() {
                tracing::warn!(
                    %team,
                    candidate = %scored.word,
                    score = scored.score,
                    "skipping candidate with non-finite score"
                );
                continue;
            }
            ranked.push(scored);
        }

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));

        tracing::debug!(
            %team,
            team_words = team_words.len(),
            danger_words = danger_words.len(),
            fetched,
            eligible = ranked.len(),
            "ranked clue candidates"
        );
        Ok(ranked)
    }

    fn is_eligible(&self, candidate: &str, board: &Board, used_clues: &FxHashSet<String>) -> bool {
        if !self.config.is_single_token(candidate) {
            return false;
        }
        let lower = candidate.to_lowercase();
        if board.contains_word(&lower) {
            return false;
        }
        if self.config.reject_used && used_clues.contains(&lower) {
            return false;
        }
        if self.config.reject_board_substrings
            && board
                .cards()
                .iter()
                .any(|c| lower.contains(c.word()) || c.word().contains(lower.as_str()))
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Neighbor, VectorModel};

    /// Wraps a model and reports a neighbour it has no vector for.
    struct Ghostly(VectorModel);

    impl EmbeddingModel for Ghostly {
        fn contains(&self, word: &str) -> bool {
            self.0.contains(word)
        }

        fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
            self.0.similarity(a, b)
        }

        fn nearest_neighbors(
            &self,
            positive: &[&str],
            top_k: usize,
        ) -> Result<Vec<Neighbor>, EmbeddingError> {
            let mut hits = self.0.nearest_neighbors(positive, top_k)?;
            hits.insert(0, Neighbor::new("ghost", 1.0));
            Ok(hits)
        }
    }

    /// Blue: b0-b8, Red: r0-r7, Bystander: n0-n6, Assassin: x0.
    fn board() -> Board {
        let layout = (0..9)
            .map(|i| (format!("b{i}"), Allegiance::Blue))
            .chain((0..8).map(|i| (format!("r{i}"), Allegiance::Red)))
            .chain((0..7).map(|i| (format!("n{i}"), Allegiance::Bystander)))
            .chain(std::iter::once(("x0".to_string(), Allegiance::Assassin)));
        Board::from_assignments(layout).unwrap()
    }

    /// Axis 0 is "blue-ish", axis 1 "red-ish", axis 2 "assassin-ish".
    fn model() -> VectorModel {
        let mut model = VectorModel::new(3);
        model.insert("b0", &[1.0, 0.0, 0.0]).unwrap();
        model.insert("b1", &[0.9, 0.1, 0.0]).unwrap();
        model.insert("r0", &[0.0, 1.0, 0.0]).unwrap();
        model.insert("x0", &[0.0, 0.0, 1.0]).unwrap();
        model.insert("sky", &[0.95, 0.05, 0.0]).unwrap();
        model.insert("risky", &[0.9, 0.0, 0.6]).unwrap();
        model.insert("fire", &[0.1, 0.9, 0.0]).unwrap();
        model.insert("deep_sea", &[1.0, 0.0, 0.0]).unwrap();
        model
    }

    #[test]
    fn test_generate_prefers_safe_clue() {
        let engine = ClueEngine::default();
        let clue = engine
            .generate(Team::Blue, &board(), &model(), &FxHashSet::default())
            .unwrap();

        assert_eq!(clue.word, "sky");
        assert_eq!(clue.count, 2);
        assert_eq!(clue.targets.as_slice(), &["b0", "b1"]);
        assert!(clue.is_generated());
    }

    #[test]
    fn test_phrases_and_board_words_excluded() {
        let engine = ClueEngine::default();
        let ranked = engine
            .rank(Team::Blue, &board(), &model(), &FxHashSet::default())
            .unwrap();

        assert!(ranked.iter().all(|c| c.word != "deep_sea"));
        assert!(ranked.iter().all(|c| !c.word.starts_with('r') || c.word == "risky"));
        assert!(ranked.iter().all(|c| c.word != "x0"));
    }

    #[test]
    fn test_used_clues_excluded() {
        let engine = ClueEngine::default();
        let used: FxHashSet<String> = ["sky".to_string()].into_iter().collect();

        let clue = engine.generate(Team::Blue, &board(), &model(), &used).unwrap();
        assert_ne!(clue.word, "sky");
    }

    #[test]
    fn test_no_valid_words() {
        let engine = ClueEngine::default();
        let mut model = VectorModel::new(3);
        model.insert("sky", &[1.0, 0.0, 0.0]).unwrap();

        let err = engine
            .generate(Team::Red, &board(), &model, &FxHashSet::default())
            .unwrap_err();
        assert_eq!(err, GameError::NoValidWords { team: Team::Red });
    }

    #[test]
    fn test_no_candidate() {
        let engine = ClueEngine::default();
        let mut model = VectorModel::new(2);
        model.insert("b0", &[1.0, 0.0]).unwrap();
        model.insert("r0", &[0.0, 1.0]).unwrap();
        model.insert("new_york", &[1.0, 0.2]).unwrap();

        let err = engine
            .generate(Team::Blue, &board(), &model, &FxHashSet::default())
            .unwrap_err();
        assert_eq!(
            err,
            GameError::NoCandidate {
                team: Team::Blue,
                top_k: 200
            }
        );
    }

    #[test]
    fn test_substring_filter() {
        let mut model = model();
        model.insert("b0s", &[1.0, 0.01, 0.0]).unwrap();

        let lenient = ClueEngine::default();
        let strict = ClueEngine::new(ClueConfig::default().with_board_substrings_rejected(true));
        let none = FxHashSet::default();

        assert_eq!(lenient.generate(Team::Blue, &board(), &model, &none).unwrap().word, "b0s");
        assert_eq!(strict.generate(Team::Blue, &board(), &model, &none).unwrap().word, "sky");
    }

    #[test]
    fn test_unscorable_neighbor_skipped() {
        let engine = ClueEngine::default();
        let clue = engine
            .generate(Team::Blue, &board(), &Ghostly(model()), &FxHashSet::default())
            .unwrap();

        assert_eq!(clue.word, "sky");
    }
}
