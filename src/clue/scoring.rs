//! Relevance/danger scoring of a single candidate.
//!
//! ```text
//! team_score(c) = sum of sim(c, w) over own-team words w
//! danger(c)     = max of sim(c, w) over opposing words and the assassin, floored at 0
//! score(c)      = team_score(c) / (danger(c) + epsilon)
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::embedding::{EmbeddingError, EmbeddingModel};

/// Relevance-over-risk ratio.
///
/// Negative danger is floored at zero, so every negative danger scores the
/// same as zero. For non-negative danger and positive `team_score` the
/// ratio falls strictly as danger rises.
#[must_use]
pub fn clue_score(team_score: f32, danger: f32, epsilon: f32) -> f32 {
    team_score / (danger.max(0.0) + epsilon)
}

/// A candidate with its score breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub word: String,
    pub team_score: f32,
    pub danger: f32,
    pub score: f32,
    /// Similarity to each own-team word, strongest first.
    pub similarities: SmallVec<[(String, f32); 9]>,
}

impl ScoredCandidate {
    /// Own-team words whose similarity beats the danger by more than `margin`.
    ///
    /// Never empty: the single closest word is kept even when nothing clears
    /// the bar.
    #[must_use]
    pub fn targets(&self, margin: f32) -> SmallVec<[String; 4]> {
        let threshold = self.danger + margin;
        let mut targets: SmallVec<[String; 4]> = self
            .similarities
            .iter()
            .filter(|(_, sim)| *sim > threshold)
            .map(|(word, _)| word.clone())
            .collect();
        if targets.is_empty() {
            targets.extend(self.similarities.first().map(|(word, _)| word.clone()));
        }
        targets
    }
}

/// Score `candidate` against the given own-team and danger words.
///
/// All words must be in the model's vocabulary.
pub fn score_candidate<M: EmbeddingModel + ?Sized>(
    model: &M,
    candidate: &str,
    team_words: &[&str],
    danger_words: &[&str],
    epsilon: f32,
) -> Result<ScoredCandidate, EmbeddingError> {
    let mut similarities = SmallVec::<[(String, f32); 9]>::new();
    for &word in team_words {
        similarities.push((word.to_string(), model.similarity(candidate, word)?));
    }
    let team_score = similarities.iter().map(|(_, sim)| sim).sum::<f32>();

    let mut danger = 0.0f32;
    for &word in danger_words {
        danger = danger.max(model.similarity(candidate, word)?);
    }

    similarities.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(ScoredCandidate {
        word: candidate.to_string(),
        team_score,
        danger,
        score: clue_score(team_score, danger, epsilon),
        similarities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        let score = clue_score(1.4, 0.3, 1e-6);
        assert!((score - 4.6666).abs() < 1e-3);
    }

    #[test]
    fn test_zero_danger_is_finite() {
        let score = clue_score(1.0, 0.0, 1e-6);
        assert!(score.is_finite());
        assert!((score - 1e6).abs() < 1.0);
    }

    #[test]
    fn test_negative_danger_is_floored() {
        assert_eq!(clue_score(1.0, -0.5, 1e-6), clue_score(1.0, 0.0, 1e-6));
    }

    #[test]
    fn test_targets_respect_danger() {
        let candidate = ScoredCandidate {
            word: "sea".into(),
            team_score: 1.2,
            danger: 0.4,
            score: 3.0,
            similarities: SmallVec::from_vec(vec![
                ("wave".into(), 0.7),
                ("ship".into(), 0.45),
                ("boot".into(), 0.05),
            ]),
        };

        assert_eq!(candidate.targets(0.0).as_slice(), &["wave", "ship"]);
        assert_eq!(candidate.targets(0.1).as_slice(), &["wave"]);
        assert_eq!(candidate.targets(1.0).as_slice(), &["wave"]);
    }
}
