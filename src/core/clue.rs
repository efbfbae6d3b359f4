//! Clues: a single word plus the number of board words it points at.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A spymaster clue.
///
/// Engine clues carry the own-team words they were chosen for and their
/// score; manual clues carry neither.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    /// The clue word (a single lowercase token).
    pub word: String,

    /// How many board words the clue refers to.
    pub count: u8,

    /// Own-team words the clue covers, strongest first.
    pub targets: SmallVec<[String; 4]>,

    /// Engine score, `None` for manual clues.
    pub score: Option<f32>,
}

impl Clue {
    /// A clue typed in by a human spymaster.
    #[must_use]
    pub fn manual(word: impl Into<String>, count: u8) -> Self {
        Self {
            word: word.into(),
            count,
            targets: SmallVec::new(),
            score: None,
        }
    }

    /// Was this clue produced by the engine?
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.score.is_some()
    }
}

impl std::fmt::Display for Clue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.word, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clue() {
        let clue = Clue::manual("ocean", 2);
        assert_eq!(clue.to_string(), "ocean (2)");
        assert!(clue.targets.is_empty());
        assert!(!clue.is_generated());
    }
}
