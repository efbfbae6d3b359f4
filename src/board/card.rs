//! Board cards.
//!
//! A `Card` is created once when the board is dealt. Its word and
//! allegiance never change; `revealed` only ever goes from false to true.

use serde::{Deserialize, Serialize};

use crate::core::Allegiance;

/// A single card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    word: String,
    allegiance: Allegiance,
    revealed: bool,
}

impl Card {
    pub(crate) fn new(word: String, allegiance: Allegiance) -> Self {
        Self {
            word,
            allegiance,
            revealed: false,
        }
    }

    /// The word printed on the card.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Hidden identity of the card.
    #[must_use]
    pub fn allegiance(&self) -> Allegiance {
        self.allegiance
    }

    /// Has the card been guessed?
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Turn the card face up. Returns false if it already was.
    pub(crate) fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }

    /// What a guesser may see of this card.
    #[must_use]
    pub fn view(&self) -> CardView {
        CardView {
            word: self.word.clone(),
            revealed: self.revealed,
            allegiance: self.revealed.then_some(self.allegiance),
        }
    }
}

/// Read-only projection of a card for presentation layers.
///
/// `allegiance` is `None` until the card is revealed, except in the
/// spymaster key where it is always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub word: String,
    pub revealed: bool,
    pub allegiance: Option<Allegiance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_is_one_way() {
        let mut card = Card::new("moon".into(), Allegiance::Red);
        assert!(!card.is_revealed());

        assert!(card.reveal());
        assert!(card.is_revealed());

        assert!(!card.reveal());
        assert!(card.is_revealed());
    }

    #[test]
    fn test_view_hides_allegiance() {
        let mut card = Card::new("moon".into(), Allegiance::Assassin);
        assert_eq!(card.view().allegiance, None);

        card.reveal();
        assert_eq!(card.view().allegiance, Some(Allegiance::Assassin));
    }
}
