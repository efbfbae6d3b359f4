//! The 25-card board.
//!
//! Dealing is the only place allegiances are decided: a fixed colour
//! multiset (9 Blue, 8 Red, 7 Bystander, 1 Assassin) is shuffled and
//! paired positionally with the first 25 distinct words. After that the
//! only mutation is revealing a card.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::card::{Card, CardView};
use crate::core::{
    Allegiance, GameError, GameRng, InvalidGuess, ASSASSIN_CARDS, BLUE_CARDS, BOARD_SIZE,
    BYSTANDER_CARDS, RED_CARDS,
};

/// A dealt board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Board {
    /// Deal a board from `words` using `rng` for the colour permutation.
    ///
    /// Fails with `InsufficientWords` if fewer than 25 distinct words are given.
    pub fn deal<S: AsRef<str>>(words: &[S], rng: &mut GameRng) -> Result<Self, GameError> {
        let mut seen = FxHashSet::default();
        let distinct: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .take(BOARD_SIZE)
            .collect();

        if distinct.len() < BOARD_SIZE {
            return Err(GameError::InsufficientWords {
                found: distinct.len(),
                required: BOARD_SIZE,
            });
        }

        let mut colours = colour_multiset();
        rng.shuffle(&mut colours);

        let cards: Vec<Card> = distinct
            .into_iter()
            .zip(colours)
            .map(|(word, allegiance)| Card::new(word, allegiance))
            .collect();

        tracing::debug!(seed = rng.seed(), "dealt board");
        Ok(Self::from_cards(cards))
    }

    /// Build a board from explicit word/allegiance pairs.
    ///
    /// The pairs must hold exactly the standard colour counts and distinct
    /// words. Useful for replaying a known layout.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (S, Allegiance)>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut cards = Vec::with_capacity(BOARD_SIZE);
        for (word, allegiance) in assignments {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                return Err(GameError::InvalidLayout(format!(
                    "word {word:?} is blank or repeated"
                )));
            }
            cards.push(Card::new(word, allegiance));
        }

        let mut expected = colour_multiset();
        let mut actual: Vec<Allegiance> = cards.iter().map(Card::allegiance).collect();
        expected.sort_by_key(|a| *a as u8);
        actual.sort_by_key(|a| *a as u8);
        if expected != actual {
            return Err(GameError::InvalidLayout(format!(
                "expected {BLUE_CARDS} blue, {RED_CARDS} red, {BYSTANDER_CARDS} bystander \
                 and {ASSASSIN_CARDS} assassin cards"
            )));
        }

        Ok(Self::from_cards(cards))
    }

    fn from_cards(cards: Vec<Card>) -> Self {
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.word().to_string(), i))
            .collect();
        Self { cards, index }
    }

    /// Rebuild the word lookup after deserialization.
    #[must_use]
    pub fn reindexed(self) -> Self {
        Self::from_cards(self.cards)
    }

    /// Number of cards (always 25 for a dealt board).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the board empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `index`.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Position of `word` on the board.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied().or_else(|| {
            let lower = word.to_lowercase();
            self.cards.iter().position(|c| c.word() == lower)
        })
    }

    /// Is `word` (case-insensitive) printed on any card, revealed or not?
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    /// Every word of the given allegiance.
    pub fn words_of(&self, allegiance: Allegiance) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .filter(move |c| c.allegiance() == allegiance)
            .map(Card::word)
    }

    /// Unrevealed words of the given allegiance.
    pub fn unrevealed_words_of(&self, allegiance: Allegiance) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .filter(move |c| c.allegiance() == allegiance && !c.is_revealed())
            .map(Card::word)
    }

    /// Count of unrevealed cards with the given allegiance.
    #[must_use]
    pub fn remaining(&self, allegiance: Allegiance) -> usize {
        self.unrevealed_words_of(allegiance).count()
    }

    /// The assassin card.
    #[must_use]
    pub fn assassin(&self) -> Option<&Card> {
        self.cards
            .iter()
            .find(|c| c.allegiance() == Allegiance::Assassin)
    }

    /// Reveal the card at `index`, returning its allegiance.
    pub(crate) fn reveal(&mut self, index: usize) -> Result<Allegiance, InvalidGuess> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(InvalidGuess::OutOfRange { index, len })?;
        if !card.reveal() {
            return Err(InvalidGuess::AlreadyRevealed(index));
        }
        Ok(card.allegiance())
    }

    /// Guesser projection: allegiances only for revealed cards.
    #[must_use]
    pub fn views(&self) -> Vec<CardView> {
        self.cards.iter().map(Card::view).collect()
    }

    /// Spymaster projection: every allegiance visible.
    #[must_use]
    pub fn key(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .map(|c| CardView {
                word: c.word().to_string(),
                revealed: c.is_revealed(),
                allegiance: Some(c.allegiance()),
            })
            .collect()
    }
}

fn colour_multiset() -> Vec<Allegiance> {
    let mut colours = Vec::with_capacity(BOARD_SIZE);
    colours.extend(std::iter::repeat(Allegiance::Blue).take(BLUE_CARDS));
    colours.extend(std::iter::repeat(Allegiance::Red).take(RED_CARDS));
    colours.extend(std::iter::repeat(Allegiance::Bystander).take(BYSTANDER_CARDS));
    colours.extend(std::iter::repeat(Allegiance::Assassin).take(ASSASSIN_CARDS));
    colours
}
