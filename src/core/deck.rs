//! Deck construction.
//!
//! Stacks never check for duplicate identities; a deck is the only place
//! cards enter the game, so duplicates are rejected here.

use rustc_hash::FxHashSet;

use super::card::{Card, Rank, Suit, DECK_SIZE};
use super::error::EngineError;

/// An ordered set of distinct cards, bottom first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full 52-card deck, face down, in suit then rank order.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank, false)))
            .collect();
        Self { cards }
    }

    /// Build a deck from arbitrary cards.
    ///
    /// Returns `DuplicateCard` if the same identity appears twice.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, EngineError> {
        let cards: Vec<Card> = cards.into_iter().collect();
        let mut seen = FxHashSet::default();
        for card in &cards {
            if !seen.insert(*card) {
                return Err(EngineError::DuplicateCard(*card));
            }
        }
        debug_assert!(cards.len() <= DECK_SIZE);
        Ok(Self { cards })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consume the deck, yielding cards bottom first.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.cards().iter().all(|c| !c.face_up));
        assert_eq!(deck.cards()[0], Card::new(Suit::Clubs, Rank::Ace, false));
        assert_eq!(deck.cards()[51], Card::new(Suit::Spades, Rank::King, false));
    }

    #[test]
    fn test_duplicate_rejected() {
        let ace = Card::new(Suit::Hearts, Rank::Ace, false);
        let result = Deck::from_cards([ace, Card::new(Suit::Hearts, Rank::Ace, true)]);
        assert!(matches!(result, Err(EngineError::DuplicateCard(c)) if c == ace));
    }

    #[test]
    fn test_partial_deck() {
        let deck = Deck::from_cards(Deck::standard().into_cards().into_iter().take(10)).unwrap();
        assert_eq!(deck.len(), 10);
        assert!(!deck.is_empty());
    }
}
