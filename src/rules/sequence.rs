//! Run-legality policies.
//!
//! ## Key Types
//!
//! - [`SequenceChecker`]: starter and pairwise predicates, plus the derived
//!   whole-run check
//! - [`AscendingSameSuit`]: foundation piles, built up from the Ace
//! - [`DescendingAlternating`]: tableau piles, built down from the King in
//!   alternating colors

use crate::core::{Card, Rank};

/// A policy defining legal runs of cards.
pub trait SequenceChecker {
    /// Whether `card` may start a run on an empty pile.
    fn is_valid_starter(&self, card: &Card) -> bool;

    /// Whether `next` may be placed directly on `prev`.
    fn is_sequential(&self, prev: &Card, next: &Card) -> bool;

    /// Whether `cards` (bottom first) form a legal run.
    ///
    /// Every consecutive pair must be sequential. With `require_starter` the
    /// bottom card must also be a valid starter. An empty run is valid.
    fn is_valid_sequence(&self, cards: &[Card], require_starter: bool) -> bool {
        if let (true, Some(first)) = (require_starter, cards.first()) {
            if !self.is_valid_starter(first) {
                return false;
            }
        }
        cards.windows(2).all(|pair| self.is_sequential(&pair[0], &pair[1]))
    }
}

/// Same suit, rank ascending by one, starting from the Ace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AscendingSameSuit;

impl SequenceChecker for AscendingSameSuit {
    fn is_valid_starter(&self, card: &Card) -> bool {
        card.rank == Rank::Ace
    }

    fn is_sequential(&self, prev: &Card, next: &Card) -> bool {
        prev.suit == next.suit && prev.rank.next() == Some(next.rank)
    }
}

/// Alternating colors, rank descending by one, starting from the King.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DescendingAlternating;

impl SequenceChecker for DescendingAlternating {
    fn is_valid_starter(&self, card: &Card) -> bool {
        card.rank == Rank::King
    }

    fn is_sequential(&self, prev: &Card, next: &Card) -> bool {
        prev.color() != next.color() && prev.rank.prev() == Some(next.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank, true)
    }

    #[test]
    fn test_empty_run_is_valid() {
        assert!(AscendingSameSuit.is_valid_sequence(&[], true));
        assert!(AscendingSameSuit.is_valid_sequence(&[], false));
        assert!(DescendingAlternating.is_valid_sequence(&[], true));
        assert!(DescendingAlternating.is_valid_sequence(&[], false));
    }

    #[test]
    fn test_ascending_same_suit() {
        let c = AscendingSameSuit;
        assert!(c.is_sequential(&card(Suit::Clubs, Rank::Ace), &card(Suit::Clubs, Rank::Deuce)));
        assert!(!c.is_sequential(&card(Suit::Clubs, Rank::Deuce), &card(Suit::Clubs, Rank::Ace)));
        assert!(!c.is_sequential(&card(Suit::Clubs, Rank::Ace), &card(Suit::Spades, Rank::Deuce)));
        assert!(c.is_valid_starter(&card(Suit::Hearts, Rank::Ace)));
        assert!(!c.is_valid_starter(&card(Suit::Hearts, Rank::King)));
    }

    #[test]
    fn test_descending_alternating() {
        let c = DescendingAlternating;
        assert!(c.is_sequential(&card(Suit::Hearts, Rank::Seven), &card(Suit::Spades, Rank::Six)));
        assert!(!c.is_sequential(&card(Suit::Hearts, Rank::Seven), &card(Suit::Diamonds, Rank::Six)));
        assert!(!c.is_sequential(&card(Suit::Hearts, Rank::Seven), &card(Suit::Spades, Rank::Eight)));
        assert!(c.is_valid_starter(&card(Suit::Spades, Rank::King)));
        assert!(!c.is_valid_starter(&card(Suit::Spades, Rank::Queen)));
    }

    #[test]
    fn test_sequence_requires_starter_only_when_asked() {
        let run = [
            card(Suit::Hearts, Rank::Queen),
            card(Suit::Clubs, Rank::Jack),
            card(Suit::Diamonds, Rank::Ten),
        ];
        assert!(DescendingAlternating.is_valid_sequence(&run, false));
        assert!(!DescendingAlternating.is_valid_sequence(&run, true));

        let broken = [card(Suit::Hearts, Rank::Queen), card(Suit::Hearts, Rank::Jack)];
        assert!(!DescendingAlternating.is_valid_sequence(&broken, false));
    }

    #[test]
    fn test_single_card_run() {
        let king = [card(Suit::Spades, Rank::King)];
        assert!(DescendingAlternating.is_valid_sequence(&king, true));
        assert!(!AscendingSameSuit.is_valid_sequence(&king, true));
        assert!(AscendingSameSuit.is_valid_sequence(&king, false));
    }
}
