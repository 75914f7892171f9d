//! Card identity: suit, rank, and a mutable face-up flag.
//!
//! The deck domain is fixed at 52 identities. Two cards are equal when their
//! `(suit, rank)` identity matches; the face-up flag never takes part in
//! equality or hashing.
//!
//! ```
//! use card_forest::core::{Card, Rank, Suit};
//!
//! let mut card = Card::new(Suit::Hearts, Rank::Seven, false);
//! card.flip();
//! assert!(card.face_up);
//! assert_eq!(card, Card::new(Suit::Hearts, Rank::Seven, false));
//! assert_eq!(card.to_string(), "Seven of Hearts");
//! ```

use serde::{Deserialize, Serialize};

/// Number of suits in the deck domain.
pub const NUM_SUITS: usize = 4;
/// Number of ranks in the deck domain.
pub const NUM_RANKS: usize = 13;
/// Number of distinct card identities.
pub const DECK_SIZE: usize = NUM_SUITS * NUM_RANKS;

/// Suit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// The four suits, in deck order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; NUM_SUITS] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Color of the suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }

    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// The thirteen ranks, Ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Deuce,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, Ace first.
    pub const ALL: [Rank; NUM_RANKS] = [
        Rank::Ace,
        Rank::Deuce,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Zero-based position (Ace = 0, King = 12).
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// The rank one above this one, `None` for King.
    #[must_use]
    pub fn next(self) -> Option<Rank> {
        Rank::ALL.get(self.ordinal() + 1).copied()
    }

    /// The rank one below this one, `None` for Ace.
    #[must_use]
    pub fn prev(self) -> Option<Rank> {
        self.ordinal().checked_sub(1).map(|i| Rank::ALL[i])
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Ace => "Ace",
            Rank::Deuce => "Deuce",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        };
        f.write_str(name)
    }
}

/// A playing card.
///
/// Cards are small `Copy` values, so a display mirror always holds its own
/// copies and can never alias the logical cards of a stack.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    /// Whether the face is shown when the card is visible.
    pub face_up: bool,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank, face_up: bool) -> Self {
        Self { suit, rank, face_up }
    }

    /// Build a card from its deck index (`suit * 13 + rank`).
    ///
    /// Panics if `index >= 52`.
    #[must_use]
    pub fn from_index(index: usize, face_up: bool) -> Self {
        assert!(index < DECK_SIZE, "card index {} out of deck domain", index);
        Self {
            suit: Suit::ALL[index / NUM_RANKS],
            rank: Rank::ALL[index % NUM_RANKS],
            face_up,
        }
    }

    /// Position of this identity in the 52-value deck domain.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.suit.ordinal() * NUM_RANKS + self.rank.ordinal()
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// Turn the card over.
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_face() {
        let up = Card::new(Suit::Spades, Rank::Queen, true);
        let down = Card::new(Suit::Spades, Rank::Queen, false);
        assert_eq!(up, down);

        let mut set = HashSet::new();
        set.insert(up);
        assert!(set.contains(&down));
    }

    #[test]
    fn test_index_round_trip_covers_domain() {
        let mut seen = HashSet::new();
        for i in 0..DECK_SIZE {
            let card = Card::from_index(i, false);
            assert_eq!(card.index(), i);
            seen.insert(card);
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }

    #[test]
    #[should_panic(expected = "out of deck domain")]
    fn test_from_index_out_of_range() {
        let _ = Card::from_index(52, false);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
    }

    #[test]
    fn test_rank_steps() {
        assert_eq!(Rank::Ace.next(), Some(Rank::Deuce));
        assert_eq!(Rank::King.next(), None);
        assert_eq!(Rank::Ace.prev(), None);
        assert_eq!(Rank::King.prev(), Some(Rank::Queen));
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Clubs, Rank::Ace, false).to_string(), "Ace of Clubs");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ten, true).to_string(), "Ten of Diamonds");
    }
}
