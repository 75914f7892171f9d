//! Core engine types: cards, decks, geometry, RNG, configuration, errors.
//!
//! Nothing in this module knows about stacks or rules; games and the
//! higher layers build on these value types.

pub mod card;
pub mod deck;
pub mod geometry;
pub mod rng;
pub mod config;
pub mod error;

pub use card::{Card, Color, Rank, Suit, DECK_SIZE};
pub use deck::Deck;
pub use geometry::{Point, Rect};
pub use rng::{GameRng, GameRngState};
pub use config::{CardMetrics, EngineConfig};
pub use error::EngineError;
