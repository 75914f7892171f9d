//! Klondike.
//!
//! Seven tableau piles built down in alternating colors, four foundations
//! built up by suit from the Ace, and a stock dealt one card at a time onto
//! the waste. The game is won when every foundation is topped by a King.

mod behaviors;
mod game;

pub use behaviors::{FoundationBehavior, StockBehavior, TableauBehavior, WasteBehavior};
pub use game::Klondike;
