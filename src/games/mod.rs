//! Game variants.
//!
//! A variant lays out its stacks on a [`Board`], attaches behaviors to
//! them, deals, and decides when the game is won. Everything else (input
//! dispatch, flushing, animation) is shared.
//!
//! - [`klondike`]: Classic one-card-draw Klondike
//! - [`two_stacks`]: Two piles trading cards, for exercising the engine

pub mod klondike;
pub mod two_stacks;

pub use klondike::Klondike;
pub use two_stacks::TwoStacks;

use crate::board::Board;
use crate::core::EngineError;

/// A solitaire variant.
pub trait GameVariant {
    /// Add the variant's stacks and behaviors to an empty board.
    fn build(board: &mut Board) -> Result<Self, EngineError>
    where
        Self: Sized;

    fn name(&self) -> &'static str;

    /// Populate the stacks from a fresh deck.
    ///
    /// Expects the variant's stacks to be empty, as after `build` or a
    /// redeal.
    fn deal(&mut self, board: &mut Board) -> Result<(), EngineError>;

    /// Polled after every settled state.
    fn is_game_won(&self, board: &Board) -> bool;
}
