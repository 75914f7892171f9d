//! Two stacks.
//!
//! Ten face-up cards start on the left pile. Any card can be picked up with
//! everything above it and dropped on any pile; a double click sends the
//! held cards to the pile's partner. The game is won when the left pile is
//! empty.

mod game;

pub use game::{PartnerBehavior, TwoStacks};
