//! Move rules.
//!
//! Games express their rules through two traits:
//! - [`SequenceChecker`]: which runs of cards are legal on a kind of pile
//! - [`Behavior`]: how a pile reacts to clicks, issuing table operations
//!   when a move is legal
//!
//! The dispatcher locates the target stack and calls into its behavior; it
//! never interprets game-specific concepts directly.

pub mod behavior;
pub mod sequence;

pub use behavior::{Behavior, DefaultBehavior, RuleGroup};
pub use sequence::{AscendingSameSuit, DescendingAlternating, SequenceChecker};
