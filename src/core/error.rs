//! Engine error type.
//!
//! Only precondition violations surface as errors. Illegal moves are not
//! errors: a rule that rejects a move simply leaves the state unchanged.

use thiserror::Error;

use super::card::Card;
use crate::stack::StackId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} does not exist on this table")]
    UnknownStack(StackId),

    #[error("cannot move {requested} cards from {stack}, it holds {available}")]
    NotEnoughCards {
        stack: StackId,
        requested: usize,
        available: usize,
    },

    #[error("selection start {index} is out of range for {stack} of size {len}")]
    SelectionIndexOutOfRange {
        stack: StackId,
        index: usize,
        len: usize,
    },

    #[error("a selection from {0} is already held")]
    SelectionHeld(StackId),

    #[error("duplicate card in deck: {0}")]
    DuplicateCard(Card),

    #[error("snapshot holds {found} stacks, table has {expected}")]
    SnapshotMismatch { expected: usize, found: usize },

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("input queue is closed")]
    InputClosed,
}
