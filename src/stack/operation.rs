//! Two-phase stack operations and the log that replays them.
//!
//! Every mutation of a stack is an `Operation`. Its logical phase runs on
//! the stack's real cards as soon as it is issued; the operation is then
//! appended to the table's `OperationLog`. When the game loop flushes the
//! log, each operation replays its display phase against the stack's
//! `StackView`, in issue order.
//!
//! The log exists because logic runs ahead of display: by the time the
//! second of two moves is issued, the first has not been drawn yet. Replaying
//! in FIFO order keeps the display consistent with the logical end state.
//!
//! ```
//! use card_forest::board::Board;
//! use card_forest::core::{Deck, EngineConfig};
//! use card_forest::motion::InstantDriver;
//!
//! let mut board = Board::new(EngineConfig::default().with_seed(1)).unwrap();
//! let a = board.table_mut().add_stack(0.2, 0.5, false);
//! let b = board.table_mut().add_stack(0.8, 0.5, false);
//! board.table_mut().load(a, Deck::standard()).unwrap();
//! board.table_mut().move_to(a, b, 3, false).unwrap();
//!
//! // Logic already moved; the display waits for the flush
//! assert_eq!(board.table().stack(b).unwrap().len(), 3);
//! assert_eq!(board.table().stack(b).unwrap().view().len(), 0);
//!
//! board.flush(&mut InstantDriver);
//! assert_eq!(board.table().stack(b).unwrap().view().len(), 3);
//! ```

use std::collections::VecDeque;

use im::Vector;
use log::{trace, warn};

use super::{StackId, Table};
use crate::board::Board;
use crate::core::Card;
use crate::motion::{MotionDriver, SlideMotion};

/// A logged stack mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Put fresh cards on top of a stack.
    Load { stack: StackId, cards: Vec<Card> },

    /// Shuffle a stack. `shuffled` is filled in by the logical phase with a
    /// copy of the resulting order for the display phase.
    Shuffle { stack: StackId, shuffled: Vec<Card> },

    /// Move the top `count` cards of `src` onto `dst`, keeping their order.
    /// Non-immediate moves animate during the display phase.
    Move {
        src: StackId,
        dst: StackId,
        count: usize,
        immediate: bool,
    },

    /// Flip the top card, if any.
    FlipTop { stack: StackId },

    /// Set every card of a stack face up or face down.
    SetAllFaceUp { stack: StackId, face_up: bool },

    /// Remove every card.
    Clear { stack: StackId },
}

impl Operation {
    /// The stack the operation was issued on.
    #[must_use]
    pub fn source(&self) -> StackId {
        match self {
            Operation::Load { stack, .. }
            | Operation::Shuffle { stack, .. }
            | Operation::FlipTop { stack }
            | Operation::SetAllFaceUp { stack, .. }
            | Operation::Clear { stack } => *stack,
            Operation::Move { src, .. } => *src,
        }
    }

    /// Run the logical phase against the table's real cards.
    ///
    /// Ids and counts are validated by the issuing `Table` method.
    pub(crate) fn run_logic(&mut self, table: &mut Table) {
        match self {
            Operation::Load { stack, cards } => {
                table.cards_mut(*stack).extend(cards.iter().copied());
            }
            Operation::Shuffle { stack, shuffled } => {
                let mut cards = std::mem::take(table.cards_mut(*stack));
                table.rng_mut().shuffle(&mut cards);
                *shuffled = cards.clone();
                *table.cards_mut(*stack) = cards;
            }
            Operation::Move { src, dst, count, .. } => {
                let from = table.cards_mut(*src);
                let moved = from.split_off(from.len() - *count);
                table.cards_mut(*dst).extend(moved);
            }
            Operation::FlipTop { stack } => {
                if let Some(top) = table.cards_mut(*stack).last_mut() {
                    top.flip();
                }
            }
            Operation::SetAllFaceUp { stack, face_up } => {
                for card in table.cards_mut(*stack).iter_mut() {
                    card.set_face_up(*face_up);
                }
            }
            Operation::Clear { stack } => table.cards_mut(*stack).clear(),
        }
    }

    /// Run the display phase against the stack views.
    pub(crate) fn replay(self, board: &mut Board, driver: &mut dyn MotionDriver) {
        trace!("replaying {:?}", self);
        match self {
            Operation::Load { stack, cards } => {
                let view = board.table_mut().view_mut(stack);
                view.cards.extend(cards);
                view.update_bounds();
            }
            Operation::Shuffle { stack, shuffled } => {
                let view = board.table_mut().view_mut(stack);
                view.cards = Vector::from(shuffled);
            }
            Operation::Move { src, dst, count, immediate: true } => {
                let table = board.table_mut();
                let from = table.view_mut(src);
                let available = from.cards.len();
                if available < count {
                    warn!("display of {} holds {} cards, expected {}", src, available, count);
                }
                let moved = from.cards.split_off(available - count.min(available));
                from.update_bounds();
                let to = table.view_mut(dst);
                to.cards.append(moved);
                to.update_bounds();
            }
            Operation::Move { src, dst, count, immediate: false } => {
                let mut slide = SlideMotion::new(src, dst, count, board.config());
                driver.play(&mut slide, board);
                let table = board.table_mut();
                table.view_mut(src).update_bounds();
                table.view_mut(dst).update_bounds();
            }
            Operation::FlipTop { stack } => {
                let view = board.table_mut().view_mut(stack);
                if let Some(i) = view.cards.len().checked_sub(1) {
                    if let Some(top) = view.cards.get_mut(i) {
                        top.flip();
                    }
                }
            }
            Operation::SetAllFaceUp { stack, face_up } => {
                let view = board.table_mut().view_mut(stack);
                for card in view.cards.iter_mut() {
                    card.set_face_up(face_up);
                }
            }
            Operation::Clear { stack } => {
                let view = board.table_mut().view_mut(stack);
                view.cards.clear();
                view.update_bounds();
            }
        }
    }
}

/// FIFO of operations whose display phase has not run yet.
///
/// Owned by a single `Table` and touched only by the thread that owns it.
#[derive(Clone, Debug, Default)]
pub struct OperationLog {
    pending: VecDeque<Operation>,
}

impl OperationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, op: Operation) {
        self.pending.push_back(op);
    }

    pub(crate) fn pop(&mut self) -> Option<Operation> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending operations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.pending.iter()
    }

    /// Drop every pending operation without replaying it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_fifo() {
        let mut log = OperationLog::new();
        assert!(log.is_empty());

        log.push(Operation::FlipTop { stack: StackId::new(0) });
        log.push(Operation::Clear { stack: StackId::new(1) });

        assert_eq!(log.len(), 2);
        assert_eq!(log.pop(), Some(Operation::FlipTop { stack: StackId::new(0) }));
        assert_eq!(log.pop(), Some(Operation::Clear { stack: StackId::new(1) }));
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn test_source() {
        let op = Operation::Move {
            src: StackId::new(3),
            dst: StackId::new(4),
            count: 1,
            immediate: false,
        };
        assert_eq!(op.source(), StackId::new(3));
        assert_eq!(Operation::Clear { stack: StackId::new(2) }.source(), StackId::new(2));
    }
}
