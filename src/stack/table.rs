//! The stack arena.
//!
//! `Table` owns every stack of a game (including the selection's holding
//! pen), the operation log and the shuffle RNG. All card mutations go
//! through its operation methods:
//!
//! - the operation is validated, so a bad id or count fails before any
//!   state changes
//! - its logical phase runs immediately
//! - it is appended to the log for display replay

use std::rc::Rc;

use log::debug;

use super::operation::{Operation, OperationLog};
use super::view::StackView;
use super::{Stack, StackId};
use crate::core::{Card, CardMetrics, Deck, EngineError, GameRng};
use crate::rules::{Behavior, DefaultBehavior};

pub struct Table {
    stacks: Vec<Stack>,
    log: OperationLog,
    rng: GameRng,
    metrics: CardMetrics,
    default_behavior: Rc<dyn Behavior>,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new(metrics: CardMetrics, rng: GameRng) -> Self {
        Self {
            stacks: Vec::new(),
            log: OperationLog::new(),
            rng,
            metrics,
            default_behavior: Rc::new(DefaultBehavior),
        }
    }

    /// Add an empty stack with the default behavior.
    ///
    /// `rel_x`/`rel_y` place the center of its bottom card on a unit screen.
    pub fn add_stack(&mut self, rel_x: f64, rel_y: f64, spread: bool) -> StackId {
        assert!(self.stacks.len() < usize::from(u16::MAX), "Too many stacks");
        let id = StackId::new(self.stacks.len() as u16);
        let view = StackView::new(rel_x, rel_y, spread, self.metrics);
        self.stacks
            .push(Stack::new(id, Rc::clone(&self.default_behavior), view));
        id
    }

    /// Replace a stack's behavior.
    pub fn set_behavior(&mut self, id: StackId, behavior: Rc<dyn Behavior>) -> Result<(), EngineError> {
        self.stack_mut(id)?.set_behavior(behavior);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn stack(&self, id: StackId) -> Result<&Stack, EngineError> {
        self.stacks.get(id.index()).ok_or(EngineError::UnknownStack(id))
    }

    pub fn stack_mut(&mut self, id: StackId) -> Result<&mut Stack, EngineError> {
        self.stacks.get_mut(id.index()).ok_or(EngineError::UnknownStack(id))
    }

    /// All stacks in creation order.
    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }

    #[must_use]
    pub fn metrics(&self) -> CardMetrics {
        self.metrics
    }

    /// The operation log.
    #[must_use]
    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    /// Number of operations waiting for their display phase.
    #[must_use]
    pub fn pending_operations(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    // === Operations ===

    /// Put a deck's cards on top of a stack.
    pub fn load(&mut self, id: StackId, deck: Deck) -> Result<(), EngineError> {
        self.stack(id)?;
        self.submit(Operation::Load {
            stack: id,
            cards: deck.into_cards(),
        });
        Ok(())
    }

    /// Shuffle a stack.
    pub fn shuffle(&mut self, id: StackId) -> Result<(), EngineError> {
        self.stack(id)?;
        self.submit(Operation::Shuffle {
            stack: id,
            shuffled: Vec::new(),
        });
        Ok(())
    }

    /// Move the top `count` cards of `src` onto `dst`.
    ///
    /// The cards keep their relative order. `immediate` moves are spliced
    /// into the display without animation; others slide when flushed.
    /// Fails with `NotEnoughCards` if `src` holds fewer than `count` cards.
    pub fn move_to(
        &mut self,
        src: StackId,
        dst: StackId,
        count: usize,
        immediate: bool,
    ) -> Result<(), EngineError> {
        let available = self.stack(src)?.len();
        self.stack(dst)?;
        if count > available {
            return Err(EngineError::NotEnoughCards {
                stack: src,
                requested: count,
                available,
            });
        }
        self.submit(Operation::Move {
            src,
            dst,
            count,
            immediate,
        });
        Ok(())
    }

    /// Flip the top card. A no-op on an empty stack.
    pub fn flip_top(&mut self, id: StackId) -> Result<(), EngineError> {
        self.stack(id)?;
        self.submit(Operation::FlipTop { stack: id });
        Ok(())
    }

    /// Turn every card face up or face down.
    pub fn set_all_face_up(&mut self, id: StackId, face_up: bool) -> Result<(), EngineError> {
        self.stack(id)?;
        self.submit(Operation::SetAllFaceUp { stack: id, face_up });
        Ok(())
    }

    /// Remove every card.
    pub fn clear(&mut self, id: StackId) -> Result<(), EngineError> {
        self.stack(id)?;
        self.submit(Operation::Clear { stack: id });
        Ok(())
    }

    fn submit(&mut self, mut op: Operation) {
        op.run_logic(self);
        debug!("logged {:?}", op);
        self.log.push(op);
    }

    // === Crate internals ===

    pub(crate) fn cards_mut(&mut self, id: StackId) -> &mut Vec<Card> {
        &mut self.stacks[id.index()].cards
    }

    pub(crate) fn view_mut(&mut self, id: StackId) -> &mut StackView {
        &mut self.stacks[id.index()].view
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub(crate) fn take_operation(&mut self) -> Option<Operation> {
        self.log.pop()
    }

    pub(crate) fn log_mut(&mut self) -> &mut OperationLog {
        &mut self.log
    }

    pub(crate) fn stacks_mut(&mut self) -> impl Iterator<Item = &mut Stack> {
        self.stacks.iter_mut()
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("stacks", &self.stacks)
            .field("pending", &self.log.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};

    fn table() -> Table {
        Table::new(CardMetrics::default(), GameRng::new(42))
    }

    fn five_clubs() -> Deck {
        Deck::from_cards(Rank::ALL[..5].iter().map(|&r| Card::new(Suit::Clubs, r, false))).unwrap()
    }

    #[test]
    fn test_logic_runs_immediately() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        let b = t.add_stack(0.9, 0.1, false);

        t.load(a, five_clubs()).unwrap();
        t.move_to(a, b, 2, false).unwrap();

        assert_eq!(t.stack(a).unwrap().len(), 3);
        assert_eq!(t.stack(b).unwrap().len(), 2);
        // Display untouched until flush
        assert_eq!(t.stack(a).unwrap().view().len(), 0);
        assert_eq!(t.pending_operations(), 2);
    }

    #[test]
    fn test_move_keeps_order() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        let b = t.add_stack(0.9, 0.1, false);
        t.load(a, five_clubs()).unwrap();

        t.move_to(a, b, 3, true).unwrap();

        let ranks: Vec<_> = t.stack(b).unwrap().cards().iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Three, Rank::Four, Rank::Five]);
    }

    #[test]
    fn test_move_too_many_rejected_without_mutation() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        let b = t.add_stack(0.9, 0.1, false);
        t.load(a, five_clubs()).unwrap();
        let pending = t.pending_operations();

        let err = t.move_to(a, b, 6, false).unwrap_err();
        assert!(matches!(
            err,
            EngineError::NotEnoughCards { requested: 6, available: 5, .. }
        ));
        assert_eq!(t.stack(a).unwrap().len(), 5);
        assert_eq!(t.pending_operations(), pending);
    }

    #[test]
    fn test_unknown_stack() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        assert!(matches!(
            t.flip_top(StackId::new(7)),
            Err(EngineError::UnknownStack(id)) if id == StackId::new(7)
        ));
        assert!(t.move_to(a, StackId::new(9), 0, true).is_err());
    }

    #[test]
    fn test_flip_and_set_all() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        t.load(a, five_clubs()).unwrap();

        t.flip_top(a).unwrap();
        assert!(t.stack(a).unwrap().top().unwrap().face_up);
        assert!(!t.stack(a).unwrap().cards()[0].face_up);

        t.set_all_face_up(a, true).unwrap();
        assert!(t.stack(a).unwrap().cards().iter().all(|c| c.face_up));

        // Flipping an empty stack is allowed and does nothing
        let empty = t.add_stack(0.5, 0.5, false);
        t.flip_top(empty).unwrap();
        assert!(t.stack(empty).unwrap().is_empty());
    }

    #[test]
    fn test_shuffle_records_display_copy() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        t.load(a, Deck::standard()).unwrap();
        t.shuffle(a).unwrap();

        let logical = t.stack(a).unwrap().cards().to_vec();
        match t.log().iter().last() {
            Some(Operation::Shuffle { shuffled, .. }) => assert_eq!(shuffled, &logical),
            other => panic!("expected shuffle, got {:?}", other),
        }
    }

    #[test]
    fn test_clear() {
        let mut t = table();
        let a = t.add_stack(0.1, 0.1, false);
        t.load(a, five_clubs()).unwrap();
        t.clear(a).unwrap();
        assert!(t.stack(a).unwrap().is_empty());
    }
}
