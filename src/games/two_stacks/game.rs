use std::rc::Rc;

use log::info;

use crate::board::Board;
use crate::core::{Deck, EngineError};
use crate::games::GameVariant;
use crate::rules::{Behavior, RuleGroup};
use crate::stack::StackId;

/// Cards dealt onto the left pile.
pub const DEAL_SIZE: usize = 10;

const PARTNER: RuleGroup = RuleGroup(10);

/// Single-card pile rule with a fixed partner pile.
#[derive(Clone, Debug)]
pub struct PartnerBehavior {
    partner: StackId,
}

impl PartnerBehavior {
    #[must_use]
    pub fn new(partner: StackId) -> Self {
        Self { partner }
    }
}

impl Behavior for PartnerBehavior {
    fn click(&self, board: &mut Board, stack: StackId, card_index: Option<usize>) -> Result<(), EngineError> {
        if board.selection().is_held() {
            board.select_end(Some(stack))
        } else if let Some(index) = card_index {
            board.select(stack, index)
        } else {
            Ok(())
        }
    }

    fn double_click(&self, board: &mut Board, _stack: StackId, _card_index: Option<usize>) -> Result<(), EngineError> {
        if board.selection().is_held() {
            board.select_end(Some(self.partner))?;
        }
        Ok(())
    }

    fn group(&self) -> RuleGroup {
        PARTNER
    }
}

#[derive(Clone, Debug)]
pub struct TwoStacks {
    deck: StackId,
    left: StackId,
    right: StackId,
    middle: StackId,
}

impl TwoStacks {
    #[must_use]
    pub fn left(&self) -> StackId {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> StackId {
        self.right
    }

    #[must_use]
    pub fn middle(&self) -> StackId {
        self.middle
    }
}

impl GameVariant for TwoStacks {
    fn build(board: &mut Board) -> Result<Self, EngineError> {
        let left = board.add_stack(0.2, 0.5, true);
        let right = board.add_stack(0.8, 0.5, true);
        let middle = board.add_stack(0.5, 0.6, true);
        let deck = board.table_mut().add_stack(0.0, 0.0, false);

        let table = board.table_mut();
        table.set_behavior(left, Rc::new(PartnerBehavior::new(right)))?;
        table.set_behavior(right, Rc::new(PartnerBehavior::new(left)))?;
        table.set_behavior(middle, Rc::new(PartnerBehavior::new(left)))?;

        Ok(Self {
            deck,
            left,
            right,
            middle,
        })
    }

    fn name(&self) -> &'static str {
        "Two Stacks"
    }

    fn deal(&mut self, board: &mut Board) -> Result<(), EngineError> {
        let table = board.table_mut();
        table.clear(self.deck)?;
        table.load(self.deck, Deck::standard())?;
        table.move_to(self.deck, self.left, DEAL_SIZE, true)?;
        table.set_all_face_up(self.left, true)?;
        info!("dealt {} cards onto {}", DEAL_SIZE, self.left);
        Ok(())
    }

    fn is_game_won(&self, board: &Board) -> bool {
        if board.selection().source() == Some(self.left) {
            return false;
        }
        board.table().stack(self.left).map_or(false, |s| s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::motion::InstantDriver;

    #[test]
    fn test_partner_double_click_moves_held_cards() {
        let mut board = Board::new(EngineConfig::default().with_seed(1)).unwrap();
        let mut game = TwoStacks::build(&mut board).unwrap();
        game.deal(&mut board).unwrap();
        board.flush(&mut InstantDriver);

        board.select(game.middle(), 0).unwrap_err();
        board.select(game.left(), 7).unwrap();
        let behavior = board.table().stack(game.middle()).unwrap().behavior_handle();
        behavior.double_click(&mut board, game.middle(), None).unwrap();

        assert!(!board.selection().is_held());
        assert_eq!(board.table().stack(game.left()).unwrap().len(), 10);
        assert_eq!(board.table().stack(game.right()).unwrap().len(), 0);
    }
}
