//! Klondike pile rules.

use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Card, EngineError};
use crate::rules::{AscendingSameSuit, Behavior, DescendingAlternating, RuleGroup, SequenceChecker};
use crate::stack::StackId;

const FOUNDATION: RuleGroup = RuleGroup(1);
const TABLEAU: RuleGroup = RuleGroup(2);
const STOCK: RuleGroup = RuleGroup(3);
const WASTE: RuleGroup = RuleGroup(4);

/// The single held card, if exactly one card is held.
fn held_single(board: &Board) -> Result<Option<Card>, EngineError> {
    if !board.selection().is_held() {
        return Ok(None);
    }
    match board.selection().cards(board.table())? {
        [card] => Ok(Some(*card)),
        _ => Ok(None),
    }
}

/// Whether `card` may go onto `pile` as a foundation move.
fn fits_foundation(board: &Board, pile: StackId, card: &Card) -> Result<bool, EngineError> {
    Ok(match board.table().stack(pile)?.top() {
        None => AscendingSameSuit.is_valid_starter(card),
        Some(top) => AscendingSameSuit.is_sequential(top, card),
    })
}

/// Move a single held card to the first foundation that takes it.
fn send_home(board: &mut Board, foundations: &[StackId]) -> Result<(), EngineError> {
    let Some(card) = held_single(board)? else {
        return Ok(());
    };
    for &pile in foundations {
        if fits_foundation(board, pile, &card)? {
            return board.complete_selection(pile);
        }
    }
    Ok(())
}

/// Accepts one held card that starts or continues the suit run.
#[derive(Clone, Copy, Debug, Default)]
pub struct FoundationBehavior;

impl Behavior for FoundationBehavior {
    fn click(&self, board: &mut Board, stack: StackId, _card_index: Option<usize>) -> Result<(), EngineError> {
        if let Some(card) = held_single(board)? {
            if fits_foundation(board, stack, &card)? {
                board.complete_selection(stack)?;
            }
        }
        Ok(())
    }

    fn group(&self) -> RuleGroup {
        FOUNDATION
    }
}

/// Cascade pile.
///
/// Without a selection, a click picks up the face-up run from the clicked
/// card, if that run is in sequence. With one, a click drops the held run
/// here when it continues the pile (or starts it, on an empty pile).
#[derive(Clone, Debug)]
pub struct TableauBehavior {
    foundations: [StackId; 4],
}

impl TableauBehavior {
    #[must_use]
    pub fn new(foundations: [StackId; 4]) -> Self {
        Self { foundations }
    }

    fn accepts_held(&self, board: &Board, stack: StackId) -> Result<bool, EngineError> {
        let held = board.selection().cards(board.table())?;
        Ok(match board.table().stack(stack)?.top() {
            None => DescendingAlternating.is_valid_sequence(held, true),
            Some(top) => {
                let mut run: SmallVec<[Card; 16]> = SmallVec::with_capacity(held.len() + 1);
                run.push(*top);
                run.extend_from_slice(held);
                DescendingAlternating.is_valid_sequence(&run, false)
            }
        })
    }

    fn can_pick_up(&self, board: &Board, stack: StackId, index: usize) -> Result<bool, EngineError> {
        let cards = board.table().stack(stack)?.cards();
        Ok(cards.get(index).map_or(false, |c| c.face_up)
            && DescendingAlternating.is_valid_sequence(&cards[index..], false))
    }
}

impl Behavior for TableauBehavior {
    fn click(&self, board: &mut Board, stack: StackId, card_index: Option<usize>) -> Result<(), EngineError> {
        if let Some(src) = board.selection().source() {
            // Dropping on the source is a cancel, not a move that reveals
            if src != stack && self.accepts_held(board, stack)? {
                board.complete_selection(stack)?;
            }
        } else if let Some(index) = card_index {
            if self.can_pick_up(board, stack, index)? {
                board.select(stack, index)?;
            }
        }
        Ok(())
    }

    fn double_click(&self, board: &mut Board, _stack: StackId, _card_index: Option<usize>) -> Result<(), EngineError> {
        send_home(board, &self.foundations)
    }

    fn group(&self) -> RuleGroup {
        TABLEAU
    }

    fn reveals_exposed_card(&self) -> bool {
        true
    }
}

/// Draw pile. Turns one card onto the waste, or recycles the waste once
/// the stock runs out.
#[derive(Clone, Debug)]
pub struct StockBehavior {
    waste: StackId,
}

impl StockBehavior {
    #[must_use]
    pub fn new(waste: StackId) -> Self {
        Self { waste }
    }
}

impl Behavior for StockBehavior {
    fn click(&self, board: &mut Board, stack: StackId, _card_index: Option<usize>) -> Result<(), EngineError> {
        if board.selection().is_held() {
            return Ok(());
        }
        let table = board.table_mut();
        if !table.stack(stack)?.is_empty() {
            table.flip_top(stack)?;
            table.move_to(stack, self.waste, 1, false)?;
        } else {
            let waste_len = table.stack(self.waste)?.len();
            if waste_len > 0 {
                table.set_all_face_up(self.waste, false)?;
                table.shuffle(self.waste)?;
                table.move_to(self.waste, stack, waste_len, false)?;
            }
        }
        Ok(())
    }

    fn group(&self) -> RuleGroup {
        STOCK
    }
}

/// Turned-up cards. Only the top card can be picked up.
#[derive(Clone, Debug)]
pub struct WasteBehavior {
    foundations: [StackId; 4],
}

impl WasteBehavior {
    #[must_use]
    pub fn new(foundations: [StackId; 4]) -> Self {
        Self { foundations }
    }
}

impl Behavior for WasteBehavior {
    fn click(&self, board: &mut Board, stack: StackId, _card_index: Option<usize>) -> Result<(), EngineError> {
        let len = board.table().stack(stack)?.len();
        if !board.selection().is_held() && len > 0 {
            board.select(stack, len - 1)?;
        }
        Ok(())
    }

    fn double_click(&self, board: &mut Board, _stack: StackId, _card_index: Option<usize>) -> Result<(), EngineError> {
        send_home(board, &self.foundations)
    }

    fn group(&self) -> RuleGroup {
        WASTE
    }
}
