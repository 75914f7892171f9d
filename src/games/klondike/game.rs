//! Klondike layout, deal and win condition.

use std::rc::Rc;

use log::info;

use super::behaviors::{FoundationBehavior, StockBehavior, TableauBehavior, WasteBehavior};
use crate::board::Board;
use crate::core::{Deck, EngineError, Rank, DECK_SIZE};
use crate::games::GameVariant;
use crate::stack::StackId;

/// Number of tableau piles.
pub const TABLEAU_PILES: usize = 7;

#[derive(Clone, Debug)]
pub struct Klondike {
    deck: StackId,
    waste: StackId,
    stock: StackId,
    foundations: [StackId; 4],
    tableau: [StackId; TABLEAU_PILES],
}

impl Klondike {
    #[must_use]
    pub fn waste(&self) -> StackId {
        self.waste
    }

    #[must_use]
    pub fn stock(&self) -> StackId {
        self.stock
    }

    #[must_use]
    pub fn foundations(&self) -> &[StackId; 4] {
        &self.foundations
    }

    #[must_use]
    pub fn tableau(&self) -> &[StackId; TABLEAU_PILES] {
        &self.tableau
    }
}

impl GameVariant for Klondike {
    fn build(board: &mut Board) -> Result<Self, EngineError> {
        let waste = board.add_stack(0.2, 0.1, false);
        let stock = board.add_stack(0.1, 0.1, false);
        let foundations: [StackId; 4] =
            std::array::from_fn(|i| board.add_stack(0.6 + 0.1 * i as f64, 0.1, false));
        let tableau: [StackId; TABLEAU_PILES] =
            std::array::from_fn(|i| board.add_stack(0.3 + 0.1 * i as f64, 0.4, true));
        // Fresh decks are loaded here, off the playfield
        let deck = board.table_mut().add_stack(0.0, 0.0, false);

        let table = board.table_mut();
        table.set_behavior(waste, Rc::new(WasteBehavior::new(foundations)))?;
        table.set_behavior(stock, Rc::new(StockBehavior::new(waste)))?;
        let foundation = Rc::new(FoundationBehavior);
        for &pile in &foundations {
            table.set_behavior(pile, foundation.clone())?;
        }
        let cascade = Rc::new(TableauBehavior::new(foundations));
        for &pile in &tableau {
            table.set_behavior(pile, cascade.clone())?;
        }

        Ok(Self {
            deck,
            waste,
            stock,
            foundations,
            tableau,
        })
    }

    fn name(&self) -> &'static str {
        "Klondike"
    }

    fn deal(&mut self, board: &mut Board) -> Result<(), EngineError> {
        let table = board.table_mut();
        table.clear(self.deck)?;
        table.load(self.deck, Deck::standard())?;
        table.move_to(self.deck, self.stock, DECK_SIZE, true)?;
        table.shuffle(self.stock)?;

        for i in 0..TABLEAU_PILES {
            table.move_to(self.stock, self.tableau[i], 1, false)?;
            table.flip_top(self.tableau[i])?;
            for &pile in &self.tableau[i + 1..] {
                table.move_to(self.stock, pile, 1, false)?;
            }
        }
        info!("dealt Klondike, {} cards left in stock", table.stack(self.stock)?.len());
        Ok(())
    }

    fn is_game_won(&self, board: &Board) -> bool {
        self.foundations.iter().all(|&pile| {
            board
                .table()
                .stack(pile)
                .ok()
                .and_then(|s| s.top())
                .map_or(false, |top| top.rank == Rank::King)
        })
    }
}
