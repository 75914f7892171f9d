//! Input dispatch for one game.
//!
//! `GameSession` turns points and rectangles from the input layer into
//! behavior calls, following a small protocol around the selection:
//!
//! - a click that starts with a held selection and ends with it still held
//!   cancels it, so a click that lands nowhere useful puts the cards back
//! - a multi-click on the held cards double-clicks their source
//! - a multi-click on the stack the previous selection came from is a
//!   "reverse" double click: the first click of the pair canceled the
//!   selection, so the stack is clicked again to re-select, the display is
//!   flushed, and the source is double-clicked
//! - the end of a drag clicks the stack with the largest overlap with the
//!   dragged cards

use log::{debug, trace};

use crate::board::Board;
use crate::core::{EngineConfig, EngineError, Point, Rect};
use crate::games::GameVariant;
use crate::motion::MotionDriver;
use crate::snapshot::TableSnapshot;
use crate::stack::StackId;

pub struct GameSession<V: GameVariant> {
    board: Board,
    variant: V,
    started_with_selection: bool,
    was_selected: bool,
    prev_selection_src: Option<StackId>,
}

impl<V: GameVariant> GameSession<V> {
    /// Build the variant on a fresh board. Nothing is dealt yet.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let mut board = Board::new(config)?;
        let variant = V::build(&mut board)?;
        debug!("built {} with {} stacks", variant.name(), board.playfield().len());
        Ok(Self {
            board,
            variant,
            started_with_selection: false,
            was_selected: false,
            prev_selection_src: None,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Deal onto the empty stacks.
    pub fn deal(&mut self) -> Result<(), EngineError> {
        self.variant.deal(&mut self.board)
    }

    /// Cancel any selection, empty every playfield stack, and deal again.
    pub fn redeal(&mut self) -> Result<(), EngineError> {
        self.board.select_end(None)?;
        for id in self.board.playfield().to_vec() {
            self.board.table_mut().clear(id)?;
        }
        self.was_selected = false;
        self.prev_selection_src = None;
        self.deal()
    }

    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.variant.is_game_won(&self.board)
    }

    /// Lay the board out for a new screen size.
    pub fn dispatch_resize(&mut self, width: i32, height: i32) -> Result<(), EngineError> {
        trace!("resize to {}x{}", width, height);
        self.board.update_screen_size(width, height)
    }

    /// Handle a click at `point`.
    ///
    /// `driver` plays the slides of the intermediate flush in a reverse
    /// double click; everything else is left in the log for the caller.
    pub fn dispatch_click(
        &mut self,
        point: Point,
        multi_click: bool,
        driver: &mut dyn MotionDriver,
    ) -> Result<(), EngineError> {
        self.start_action();

        if multi_click {
            if let Some(src) = self.board.selection().source() {
                if self.pen_contains(point)? {
                    self.double_click_stack(src, point)?;
                    return self.end_action();
                }
            }
        }

        match self.board.stack_at(point) {
            Some(stack) => {
                if multi_click && self.was_selected && self.prev_selection_src == Some(stack) {
                    trace!("reverse double click on {}", stack);
                    self.click_stack(stack, point)?;
                    self.board.flush(driver);
                    if let Some(src) = self.board.selection().source() {
                        self.double_click_stack(src, point)?;
                    }
                    self.was_selected = false;
                    return self.end_action();
                }

                self.was_selected = false;
                if self.board.selection().source() == Some(stack) {
                    self.was_selected = true;
                    self.prev_selection_src = Some(stack);
                }
                self.click_stack(stack, point)?;
            }
            None => {
                let held = self.board.selection().source();
                if held.is_some() && self.pen_contains(point)? {
                    self.was_selected = true;
                    self.prev_selection_src = held;
                } else {
                    trace!("click at {:?} hit nothing", point);
                }
            }
        }

        self.end_action()
    }

    /// Handle the end of a drag whose cards now cover `bounds`.
    pub fn dispatch_drag(&mut self, bounds: Rect) -> Result<(), EngineError> {
        self.start_action();

        let mut target: Option<(StackId, i64)> = None;
        for &id in self.board.playfield() {
            let view_bounds = self.board.table().stack(id)?.view().bounds();
            if let Some(overlap) = view_bounds.intersection(&bounds) {
                let area = overlap.area();
                if target.map_or(true, |(_, best)| area > best) {
                    target = Some((id, area));
                }
            }
        }

        match target {
            Some((stack, area)) => {
                trace!("drag dropped on {} (overlap {})", stack, area);
                self.click_stack(stack, bounds.origin())?;
            }
            None => trace!("drag dropped on nothing"),
        }

        self.end_action()
    }

    /// Capture the logical state, settling any selection first.
    pub fn snapshot(&mut self, driver: &mut dyn MotionDriver) -> Result<TableSnapshot, EngineError> {
        self.board.select_end(None)?;
        self.board.flush(driver);
        Ok(self.board.table().snapshot())
    }

    /// Restore a snapshot taken from a session of the same variant.
    pub fn restore(&mut self, snapshot: &TableSnapshot, driver: &mut dyn MotionDriver) -> Result<(), EngineError> {
        self.board.select_end(None)?;
        self.board.flush(driver);
        self.board.table_mut().restore(snapshot)?;
        self.was_selected = false;
        self.prev_selection_src = None;
        Ok(())
    }

    fn start_action(&mut self) {
        self.started_with_selection = self.board.selection().is_held();
    }

    fn end_action(&mut self) -> Result<(), EngineError> {
        if self.started_with_selection && self.board.selection().is_held() {
            debug!("no destination for the held cards, canceling");
            self.board.select_end(None)?;
        }
        Ok(())
    }

    fn pen_contains(&self, point: Point) -> Result<bool, EngineError> {
        let pen = self.board.selection().pen();
        Ok(self.board.table().stack(pen)?.view().in_bounds(point))
    }

    fn click_stack(&mut self, stack: StackId, point: Point) -> Result<(), EngineError> {
        let (behavior, index) = {
            let target = self.board.table().stack(stack)?;
            (target.behavior_handle(), target.view().card_index(point))
        };
        debug!("click {} at card {:?}", stack, index);
        behavior.click(&mut self.board, stack, index)
    }

    fn double_click_stack(&mut self, stack: StackId, point: Point) -> Result<(), EngineError> {
        let (behavior, index) = {
            let target = self.board.table().stack(stack)?;
            (target.behavior_handle(), target.view().card_index(point))
        };
        debug!("double click {} at card {:?}", stack, index);
        behavior.double_click(&mut self.board, stack, index)
    }
}
