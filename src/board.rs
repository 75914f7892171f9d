//! The playing board: table, selection and configuration in one place.
//!
//! Behaviors receive `&mut Board`, which is how they reach other stacks,
//! the selection and the operation log without any global state.

use log::{debug, trace};

use crate::core::{CardMetrics, EngineConfig, EngineError, GameRng, Point, Rect};
use crate::interaction::Selection;
use crate::motion::{MotionDriver, Surface};
use crate::stack::{StackId, Table};

#[derive(Debug)]
pub struct Board {
    table: Table,
    selection: Selection,
    playfield: Vec<StackId>,
    config: EngineConfig,
}

impl Board {
    /// Create an empty board. The shuffle RNG is seeded from
    /// `config.seed`, or randomly when it is `None`.
    ///
    /// Fails with `InvalidConfig` if the configuration does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let mut table = Table::new(CardMetrics::from(&config), rng);
        let selection = Selection::new(&mut table);
        Ok(Self {
            table,
            selection,
            playfield: Vec::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Add a stack to the playfield.
    ///
    /// Playfield stacks are drawn and hit-tested in the order they were
    /// added. Stacks that should stay off screen go straight to the table.
    pub fn add_stack(&mut self, rel_x: f64, rel_y: f64, spread: bool) -> StackId {
        let id = self.table.add_stack(rel_x, rel_y, spread);
        self.playfield.push(id);
        id
    }

    /// Playfield stacks in hit-test order.
    #[must_use]
    pub fn playfield(&self) -> &[StackId] {
        &self.playfield
    }

    /// First playfield stack whose bounds contain `p`.
    #[must_use]
    pub fn stack_at(&self, p: Point) -> Option<StackId> {
        self.playfield
            .iter()
            .copied()
            .find(|&id| self.table.stack(id).map_or(false, |s| s.view().in_bounds(p)))
    }

    // === Selection ===

    /// Pick up the cards of `src` from `start` to the top.
    pub fn select(&mut self, src: StackId, start: usize) -> Result<(), EngineError> {
        self.selection.select(&mut self.table, src, start)
    }

    /// Commit the selection to `dst`, or cancel it with `None`.
    pub fn select_end(&mut self, dst: Option<StackId>) -> Result<(), EngineError> {
        self.selection.select_end(&mut self.table, dst)
    }

    /// Commit the selection to `dst`, first turning up the card the move
    /// exposes on the source when the source's behavior asks for it.
    pub fn complete_selection(&mut self, dst: StackId) -> Result<(), EngineError> {
        if let Some(src) = self.selection.source() {
            let origin = self.table.stack(src)?;
            let hidden = origin.top().map_or(false, |c| !c.face_up);
            if hidden && origin.behavior().reveals_exposed_card() {
                trace!("revealing top of {}", src);
                self.table.flip_top(src)?;
            }
        }
        self.select_end(Some(dst))
    }

    pub fn set_selection_offset(&mut self, dx: i32, dy: i32) {
        self.selection.set_offset(&mut self.table, dx, dy);
    }

    /// Bounds of the held cards at their dragged position.
    pub fn selection_bounds(&mut self) -> Rect {
        self.selection.bounds(&mut self.table)
    }

    // === Display ===

    /// Replay every pending operation's display phase, oldest first.
    ///
    /// Returns the number of operations replayed. Slides are handed to
    /// `driver`, so this returns only once the display has settled.
    pub fn flush(&mut self, driver: &mut dyn MotionDriver) -> usize {
        let mut replayed = 0;
        while let Some(op) = self.table.take_operation() {
            op.replay(self, driver);
            replayed += 1;
        }
        if replayed > 0 {
            debug!("flushed {} operations", replayed);
        }
        replayed
    }

    /// Lay every stack out for a new screen size.
    pub fn update_screen_size(&mut self, w: i32, h: i32) -> Result<(), EngineError> {
        for stack in self.table.stacks_mut() {
            stack.view_mut().update_screen_size(w, h);
        }
        self.selection.update_screen_size(&mut self.table, w, h)
    }

    /// Draw the playfield, then the held selection on top.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for stack in self.playfield.iter().filter_map(|&id| self.table.stack(id).ok()) {
            surface.draw_stack(stack.view(), false);
        }
        if self.selection.is_held() {
            if let Ok(pen) = self.table.stack(self.selection.pen()) {
                surface.draw_stack(pen.view(), true);
            }
        }
    }
}
