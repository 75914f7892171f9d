//! The held selection.
//!
//! A selection is either idle or holds a run of cards taken from the top of
//! one stack. Held cards physically live in a holding pen, a spread stack on
//! the same table that is not part of any game's layout.
//!
//! ```text
//! Idle --select(src, i)--> Held --select_end(Some(dst))--> Idle   (commit)
//!                               --select_end(None)------> Idle   (cancel)
//! ```
//!
//! Picking up is immediate; committing and canceling slide the cards.

use log::debug;

use crate::core::{Card, EngineError, Point, Rect};
use crate::stack::{StackId, Table};

#[derive(Clone, Debug)]
pub struct Selection {
    pen: StackId,
    src: Option<StackId>,
    anchor: Point,
    offset: Point,
}

impl Selection {
    /// Create an idle selection, adding its holding pen to `table`.
    pub fn new(table: &mut Table) -> Self {
        let pen = table.add_stack(0.0, 0.0, true);
        Self {
            pen,
            src: None,
            anchor: Point::default(),
            offset: Point::default(),
        }
    }

    /// The holding pen stack.
    #[must_use]
    pub fn pen(&self) -> StackId {
        self.pen
    }

    /// Source of the held cards, `None` while idle.
    #[must_use]
    pub fn source(&self) -> Option<StackId> {
        self.src
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.src.is_some()
    }

    /// Pen position recorded when the cards were picked up.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Current drag offset from the anchor.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Cards in the holding pen, bottom first.
    pub fn cards<'t>(&self, table: &'t Table) -> Result<&'t [Card], EngineError> {
        Ok(table.stack(self.pen)?.cards())
    }

    /// Pick up the cards of `src` from index `start` to the top.
    ///
    /// Fails without side effects if `src` does not exist, `start` is not a
    /// card of `src`, or a selection is already held.
    pub fn select(&mut self, table: &mut Table, src: StackId, start: usize) -> Result<(), EngineError> {
        if let Some(held) = self.src {
            return Err(EngineError::SelectionHeld(held));
        }
        let len = table.stack(src)?.len();
        if start >= len {
            return Err(EngineError::SelectionIndexOutOfRange {
                stack: src,
                index: start,
                len,
            });
        }

        table.move_to(src, self.pen, len - start, true)?;
        self.src = Some(src);

        // The source view has not been replayed yet, so it still shows the
        // cards where they were picked up from
        let src_view = table.stack(src)?.view().clone();
        let pen_view = table.view_mut(self.pen);
        pen_view.translate_to(&src_view, start);
        self.anchor = pen_view.position();

        debug!("selected {} cards from {} at {}", len - start, src, start);
        Ok(())
    }

    /// Release the held cards onto `dst`, or back onto their source when
    /// `dst` is `None`. A no-op while idle.
    pub fn select_end(&mut self, table: &mut Table, dst: Option<StackId>) -> Result<(), EngineError> {
        let Some(src) = self.src else {
            return Ok(());
        };
        let target = dst.unwrap_or(src);
        let count = table.stack(self.pen)?.len();
        table.move_to(self.pen, target, count, false)?;

        match dst {
            Some(dst) => debug!("selection from {} committed to {}", src, dst),
            None => debug!("selection from {} canceled", src),
        }

        self.offset = Point::default();
        self.src = None;
        Ok(())
    }

    /// Draw the pen at `anchor + (dx, dy)`. Logical state is untouched.
    pub fn set_offset(&mut self, table: &mut Table, dx: i32, dy: i32) {
        self.offset = Point::new(dx, dy);
        table
            .view_mut(self.pen)
            .set_position(self.anchor.offset(dx, dy));
    }

    /// Re-anchor the pen after the screen was resized.
    pub fn update_screen_size(&mut self, table: &mut Table, w: i32, h: i32) -> Result<(), EngineError> {
        table.view_mut(self.pen).update_screen_size(w, h);
        if let Some(src) = self.src {
            let src_view = table.stack(src)?.view().clone();
            let pen_view = table.view_mut(self.pen);
            pen_view.translate_to(&src_view, src_view.len());
            self.anchor = pen_view.position();
            pen_view.set_position(self.anchor.offset(self.offset.x, self.offset.y));
        }
        Ok(())
    }

    /// Pen bounds at its current (possibly dragged) position.
    pub fn bounds(&self, table: &mut Table) -> Rect {
        let view = table.view_mut(self.pen);
        view.update_bounds();
        view.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardMetrics, Deck, GameRng};

    fn setup() -> (Table, Selection, StackId) {
        let mut table = Table::new(CardMetrics::default(), GameRng::new(1));
        let selection = Selection::new(&mut table);
        let src = table.add_stack(0.5, 0.5, true);
        let deck = Deck::from_cards(Deck::standard().into_cards().into_iter().take(6)).unwrap();
        table.load(src, deck).unwrap();
        (table, selection, src)
    }

    #[test]
    fn test_select_moves_suffix_into_pen() {
        let (mut table, mut sel, src) = setup();
        sel.select(&mut table, src, 4).unwrap();

        assert!(sel.is_held());
        assert_eq!(sel.source(), Some(src));
        assert_eq!(table.stack(src).unwrap().len(), 4);
        assert_eq!(sel.cards(&table).unwrap().len(), 2);
    }

    #[test]
    fn test_select_rejects_bad_index() {
        let (mut table, mut sel, src) = setup();
        let err = sel.select(&mut table, src, 6).unwrap_err();
        assert!(matches!(err, EngineError::SelectionIndexOutOfRange { index: 6, len: 6, .. }));
        assert!(!sel.is_held());
        assert_eq!(table.stack(src).unwrap().len(), 6);
    }

    #[test]
    fn test_select_rejects_unknown_stack() {
        let (mut table, mut sel, _) = setup();
        assert!(matches!(
            sel.select(&mut table, StackId::new(40), 0),
            Err(EngineError::UnknownStack(_))
        ));
    }

    #[test]
    fn test_second_select_rejected() {
        let (mut table, mut sel, src) = setup();
        sel.select(&mut table, src, 5).unwrap();
        assert!(matches!(
            sel.select(&mut table, src, 0),
            Err(EngineError::SelectionHeld(s)) if s == src
        ));
        assert_eq!(table.stack(src).unwrap().len(), 5);
    }

    #[test]
    fn test_cancel_restores_source() {
        let (mut table, mut sel, src) = setup();
        let before = table.stack(src).unwrap().cards().to_vec();

        sel.select(&mut table, src, 2).unwrap();
        sel.set_offset(&mut table, 30, -10);
        sel.select_end(&mut table, None).unwrap();

        assert!(!sel.is_held());
        assert_eq!(sel.offset(), Point::default());
        assert_eq!(table.stack(src).unwrap().cards(), before.as_slice());
        assert!(sel.cards(&table).unwrap().is_empty());
    }

    #[test]
    fn test_select_end_while_idle_is_noop() {
        let (mut table, mut sel, _) = setup();
        let pending = table.pending_operations();
        sel.select_end(&mut table, None).unwrap();
        assert_eq!(table.pending_operations(), pending);
    }

    #[test]
    fn test_offset_moves_pen_view_only() {
        let (mut table, mut sel, src) = setup();
        table.view_mut(src).update_screen_size(800, 600);
        sel.select(&mut table, src, 3).unwrap();
        let anchor = sel.anchor();

        sel.set_offset(&mut table, 12, 7);
        assert_eq!(table.stack(sel.pen()).unwrap().view().position(), anchor.offset(12, 7));
        assert_eq!(table.stack(sel.pen()).unwrap().len(), 3);
    }
}
