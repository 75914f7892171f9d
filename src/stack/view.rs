//! Display mirror of a stack.
//!
//! A `StackView` holds its own copies of the cards as they should currently
//! appear on screen, plus the layout needed to place and hit-test them. It
//! lags the logical stack until the operation log is flushed.
//!
//! Positions come in two forms: a relative position in `[0, 1]²` referring
//! to the center of the bottom card (set by the game), and an absolute pixel
//! position of the top-left corner (derived on every screen resize).

use im::Vector;

use crate::core::{Card, CardMetrics, Point, Rect};

#[derive(Clone, Debug)]
pub struct StackView {
    pub(crate) cards: Vector<Card>,
    rel_x: f64,
    rel_y: f64,
    x: i32,
    y: i32,
    screen_w: i32,
    screen_h: i32,
    spread: bool,
    bounds: Rect,
    metrics: CardMetrics,
}

impl StackView {
    /// Create an empty view at a relative position.
    #[must_use]
    pub fn new(rel_x: f64, rel_y: f64, spread: bool, metrics: CardMetrics) -> Self {
        Self {
            cards: Vector::new(),
            rel_x,
            rel_y,
            x: 0,
            y: 0,
            screen_w: 0,
            screen_h: 0,
            spread,
            bounds: Rect::default(),
            metrics,
        }
    }

    /// Cards as currently displayed, bottom first.
    ///
    /// Cloning the returned vector is O(1), so renderers may keep it.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether every card is drawn (fanned downwards) or only the top one.
    #[must_use]
    pub fn is_spread(&self) -> bool {
        self.spread
    }

    pub fn set_spread(&mut self, spread: bool) {
        self.spread = spread;
    }

    #[must_use]
    pub fn relative_position(&self) -> (f64, f64) {
        (self.rel_x, self.rel_y)
    }

    pub fn set_relative_position(&mut self, rel_x: f64, rel_y: f64) {
        self.rel_x = rel_x;
        self.rel_y = rel_y;
    }

    /// Absolute top-left corner in pixels.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move the view without touching its relative position or bounds.
    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    #[must_use]
    pub fn metrics(&self) -> CardMetrics {
        self.metrics
    }

    /// Cached bounds, as of the last `update_bounds`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Recompute absolute position and bounds for a new screen size.
    pub fn update_screen_size(&mut self, w: i32, h: i32) {
        self.screen_w = w;
        self.screen_h = h;
        self.x = (self.rel_x * f64::from(w)) as i32 - self.metrics.width / 2;
        self.y = (self.rel_y * f64::from(h)) as i32 - self.metrics.height / 2;
        self.update_bounds();
    }

    /// Recompute bounds from the absolute position and card count.
    pub fn update_bounds(&mut self) {
        let m = self.metrics;
        let height = if self.spread && self.cards.len() > 1 {
            m.height + m.spread_step * (self.cards.len() as i32 - 1)
        } else {
            m.height
        };
        self.bounds = Rect::new(self.x, self.y, m.width, height);
    }

    /// Index of the card under `p`.
    ///
    /// Points outside the bounds, or on a stack that is not spread, resolve
    /// to the top card. `None` only when the view is empty.
    #[must_use]
    pub fn card_index(&self, p: Point) -> Option<usize> {
        let top = self.cards.len().checked_sub(1)?;
        if !self.in_bounds(p) || !self.spread {
            return Some(top);
        }
        let offset = ((p.y - self.y) / self.metrics.spread_step).max(0) as usize;
        Some(offset.min(top))
    }

    /// Absolute position at which the card at `index` is (or would be) drawn.
    #[must_use]
    pub fn card_pos(&self, index: usize) -> Point {
        if self.spread {
            Point::new(self.x, self.y + self.metrics.spread_step * index as i32)
        } else {
            Point::new(self.x, self.y)
        }
    }

    /// Place this view over card `index` of `other`.
    ///
    /// An index past the end of `other` falls back to its bottom card.
    pub fn translate_to(&mut self, other: &StackView, index: usize) {
        let index = if index > other.cards.len() { 0 } else { index };
        self.screen_w = other.screen_w;
        self.screen_h = other.screen_h;

        let p = other.card_pos(index);
        self.x = p.x;
        self.y = p.y;

        if self.screen_w > 0 && self.screen_h > 0 {
            self.rel_x = f64::from(self.x + self.metrics.width / 2) / f64::from(self.screen_w);
            self.rel_y = f64::from(self.y + self.metrics.height / 2) / f64::from(self.screen_h);
        }

        self.update_bounds();
    }
}
