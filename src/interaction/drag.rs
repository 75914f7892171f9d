//! Drag tracking.
//!
//! The input layer creates a [`DragTracker`] when a drag starts, posts a
//! clone of it to the logic thread, and keeps updating it from pointer
//! events. The logic thread plays a [`DragMotion`] over the same tracker,
//! which copies the latest offset into the selection on every frame until
//! the drag ends.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::board::Board;
use crate::core::Point;
use crate::motion::{Motion, Surface};

#[derive(Debug)]
struct DragState {
    start: Point,
    offset: Point,
    end: Option<Point>,
}

/// Pointer state of one drag, shared between threads.
#[derive(Clone, Debug)]
pub struct DragTracker {
    state: Arc<Mutex<DragState>>,
}

impl DragTracker {
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self {
            state: Arc::new(Mutex::new(DragState {
                start,
                offset: Point::default(),
                end: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DragState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pointer moved to `(x, y)`.
    pub fn move_to(&self, x: i32, y: i32) {
        let mut state = self.lock();
        state.offset = Point::new(x - state.start.x, y - state.start.y);
    }

    /// Pointer released at `point`.
    pub fn end(&self, point: Point) {
        self.lock().end = Some(point);
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.lock().start
    }

    /// Offset from the start point to the latest pointer position.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.lock().offset
    }

    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        self.lock().end
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.lock().end.is_some()
    }
}

/// Feeds a drag's offset into the selection.
///
/// Draws nothing; the held selection is drawn with the board.
#[derive(Debug)]
pub struct DragMotion {
    tracker: DragTracker,
    done: bool,
}

impl DragMotion {
    #[must_use]
    pub fn new(tracker: DragTracker) -> Self {
        Self { tracker, done: false }
    }
}

impl Motion for DragMotion {
    fn init(&mut self, board: &mut Board) {
        if board.selection().is_held() {
            // The pointer may already have moved, or even been released
            self.update_frame(board);
        } else {
            self.done = true;
        }
    }

    fn update_frame(&mut self, board: &mut Board) {
        let offset = self.tracker.offset();
        board.set_selection_offset(offset.x, offset.y);
    }

    fn draw(&self, _surface: &mut dyn Surface) {}

    fn is_done(&self) -> bool {
        self.done || self.tracker.is_ended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_offset_follows_pointer() {
        let drag = DragTracker::new(Point::new(100, 50));
        drag.move_to(130, 40);
        assert_eq!(drag.offset(), Point::new(30, -10));
        assert!(!drag.is_ended());

        drag.end(Point::new(130, 40));
        assert!(drag.is_ended());
        assert_eq!(drag.end_point(), Some(Point::new(130, 40)));
    }

    #[test]
    fn test_updates_from_another_thread() {
        let drag = DragTracker::new(Point::new(0, 0));
        let producer = drag.clone();
        thread::spawn(move || {
            producer.move_to(5, 9);
            producer.end(Point::new(5, 9));
        })
        .join()
        .unwrap();

        assert_eq!(drag.offset(), Point::new(5, 9));
        assert!(drag.is_ended());
    }
}
