//! Card slide animation.

use log::trace;

use crate::board::Board;
use crate::core::{EngineConfig, Point};
use crate::motion::{Motion, Surface};
use crate::stack::{StackId, StackView};

/// Slides the top `count` display cards of one stack onto another.
///
/// The step per frame is derived once in `init` from the straight-line
/// distance, so the slide lasts `distance / speed` seconds whatever the
/// distance.
#[derive(Debug)]
pub struct SlideMotion {
    src: StackId,
    dst: StackId,
    count: usize,
    speed: f64,
    fps: f64,
    floating: Option<StackView>,
    x: f64,
    y: f64,
    step_x: f64,
    step_y: f64,
    updates_to_reach: f64,
    done: bool,
}

impl SlideMotion {
    #[must_use]
    pub fn new(src: StackId, dst: StackId, count: usize, config: &EngineConfig) -> Self {
        Self {
            src,
            dst,
            count,
            speed: config.slide_speed,
            fps: f64::from(config.fps),
            floating: None,
            x: 0.0,
            y: 0.0,
            step_x: 0.0,
            step_y: 0.0,
            updates_to_reach: 0.0,
            done: false,
        }
    }

    /// Frames left before the cards land.
    #[must_use]
    pub fn updates_to_reach(&self) -> f64 {
        self.updates_to_reach
    }

    /// The cards in flight, once started.
    #[must_use]
    pub fn floating(&self) -> Option<&StackView> {
        self.floating.as_ref()
    }
}

impl Motion for SlideMotion {
    fn init(&mut self, board: &mut Board) {
        let table = board.table_mut();
        let from = table.view_mut(self.src);
        if from.len() < self.count {
            trace!(
                "slide from {} expects {} cards, display holds {}",
                self.src,
                self.count,
                from.len()
            );
            self.done = true;
            return;
        }

        let start = from.len() - self.count;
        let mut floating = StackView::new(0.5, 0.5, from.is_spread(), from.metrics());
        floating.translate_to(from, start);
        floating.cards = from.cards.split_off(start);
        floating.update_bounds();
        from.update_bounds();

        let origin = floating.position();
        let to = table.view_mut(self.dst);
        let target = to.card_pos(to.len());

        self.x = f64::from(origin.x);
        self.y = f64::from(origin.y);
        let dist_x = f64::from(target.x - origin.x);
        let dist_y = f64::from(target.y - origin.y);
        let dist = dist_x.hypot(dist_y);
        if dist > 0.0 {
            let per_frame = self.speed / self.fps;
            self.step_x = dist_x / dist * per_frame;
            self.step_y = dist_y / dist * per_frame;
        }
        self.updates_to_reach = dist / self.speed * self.fps;
        self.floating = Some(floating);
    }

    fn update_frame(&mut self, board: &mut Board) {
        if self.done {
            return;
        }
        self.updates_to_reach -= 1.0;
        if self.updates_to_reach <= 0.0 {
            if let Some(floating) = self.floating.take() {
                let to = board.table_mut().view_mut(self.dst);
                to.cards.append(floating.cards);
            }
            self.done = true;
        } else if let Some(floating) = self.floating.as_mut() {
            self.x += self.step_x;
            self.y += self.step_y;
            floating.set_position(Point::new(self.x as i32, self.y as i32));
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if let (false, Some(floating)) = (self.done, self.floating.as_ref()) {
            surface.draw_stack(floating, true);
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Deck;
    use crate::motion::InstantDriver;
    use crate::motion::MotionDriver;

    fn board() -> (Board, StackId, StackId) {
        let mut board = Board::new(EngineConfig::default().with_seed(3)).unwrap();
        let a = board.add_stack(0.1, 0.5, false);
        let b = board.add_stack(0.9, 0.5, false);
        board.update_screen_size(1000, 600).unwrap();
        board.table_mut().load(a, Deck::standard()).unwrap();
        board.flush(&mut InstantDriver);
        (board, a, b)
    }

    #[test]
    fn test_slide_lands_cards() {
        let (mut board, a, b) = board();
        let mut slide = SlideMotion::new(a, b, 3, &EngineConfig::default());
        InstantDriver.play(&mut slide, &mut board);

        assert!(slide.is_done());
        assert_eq!(board.table().stack(a).unwrap().view().len(), 49);
        assert_eq!(board.table().stack(b).unwrap().view().len(), 3);
    }

    #[test]
    fn test_duration_proportional_to_distance() {
        let (mut board, a, b) = board();
        let config = EngineConfig::default();
        let mut slide = SlideMotion::new(a, b, 1, &config);
        slide.init(&mut board);

        // 800 px at 3000 px/s and 24 fps
        let expected = 800.0 / 3000.0 * 24.0;
        assert!((slide.updates_to_reach() - expected).abs() < 1e-9);

        let mut slow = SlideMotion::new(b, a, 1, &config.clone().with_slide_speed(1500.0));
        board.table_mut().view_mut(b).cards.push_back(crate::core::Card::from_index(0, true));
        slow.init(&mut board);
        assert!((slow.updates_to_reach() - 2.0 * expected).abs() < 1e-9);
    }

    #[test]
    fn test_missing_cards_finish_quietly() {
        let (mut board, a, b) = board();
        let mut slide = SlideMotion::new(b, a, 2, &EngineConfig::default());
        slide.init(&mut board);
        assert!(slide.is_done());
        assert!(slide.floating().is_none());
        assert_eq!(board.table().stack(a).unwrap().view().len(), 52);
    }

    #[test]
    fn test_zero_distance() {
        let (mut board, a, _) = board();
        let mut slide = SlideMotion::new(a, a, 1, &EngineConfig::default());
        slide.init(&mut board);
        slide.update_frame(&mut board);
        assert!(slide.is_done());
        assert_eq!(board.table().stack(a).unwrap().view().len(), 52);
    }
}
