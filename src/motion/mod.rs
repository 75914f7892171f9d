//! Animation and drag feedback.
//!
//! ## Key Types
//!
//! - [`Motion`]: Something advanced frame by frame until done
//! - [`SlideMotion`]: Cards travelling from one stack to another
//! - [`MotionDriver`]: Plays a motion to completion
//! - [`FrameScheduler`]: Fixed-rate driver with bounded catch-up
//! - [`InstantDriver`]: Headless driver that skips straight to the end
//! - [`Surface`] / [`Renderer`]: The drawing collaborators
//!
//! Motions run on the logic thread. A driver does not return until the
//! motion is done, so no input is handled while cards are moving.

pub mod scheduler;
pub mod slide;

pub use scheduler::{Clock, FrameScheduler, FrameStats, InstantDriver, SystemClock};
pub use slide::SlideMotion;

use crate::board::Board;
use crate::stack::StackView;

/// A time-driven change to the display.
pub trait Motion {
    /// Prepare the motion. May finish it immediately when there is nothing
    /// to animate.
    fn init(&mut self, board: &mut Board);

    /// Advance one frame.
    fn update_frame(&mut self, board: &mut Board);

    /// Draw the current state. Non-visual motions draw nothing.
    fn draw(&self, surface: &mut dyn Surface);

    fn is_done(&self) -> bool;
}

/// Drawing target. Implemented by the rendering layer.
pub trait Surface {
    /// Draw a stack. `selected` marks the held selection and cards in flight.
    fn draw_stack(&mut self, view: &StackView, selected: bool);
}

/// Repaints the screen.
pub trait Renderer {
    /// Paint the board, then `motion` on top if given.
    fn paint(&mut self, board: &Board, motion: Option<&dyn Motion>);

    /// Show or clear a status line.
    fn set_status(&mut self, status: Option<&str>) {
        let _ = status;
    }
}

/// Plays motions.
pub trait MotionDriver {
    /// Run `motion` from `init` until it is done.
    fn play(&mut self, motion: &mut dyn Motion, board: &mut Board);
}
