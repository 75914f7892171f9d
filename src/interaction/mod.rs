//! Picking cards up and dragging them around.
//!
//! ## Key Types
//!
//! - [`Selection`]: The single held run of cards and where it came from
//! - [`DragTracker`]: Pointer state shared between the input producer and
//!   the logic thread
//! - [`DragMotion`]: Non-visual motion that feeds the tracker offset into the
//!   selection every frame

pub mod drag;
pub mod selection;

pub use drag::{DragMotion, DragTracker};
pub use selection::Selection;
