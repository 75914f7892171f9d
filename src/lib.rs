//! # card-forest
//!
//! A solitaire card game engine.
//!
//! ## Design Principles
//!
//! 1. **Logic Before Display**: Every stack mutation runs on the logical
//!    cards at once and is logged. The display mirrors catch up when the
//!    log is flushed, replaying operations in the order they were issued.
//!
//! 2. **Rules as Objects**: Each stack carries a `Behavior` that reacts to
//!    clicks. Games differ only in the behaviors they attach and how they
//!    deal.
//!
//! 3. **No Globals**: The board (stacks, selection, log) is passed to every
//!    behavior call explicitly, so a test can build a fresh one.
//!
//! ## Architecture
//!
//! - **One Logic Thread**: Input is handed over through a single-slot
//!   queue. Each event is dispatched, flushed and animated to completion
//!   before the next one is taken.
//!
//! - **Fixed-Rate Animation**: Slides and drags are paced by a frame
//!   scheduler that catches up on late frames with a bounded number of
//!   silent updates.
//!
//! - **Persistent Display Mirrors**: Display cards live in `im` vectors, so
//!   a renderer can keep a snapshot at no cost.
//!
//! ## Modules
//!
//! - `core`: Cards, decks, geometry, RNG, configuration, errors
//! - `stack`: Stacks, display mirrors, operations and the table arena
//! - `rules`: Sequence checkers and behaviors
//! - `interaction`: Selection and drag tracking
//! - `motion`: Motions, slide animation, frame scheduler
//! - `board`: Table + selection, the state behaviors act on
//! - `session`: Click and drag dispatch for one game
//! - `runtime`: Input queue and the logic-thread event loop
//! - `snapshot`: Save/restore of the logical state
//! - `games`: Klondike and Two Stacks

pub mod core;
pub mod stack;
pub mod rules;
pub mod interaction;
pub mod motion;
pub mod board;
pub mod session;
pub mod runtime;
pub mod snapshot;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Card, Color, Rank, Suit, Deck, DECK_SIZE,
    Point, Rect,
    GameRng, GameRngState,
    CardMetrics, EngineConfig, EngineError,
};

pub use crate::stack::{Operation, OperationLog, Stack, StackId, StackView, Table};

pub use crate::rules::{
    Behavior, DefaultBehavior, RuleGroup,
    SequenceChecker, AscendingSameSuit, DescendingAlternating,
};

pub use crate::interaction::{DragMotion, DragTracker, Selection};

pub use crate::motion::{
    Motion, MotionDriver, SlideMotion,
    Surface, Renderer,
    Clock, SystemClock, FrameScheduler, FrameStats, InstantDriver,
};

pub use crate::board::Board;
pub use crate::session::GameSession;
pub use crate::runtime::{input_channel, GameLoop, InputEvent, InputSender};
pub use crate::snapshot::TableSnapshot;
pub use crate::games::{GameVariant, Klondike, TwoStacks};
