//! The logic thread.
//!
//! Input arrives through a single-slot queue: a producer posting while an
//! event is still waiting blocks until the logic thread takes it. The
//! [`GameLoop`] owns the game and handles one event at a time, flushing the
//! operation log and playing every animation before it takes the next one.
//!
//! ```no_run
//! use std::thread;
//! use card_forest::core::{EngineConfig, Point};
//! use card_forest::games::Klondike;
//! use card_forest::motion::{FrameScheduler, Motion, Renderer, SystemClock};
//! use card_forest::board::Board;
//! use card_forest::runtime::{input_channel, GameLoop, InputEvent};
//! use card_forest::session::GameSession;
//!
//! struct Headless;
//!
//! impl Renderer for Headless {
//!     fn paint(&mut self, _board: &Board, _motion: Option<&dyn Motion>) {}
//! }
//!
//! let (input, events) = input_channel();
//! let logic = thread::spawn(move || {
//!     let config = EngineConfig::default();
//!     let session = GameSession::<Klondike>::new(config.clone()).unwrap();
//!     let scheduler = FrameScheduler::new(&config, SystemClock::new(), Headless);
//!     GameLoop::new(session, scheduler, events).run()
//! });
//!
//! input.post(InputEvent::Resize { width: 800, height: 600 }).unwrap();
//! input.post(InputEvent::Start).unwrap();
//! input.post(InputEvent::Click { point: Point::new(80, 60), clicks: 1 }).unwrap();
//! input.post(InputEvent::Shutdown).unwrap();
//! logic.join().unwrap().unwrap();
//! ```

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use log::{debug, error, info};

use crate::core::{EngineError, Point};
use crate::games::GameVariant;
use crate::interaction::{DragMotion, DragTracker};
use crate::motion::{Clock, FrameScheduler, MotionDriver, Renderer};
use crate::session::GameSession;

/// Status shown once the game is won.
pub const GAME_DONE: &str = "GAME DONE";

/// Events delivered to the logic thread.
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// Deal the first game and start accepting clicks. Ignored once a
    /// game is dealt.
    Start,
    /// Repaint.
    Paint,
    /// Throw the current game away and deal a new one.
    Deal,
    Resize { width: i32, height: i32 },
    /// Pointer click; `clicks > 1` for the last click of a rapid series.
    Click { point: Point, clicks: u32 },
    /// A drag has started. The producer keeps updating the tracker.
    Drag(DragTracker),
    /// Stop the loop.
    Shutdown,
}

/// Producer side of the input queue.
#[derive(Clone, Debug)]
pub struct InputSender {
    tx: SyncSender<InputEvent>,
}

impl InputSender {
    /// Post an event, blocking while the queue is full.
    pub fn post(&self, event: InputEvent) -> Result<(), EngineError> {
        self.tx.send(event).map_err(|_| EngineError::InputClosed)
    }

    /// Post an event only if the queue has room. Returns whether it was
    /// accepted.
    pub fn offer(&self, event: InputEvent) -> Result<bool, EngineError> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Disconnected(_)) => Err(EngineError::InputClosed),
        }
    }
}

/// Create the single-slot input queue.
#[must_use]
pub fn input_channel() -> (InputSender, Receiver<InputEvent>) {
    let (tx, rx) = mpsc::sync_channel(1);
    (InputSender { tx }, rx)
}

/// Event loop owning one game.
pub struct GameLoop<V: GameVariant, C: Clock, R: Renderer> {
    session: GameSession<V>,
    scheduler: FrameScheduler<C, R>,
    events: Receiver<InputEvent>,
    started: bool,
    running: bool,
}

impl<V: GameVariant, C: Clock, R: Renderer> GameLoop<V, C, R> {
    #[must_use]
    pub fn new(session: GameSession<V>, scheduler: FrameScheduler<C, R>, events: Receiver<InputEvent>) -> Self {
        Self {
            session,
            scheduler,
            events,
            started: false,
            running: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession<V> {
        &self.session
    }

    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler<C, R> {
        &self.scheduler
    }

    /// Whether the first game has been dealt.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether clicks and drags are being accepted.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle events until `Shutdown` or until every sender is dropped.
    pub fn run(&mut self) -> Result<(), EngineError> {
        while let Ok(event) = self.events.recv() {
            match self.handle(event) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    error!("game loop stopped: {}", err);
                    return Err(err);
                }
            }
        }
        info!("game loop finished");
        Ok(())
    }

    /// Handle one event. Returns `false` on `Shutdown`.
    pub fn handle(&mut self, event: InputEvent) -> Result<bool, EngineError> {
        match event {
            InputEvent::Start if self.started => {
                debug!("ignoring start, a game is already dealt");
            }
            InputEvent::Start => {
                self.started = true;
                self.running = true;
                self.session.deal()?;
                self.settle();
                self.check_game_won();
            }
            InputEvent::Paint => self.paint(),
            InputEvent::Deal => {
                self.started = true;
                self.running = true;
                self.scheduler.renderer_mut().set_status(None);
                self.session.redeal()?;
                self.settle();
                self.check_game_won();
            }
            InputEvent::Resize { width, height } => self.session.dispatch_resize(width, height)?,
            InputEvent::Click { point, clicks } if self.running => {
                self.session.dispatch_click(point, clicks > 1, &mut self.scheduler)?;
                self.settle();
                self.check_game_won();
            }
            InputEvent::Drag(tracker) if self.running => {
                self.handle_drag(tracker)?;
                self.check_game_won();
            }
            InputEvent::Click { .. } | InputEvent::Drag(_) => {
                debug!("ignoring input, game is not running");
            }
            InputEvent::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    fn handle_drag(&mut self, tracker: DragTracker) -> Result<(), EngineError> {
        let start = tracker.start();

        if self.session.board().selection().is_held()
            && !self.session.board_mut().selection_bounds().contains(start)
        {
            // Dragging something other than the held cards
            self.session.board_mut().select_end(None)?;
            self.settle();
        }

        if !self.session.board().selection().is_held() {
            self.session.dispatch_click(start, false, &mut self.scheduler)?;
            self.settle();
        }

        if self.session.board().selection().is_held() {
            let mut motion = DragMotion::new(tracker);
            self.scheduler.play(&mut motion, self.session.board_mut());
            let bounds = self.session.board_mut().selection_bounds();
            self.session.dispatch_drag(bounds)?;
            self.settle();
        }
        Ok(())
    }

    /// Flush the log through the scheduler, then repaint.
    fn settle(&mut self) {
        self.session.board_mut().flush(&mut self.scheduler);
        self.paint();
    }

    fn paint(&mut self) {
        self.scheduler.renderer_mut().paint(self.session.board(), None);
    }

    fn check_game_won(&mut self) {
        if self.session.is_game_won() {
            info!("{} won", self.session.variant().name());
            self.running = false;
            self.scheduler.renderer_mut().set_status(Some(GAME_DONE));
        }
    }
}
