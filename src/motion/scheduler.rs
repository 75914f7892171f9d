//! Motion drivers.
//!
//! [`FrameScheduler`] paces a motion at a fixed frame rate:
//!
//! 1. `init`; return at once if the motion is already done
//! 2. update, render, and sleep whatever is left of the frame period
//! 3. when a frame overruns, bank the overrun; once the bank exceeds a full
//!    period, run silent updates (no render) to catch up, at most
//!    `max_frame_skips` per cycle
//! 4. after `no_delays_per_yield` overruns in a row, yield the thread
//!
//! Sleeping is measured, and any over-sleep is taken off the next frame.
//! The catch-up bound keeps a slow renderer from turning one late frame
//! into a burst of invisible updates.

use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::{Motion, MotionDriver, Renderer};
use crate::board::Board;
use crate::core::EngineConfig;

/// Time source for the scheduler.
pub trait Clock {
    /// Time elapsed since some fixed origin.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);

    /// Give other threads a chance to run.
    fn yield_now(&mut self) {}
}

/// Wall clock.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}

/// Counters accumulated across played motions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Motions that got past `init`.
    pub motions_played: u64,
    /// Updates followed by a render.
    pub frames_rendered: u64,
    /// Catch-up updates without a render.
    pub silent_updates: u64,
    /// Frames that took longer than the period.
    pub overrun_frames: u64,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fixed-rate motion driver.
pub struct FrameScheduler<C: Clock, R: Renderer> {
    clock: C,
    renderer: R,
    period: i64,
    max_frame_skips: u32,
    no_delays_per_yield: u32,
    stats: FrameStats,
}

impl<C: Clock, R: Renderer> FrameScheduler<C, R> {
    #[must_use]
    pub fn new(config: &EngineConfig, clock: C, renderer: R) -> Self {
        assert!(config.fps > 0, "Frame rate must be positive");
        Self {
            clock,
            renderer,
            period: config.period_nanos() as i64,
            max_frame_skips: config.max_frame_skips,
            no_delays_per_yield: config.no_delays_per_yield.max(1),
            stats: FrameStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Frame period.
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period as u64)
    }

    fn nanos(&self) -> i64 {
        self.clock.now().as_nanos() as i64
    }
}

impl<C: Clock, R: Renderer> MotionDriver for FrameScheduler<C, R> {
    fn play(&mut self, motion: &mut dyn Motion, board: &mut Board) {
        motion.init(board);
        if motion.is_done() {
            return;
        }
        self.stats.motions_played += 1;

        let period = self.period;
        let mut over_sleep: i64 = 0;
        let mut no_delays: u32 = 0;
        let mut excess: i64 = 0;
        let mut before = self.nanos();

        loop {
            motion.update_frame(board);
            self.renderer.paint(board, Some(&*motion));
            self.stats.frames_rendered += 1;
            if motion.is_done() {
                return;
            }

            let after = self.nanos();
            let sleep = period - (after - before) - over_sleep;
            if sleep > 0 {
                self.clock.sleep(Duration::from_nanos(sleep as u64));
                over_sleep = (self.nanos() - after) - sleep;
            } else {
                excess -= sleep;
                over_sleep = 0;
                self.stats.overrun_frames += 1;
                no_delays += 1;
                if no_delays >= self.no_delays_per_yield {
                    trace!("yielding after {} overrun frames", no_delays);
                    self.clock.yield_now();
                    no_delays = 0;
                }
            }

            before = self.nanos();

            let mut skips = 0;
            while excess > period && skips < self.max_frame_skips {
                excess -= period;
                motion.update_frame(board);
                self.stats.silent_updates += 1;
                skips += 1;
                if motion.is_done() {
                    debug!("motion finished during catch-up");
                    return;
                }
            }
        }
    }
}

/// Runs motions to completion without rendering or waiting.
///
/// A drag motion only finishes once its tracker has ended, so this driver
/// must not be handed a drag that is still in progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantDriver;

impl MotionDriver for InstantDriver {
    fn play(&mut self, motion: &mut dyn Motion, board: &mut Board) {
        motion.init(board);
        while !motion.is_done() {
            motion.update_frame(board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Surface;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock advanced only by sleeping or by the renderer.
    #[derive(Clone, Default)]
    struct ManualClock {
        now: Rc<Cell<u64>>,
        yields: Rc<Cell<u32>>,
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            Duration::from_nanos(self.now.get())
        }

        fn sleep(&mut self, duration: Duration) {
            self.now.set(self.now.get() + duration.as_nanos() as u64);
        }

        fn yield_now(&mut self) {
            self.yields.set(self.yields.get() + 1);
        }
    }

    /// Renderer whose every paint costs a fixed amount of clock time.
    struct CostlyRenderer {
        clock: ManualClock,
        cost: u64,
    }

    impl Renderer for CostlyRenderer {
        fn paint(&mut self, _board: &Board, _motion: Option<&dyn Motion>) {
            self.clock.now.set(self.clock.now.get() + self.cost);
        }
    }

    /// Finishes after a fixed number of updates.
    struct Countdown {
        left: u32,
        updates: u32,
    }

    impl Motion for Countdown {
        fn init(&mut self, _board: &mut Board) {}

        fn update_frame(&mut self, _board: &mut Board) {
            self.updates += 1;
            self.left = self.left.saturating_sub(1);
        }

        fn draw(&self, _surface: &mut dyn Surface) {}

        fn is_done(&self) -> bool {
            self.left == 0
        }
    }

    fn scheduler(cost: u64) -> (FrameScheduler<ManualClock, CostlyRenderer>, ManualClock) {
        let clock = ManualClock::default();
        let renderer = CostlyRenderer { clock: clock.clone(), cost };
        let config = EngineConfig::default().with_fps(10);
        (FrameScheduler::new(&config, clock.clone(), renderer), clock)
    }

    #[test]
    fn test_fast_frames_sleep_to_period() {
        let (mut sched, clock) = scheduler(1_000_000);
        let mut board = Board::new(EngineConfig::default().with_seed(0)).unwrap();
        let mut motion = Countdown { left: 5, updates: 0 };

        sched.play(&mut motion, &mut board);

        let stats = sched.stats();
        assert_eq!(stats.frames_rendered, 5);
        assert_eq!(stats.silent_updates, 0);
        assert_eq!(stats.overrun_frames, 0);
        // Four full periods slept through, plus the last frame's paint
        assert_eq!(clock.now.get(), 4 * 100_000_000 + 1_000_000);
    }

    #[test]
    fn test_slow_frames_catch_up_with_bound() {
        // Every paint takes 3.5 periods
        let (mut sched, _clock) = scheduler(350_000_000);
        let mut board = Board::new(EngineConfig::default().with_seed(0)).unwrap();
        let mut motion = Countdown { left: 40, updates: 0 };

        sched.play(&mut motion, &mut board);

        let stats = sched.stats();
        assert_eq!(u64::from(motion.updates), stats.frames_rendered + stats.silent_updates);
        assert!(stats.silent_updates > 0);
        assert!(stats.silent_updates <= stats.frames_rendered * 5);
        // Every measured frame overran; the final one may not get measured
        assert!(stats.overrun_frames <= stats.frames_rendered);
        assert!(stats.overrun_frames + 1 >= stats.frames_rendered);
    }

    #[test]
    fn test_catch_up_never_exceeds_max_skips_per_cycle() {
        let clock = ManualClock::default();
        // Each paint costs 50 periods
        let renderer = CostlyRenderer { clock: clock.clone(), cost: 5_000_000_000 };
        let config = EngineConfig::default().with_fps(10).with_max_frame_skips(2);
        let mut sched = FrameScheduler::new(&config, clock, renderer);
        let mut board = Board::new(EngineConfig::default().with_seed(0)).unwrap();
        let mut motion = Countdown { left: 30, updates: 0 };

        sched.play(&mut motion, &mut board);

        let stats = sched.stats();
        assert!(stats.silent_updates <= stats.frames_rendered * 2);
        assert_eq!(u64::from(motion.updates), stats.frames_rendered + stats.silent_updates);
    }

    #[test]
    fn test_yields_after_consecutive_overruns() {
        let (mut sched, clock) = scheduler(150_000_000);
        let mut board = Board::new(EngineConfig::default().with_seed(0)).unwrap();
        let mut motion = Countdown { left: 60, updates: 0 };

        sched.play(&mut motion, &mut board);

        assert!(sched.stats().overrun_frames >= 16);
        assert!(clock.yields.get() >= 1);
    }

    #[test]
    fn test_done_after_init_is_not_played() {
        let (mut sched, clock) = scheduler(1_000_000);
        let mut board = Board::new(EngineConfig::default().with_seed(0)).unwrap();
        let mut motion = Countdown { left: 0, updates: 0 };

        sched.play(&mut motion, &mut board);

        assert_eq!(sched.stats(), FrameStats::default());
        assert_eq!(clock.now.get(), 0);
        assert_eq!(motion.updates, 0);
    }

    #[test]
    fn test_instant_driver() {
        let mut board = Board::new(EngineConfig::default().with_seed(0)).unwrap();
        let mut motion = Countdown { left: 7, updates: 0 };
        InstantDriver.play(&mut motion, &mut board);
        assert_eq!(motion.updates, 7);
    }
}
