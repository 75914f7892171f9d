//! Engine configuration.
//!
//! A single `EngineConfig` carries frame pacing, slide speed, card metrics
//! and the shuffle seed. Card metrics normally come from the image layer;
//! the engine only needs their size to lay out stacks and hit-test them.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Target motion updates per second.
    pub fps: u32,

    /// Maximum silent catch-up updates per scheduler cycle.
    /// Higher values keep animation wall-clock accurate under load at the
    /// cost of larger visible jumps.
    pub max_frame_skips: u32,

    /// Consecutive overrun frames before the scheduler yields its thread.
    pub no_delays_per_yield: u32,

    /// Card slide speed in pixels per second.
    pub slide_speed: f64,

    /// Card width in pixels.
    pub card_width: i32,

    /// Card height in pixels.
    pub card_height: i32,

    /// Vertical distance between two cards of a spread stack.
    pub spread_step: i32,

    /// Shuffle seed. `None` draws a random seed.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 24,
            max_frame_skips: 5,
            no_delays_per_yield: 16,
            slide_speed: 3000.0,
            card_width: 71,
            card_height: 96,
            spread_step: 15,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the target frame rate.
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "Frame rate must be positive");
        self.fps = fps;
        self
    }

    /// Set the catch-up bound.
    #[must_use]
    pub fn with_max_frame_skips(mut self, skips: u32) -> Self {
        self.max_frame_skips = skips;
        self
    }

    /// Set the slide speed in pixels per second.
    #[must_use]
    pub fn with_slide_speed(mut self, speed: f64) -> Self {
        assert!(speed > 0.0, "Slide speed must be positive");
        self.slide_speed = speed;
        self
    }

    /// Set card metrics.
    #[must_use]
    pub fn with_card_size(mut self, width: i32, height: i32) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    /// Set the spread step.
    #[must_use]
    pub fn with_spread_step(mut self, step: i32) -> Self {
        assert!(step > 0, "Spread step must be positive");
        self.spread_step = step;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the values the builders assert on.
    ///
    /// Deserialized configs skip the builders, so boards run this before
    /// using one.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.fps == 0 {
            return Err(EngineError::InvalidConfig("fps must be positive"));
        }
        if !(self.slide_speed.is_finite() && self.slide_speed > 0.0) {
            return Err(EngineError::InvalidConfig("slide_speed must be positive"));
        }
        if self.spread_step <= 0 {
            return Err(EngineError::InvalidConfig("spread_step must be positive"));
        }
        if self.card_width <= 0 || self.card_height <= 0 {
            return Err(EngineError::InvalidConfig("card size must be positive"));
        }
        Ok(())
    }

    /// Frame period in nanoseconds.
    #[must_use]
    pub fn period_nanos(&self) -> u64 {
        1_000_000_000 / u64::from(self.fps)
    }
}

/// Card metrics and spread step, copied into every display mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMetrics {
    pub width: i32,
    pub height: i32,
    pub spread_step: i32,
}

impl From<&EngineConfig> for CardMetrics {
    fn from(config: &EngineConfig) -> Self {
        Self {
            width: config.card_width,
            height: config.card_height,
            spread_step: config.spread_step,
        }
    }
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}
