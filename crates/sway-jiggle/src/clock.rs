//! Frame timing: which delta an instance consumes each tick.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which host clock drives an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TickRate {
    /// The fixed simulation step.
    #[default]
    Fixed,
    /// The variable display-frame step.
    Variable,
}

/// Source of elapsed time since the previous tick.
pub trait FrameClock {
    /// Seconds elapsed on the fixed simulation clock.
    fn fixed_delta(&self) -> f32;

    /// Seconds elapsed on the variable display clock.
    fn variable_delta(&self) -> f32;

    /// Seconds elapsed for the given rate.
    fn delta(&self, rate: TickRate) -> f32 {
        match rate {
            TickRate::Fixed => self.fixed_delta(),
            TickRate::Variable => self.variable_delta(),
        }
    }
}

/// Frame deltas supplied directly by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTimes {
    /// Fixed simulation step in seconds.
    pub fixed: f32,
    /// Display frame step in seconds.
    pub variable: f32,
}

impl Default for FrameTimes {
    fn default() -> Self {
        Self {
            fixed: Self::DEFAULT_FIXED_STEP,
            variable: Self::DEFAULT_FIXED_STEP,
        }
    }
}

impl FrameTimes {
    /// Default fixed step (60 Hz).
    pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 60.0;

    /// Creates frame times from both deltas.
    pub fn new(fixed: f32, variable: f32) -> Self {
        Self { fixed, variable }
    }

    /// Creates frame times with a fixed step of `1 / hz` seconds.
    pub fn with_fixed_rate(hz: f32) -> Self {
        Self {
            fixed: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Records the display delta for the frame that just started.
    pub fn set_variable(&mut self, delta: f32) {
        self.variable = delta;
    }
}

impl FrameClock for FrameTimes {
    fn fixed_delta(&self) -> f32 {
        self.fixed
    }

    fn variable_delta(&self) -> f32 {
        self.variable
    }
}
