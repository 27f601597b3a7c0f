//! Configuration error types.

use thiserror::Error;

/// Problems found by [`JiggleConfig::validate`](crate::JiggleConfig::validate).
///
/// The solver itself never reports these; a misconfigured instance simply
/// behaves oddly. Hosts that accept user input should validate first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Stiffness must be positive and finite.
    #[error("stiffness must be positive and finite, got {0}")]
    InvalidStiffness(f32),

    /// Damping must be non-negative and finite.
    #[error("damping must be non-negative and finite, got {0}")]
    InvalidDamping(f32),

    /// Gravity has a NaN or infinite component.
    #[error("gravity must be finite")]
    NonFiniteGravity,

    /// A rotation limit has its minimum above its maximum.
    #[error("rotation limit on {axis} is inverted: min {min} > max {max}")]
    InvertedLimit {
        /// Axis name.
        axis: char,
        /// Lower bound in degrees.
        min: f32,
        /// Upper bound in degrees.
        max: f32,
    },

    /// Collision sphere radius must be positive and finite.
    #[error("collision radius must be positive and finite, got {0}")]
    InvalidCollisionRadius(f32),

    /// Override blend amount must lie in `[0, 1]`.
    #[error("override amount must be in [0, 1], got {0}")]
    InvalidBlendAmount(f32),
}
