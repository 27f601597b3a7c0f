//! Per-instance jiggle configuration.

use crate::axis::ForwardAxis;
use crate::clock::TickRate;
use crate::collision::CollisionSphere;
use crate::error::ConfigError;
use glam::{Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magnitude of the restoring force used when gravity is disabled.
pub const RESTORING_FORCE: f32 = 9.81;

/// How the solved orientation is written onto the bone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WriteBack {
    /// Blend over the animated pose through the rig's override slot.
    ///
    /// With `persistent` set, the override stands until replaced, so each
    /// frame starts from the previous frame's blended result.
    Blended {
        /// Blend weight in `[0, 1]`.
        amount: f32,
        /// Whether the override outlives the current frame.
        persistent: bool,
    },
    /// Replace the bone's local pose for this frame.
    Replace,
}

impl Default for WriteBack {
    fn default() -> Self {
        WriteBack::Blended {
            amount: 0.5,
            persistent: true,
        }
    }
}

/// Configuration for one jiggle bone.
///
/// Fields may be changed freely between frames. The solver assumes the
/// ranges documented on each field; use [`JiggleConfig::validate`] to check
/// host input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JiggleConfig {
    /// Whether the instance simulates at all.
    pub enabled: bool,
    /// Name of the driven bone in the rig.
    pub bone_name: Option<String>,
    /// Force multiplier (> 0).
    pub stiffness: f32,
    /// Velocity decay rate per second (>= 0).
    pub damping: f32,
    /// Use `gravity` instead of the restoring force.
    pub use_gravity: bool,
    /// World-space force, used only when `use_gravity` is set.
    pub gravity: Vec3,
    /// Bone-local resting direction.
    pub forward_axis: ForwardAxis,
    /// Per-axis lower rotation limit in degrees.
    pub min_degrees: Vec3,
    /// Per-axis upper rotation limit in degrees.
    pub max_degrees: Vec3,
    /// Optional sphere the simulated point stays outside of.
    pub collision: Option<CollisionSphere>,
    /// Override policy for the solved orientation.
    pub write_back: WriteBack,
    /// Which clock delta drives the instance.
    pub tick_rate: TickRate,
}

impl Default for JiggleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bone_name: None,
            stiffness: 1.0,
            damping: 0.0,
            use_gravity: false,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            forward_axis: ForwardAxis::default(),
            min_degrees: Vec3::splat(-180.0),
            max_degrees: Vec3::splat(180.0),
            collision: None,
            write_back: WriteBack::default(),
            tick_rate: TickRate::default(),
        }
    }
}

impl JiggleConfig {
    /// Creates a default configuration driving the named bone.
    pub fn new(bone_name: impl Into<String>) -> Self {
        Self {
            bone_name: Some(bone_name.into()),
            ..Self::default()
        }
    }

    /// Loose, slow-settling motion.
    pub fn soft(bone_name: impl Into<String>) -> Self {
        Self {
            stiffness: 0.5,
            damping: 2.0,
            ..Self::new(bone_name)
        }
    }

    /// Tight motion limited to 45 degrees per axis.
    pub fn stiff(bone_name: impl Into<String>) -> Self {
        Self {
            stiffness: 4.0,
            damping: 10.0,
            min_degrees: Vec3::splat(-45.0),
            max_degrees: Vec3::splat(45.0),
            ..Self::new(bone_name)
        }
    }

    /// Zero rotation range: the point still simulates but the bone never moves.
    pub fn rigid(bone_name: impl Into<String>) -> Self {
        Self {
            min_degrees: Vec3::ZERO,
            max_degrees: Vec3::ZERO,
            ..Self::new(bone_name)
        }
    }

    /// Sets the stiffness.
    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Sets the damping.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Enables gravity with the given world-space vector.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.use_gravity = true;
        self.gravity = gravity;
        self
    }

    /// Sets the forward axis.
    pub fn with_forward_axis(mut self, axis: ForwardAxis) -> Self {
        self.forward_axis = axis;
        self
    }

    /// Sets the per-axis rotation limits in degrees.
    pub fn with_limits(mut self, min_degrees: Vec3, max_degrees: Vec3) -> Self {
        self.min_degrees = min_degrees;
        self.max_degrees = max_degrees;
        self
    }

    /// Sets the collision sphere.
    pub fn with_collision(mut self, sphere: CollisionSphere) -> Self {
        self.collision = Some(sphere);
        self
    }

    /// Sets the write-back policy.
    pub fn with_write_back(mut self, write_back: WriteBack) -> Self {
        self.write_back = write_back;
        self
    }

    /// Sets the tick rate.
    pub fn with_tick_rate(mut self, tick_rate: TickRate) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Lower rotation limits in radians.
    pub fn min_radians(&self) -> Vec3 {
        self.min_degrees * (std::f32::consts::PI / 180.0)
    }

    /// Upper rotation limits in radians.
    pub fn max_radians(&self) -> Vec3 {
        self.max_degrees * (std::f32::consts::PI / 180.0)
    }

    /// World-space force for a bone whose rest pose has the given rotation.
    ///
    /// Without gravity this is the forward axis carried into world space by
    /// the rest rotation, scaled to [`RESTORING_FORCE`].
    pub fn effective_force(&self, rest_rotation: Quat) -> Vec3 {
        if self.use_gravity {
            self.gravity
        } else {
            (rest_rotation * self.forward_axis.direction()).normalize_or_zero() * RESTORING_FORCE
        }
    }

    /// Checks the documented ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(ConfigError::InvalidStiffness(self.stiffness));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity);
        }
        let limits = self.min_degrees.to_array().into_iter().zip(self.max_degrees.to_array());
        for (axis, (min, max)) in ['x', 'y', 'z'].into_iter().zip(limits) {
            if min > max {
                return Err(ConfigError::InvertedLimit { axis, min, max });
            }
        }
        if let Some(sphere) = &self.collision {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(ConfigError::InvalidCollisionRadius(sphere.radius));
            }
        }
        if let WriteBack::Blended { amount, .. } = self.write_back {
            if !(0.0..=1.0).contains(&amount) {
                return Err(ConfigError::InvalidBlendAmount(amount));
            }
        }
        Ok(())
    }
}
