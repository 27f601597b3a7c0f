//! Secondary motion for single bones of an animated rig.
//!
//! Each [`JiggleInstance`] drives one bone. Every frame, after the rig's own
//! animation has been applied, it integrates a point tethered to the bone,
//! pushed around by the bone's motion and by gravity (or a restoring force
//! along the bone's forward axis), then rotates the bone toward that point
//! within configurable per-axis limits.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use sway_jiggle::{ForwardAxis, JiggleConfig, JiggleInstance};
//! use sway_rig::{Bone, Skeleton, SkeletonRig};
//!
//! let mut skeleton = Skeleton::new();
//! let head = skeleton.add_bone(Bone::new("head")).unwrap();
//! skeleton.add_bone(Bone::new("ear").with_parent(head)).unwrap();
//! let mut rig = SkeletonRig::new(skeleton);
//!
//! let config = JiggleConfig::new("ear")
//!     .with_forward_axis(ForwardAxis::ZPlus)
//!     .with_damping(2.0);
//! let mut ear = JiggleInstance::new(config, Vec3::Z);
//!
//! // Once per frame, after animation
//! ear.step(Some(&mut rig), 1.0 / 60.0);
//! assert!((ear.simulated_position() - Vec3::Z).length() < 1e-3);
//! ```

mod axis;
mod clock;
mod collision;
mod config;
mod error;
mod group;
mod solver;

pub use axis::ForwardAxis;
pub use clock::{FrameClock, FrameTimes, TickRate};
pub use collision::CollisionSphere;
pub use config::{JiggleConfig, RESTORING_FORCE, WriteBack};
pub use error::ConfigError;
pub use group::JiggleGroup;
pub use solver::{
    JiggleInstance, StepOutcome, TETHER_LENGTH, apply_force, clamp_rotation, constrain_to_tether,
    estimate_velocity, rotation_to,
};
