//! Skeletal rig types for sway.
//!
//! Provides bones, skeletons, poses, and the [`Rig`] trait through which
//! secondary-motion solvers read bone poses and write overrides back.

mod error;
mod rig;
mod skeleton;
mod transform;

pub use error::RigError;
pub use rig::{PoseOverride, Rig, SkeletonRig};
pub use skeleton::{Bone, BoneId, Pose, Skeleton};
pub use transform::Transform;
