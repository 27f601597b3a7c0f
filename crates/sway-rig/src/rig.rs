//! The rig interface consumed by secondary-motion solvers.
//!
//! A rig exposes, per bone, the animated pose in rig space, the rest pose,
//! and the local (parent-space) pose, and accepts pose overrides written back
//! by solvers. [`SkeletonRig`] is a complete in-memory implementation backed by
//! a [`Skeleton`] and an animated [`Pose`].

use crate::error::RigError;
use crate::skeleton::{BoneId, Pose, Skeleton};
use crate::transform::Transform;
use glam::Vec3;

/// Skeletal rig as seen by a solver.
///
/// Global poses are expressed in rig space; [`Rig::rig_transform`] maps rig
/// space to world space. Every accessor returns `None` for bones the rig does
/// not know about.
pub trait Rig {
    /// Resolves a bone name.
    fn find_bone(&self, name: &str) -> Option<BoneId>;

    /// Rig-to-world transform.
    fn rig_transform(&self) -> Transform;

    /// Current pose of a bone in rig space, overrides included.
    fn bone_global_pose(&self, bone: BoneId) -> Option<Transform>;

    /// Rest pose of a bone in rig space.
    fn bone_global_rest(&self, bone: BoneId) -> Option<Transform>;

    /// Current pose of a bone relative to its parent, overrides included.
    fn bone_local_pose(&self, bone: BoneId) -> Option<Transform>;

    /// Blends `pose` (parent space) over the animated pose by `amount`.
    ///
    /// A persistent override stays until replaced or cleared; a transient one
    /// lasts until the rig's next animation update.
    fn set_bone_pose_override(&mut self, bone: BoneId, pose: Transform, amount: f32, persistent: bool);

    /// Replaces the bone's local pose outright.
    fn set_bone_local_pose(&mut self, bone: BoneId, pose: Transform);

    /// Current pose of a bone in world space.
    fn bone_world_pose(&self, bone: BoneId) -> Option<Transform> {
        Some(self.rig_transform().then(&self.bone_global_pose(bone)?))
    }

    /// Rest pose of a bone in world space.
    fn bone_world_rest(&self, bone: BoneId) -> Option<Transform> {
        Some(self.rig_transform().then(&self.bone_global_rest(bone)?))
    }

    /// Converts a rig-space point to world space.
    fn to_world(&self, point: Vec3) -> Vec3 {
        self.rig_transform().transform_point(point)
    }

    /// Converts a world-space point to rig space.
    fn to_rig(&self, point: Vec3) -> Vec3 {
        self.rig_transform().inverse_transform_point(point)
    }
}

/// A pose override stored on a bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseOverride {
    /// Target local transform.
    pub pose: Transform,
    /// Blend weight in `[0, 1]` applied over the animated pose.
    pub amount: f32,
    /// Whether the override survives [`SkeletonRig::clear_transient_overrides`].
    pub persistent: bool,
}

/// In-memory rig: a skeleton, its animated pose, and per-bone overrides.
#[derive(Debug, Clone)]
pub struct SkeletonRig {
    skeleton: Skeleton,
    pose: Pose,
    overrides: Vec<Option<PoseOverride>>,
    transform: Transform,
}

impl SkeletonRig {
    /// Creates a rig posed at rest, placed at the world origin.
    pub fn new(skeleton: Skeleton) -> Self {
        let pose = Pose::from_rest(&skeleton);
        let overrides = vec![None; skeleton.bone_count()];
        Self {
            skeleton,
            pose,
            overrides,
            transform: Transform::IDENTITY,
        }
    }

    /// Sets the rig-to-world transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Moves the whole rig in the world.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Returns the underlying skeleton.
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Returns the animated pose, without overrides.
    pub fn animated_pose(&self) -> &Pose {
        &self.pose
    }

    /// Resolves a bone name, reporting missing bones as errors.
    pub fn bone_id(&self, name: &str) -> Result<BoneId, RigError> {
        self.skeleton
            .find_bone(name)
            .ok_or_else(|| RigError::BoneNotFound(name.to_string()))
    }

    /// Writes the animation system's local pose for a bone.
    ///
    /// This is the base pose solvers run after; it does not touch overrides.
    pub fn set_animated_local(&mut self, bone: BoneId, pose: Transform) -> Result<(), RigError> {
        self.pose.set(bone, pose)
    }

    /// Returns every bone's animated pose to rest.
    pub fn reset_to_rest(&mut self) {
        self.pose = Pose::from_rest(&self.skeleton);
    }

    /// Returns the override stored on a bone.
    pub fn pose_override(&self, bone: BoneId) -> Option<&PoseOverride> {
        self.overrides.get(bone.index()).and_then(Option::as_ref)
    }

    /// Drops overrides that were not written as persistent.
    ///
    /// Call once per frame before writing the next animated pose.
    pub fn clear_transient_overrides(&mut self) {
        for slot in &mut self.overrides {
            if slot.is_some_and(|o| !o.persistent) {
                *slot = None;
            }
        }
    }

    /// Drops every override.
    pub fn clear_overrides(&mut self) {
        self.overrides.fill(None);
    }

    fn effective_local(&self, bone: BoneId) -> Option<Transform> {
        let animated = self.pose.get(bone)?;
        Some(match self.pose_override(bone) {
            Some(o) => animated.lerp(&o.pose, o.amount),
            None => animated,
        })
    }
}

impl Rig for SkeletonRig {
    fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.skeleton.find_bone(name)
    }

    fn rig_transform(&self) -> Transform {
        self.transform
    }

    fn bone_global_pose(&self, bone: BoneId) -> Option<Transform> {
        self.skeleton.compose(bone, |b| {
            self.effective_local(b).unwrap_or(Transform::IDENTITY)
        })
    }

    fn bone_global_rest(&self, bone: BoneId) -> Option<Transform> {
        self.skeleton.rest_transform(bone)
    }

    fn bone_local_pose(&self, bone: BoneId) -> Option<Transform> {
        self.effective_local(bone)
    }

    fn set_bone_pose_override(&mut self, bone: BoneId, pose: Transform, amount: f32, persistent: bool) {
        if let Some(slot) = self.overrides.get_mut(bone.index()) {
            *slot = Some(PoseOverride {
                pose,
                amount: amount.clamp(0.0, 1.0),
                persistent,
            });
        }
    }

    fn set_bone_local_pose(&mut self, bone: BoneId, pose: Transform) {
        // Unknown bones are ignored, matching the other accessors.
        let _ = self.pose.set(bone, pose);
    }
}
