//! Per-frame jiggle solve for a single bone.
//!
//! A [`JiggleInstance`] keeps a world-space point tethered one unit from the
//! bone's origin. Each frame the point is integrated (Verlet-style velocity
//! from the last two positions, plus a force), projected back onto the
//! tether, pushed out of the optional collision sphere, and the bone is
//! rotated so its forward axis points at it.
//!
//! The stages are exposed as free functions so hosts can reuse them.

use crate::clock::FrameClock;
use crate::collision::CollisionSphere;
use crate::config::{JiggleConfig, WriteBack};
use glam::{Quat, Vec3};
use sway_rig::{BoneId, Rig, Transform};

/// Distance between the bone origin and the simulated point.
///
/// Fixed regardless of rig scale or bone length.
pub const TETHER_LENGTH: f32 = 1.0;

/// Rotations with a smaller angle (radians) are not applied.
const ANGLE_EPSILON: f32 = 1e-6;

/// What a single [`JiggleInstance::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The instance is disabled; nothing changed.
    Disabled,
    /// The delta was zero, negative, or not finite; nothing changed.
    Idle,
    /// The rig is absent or the bone could not be found; nothing changed.
    Unresolved,
    /// The point moved but no rotation was needed (or allowed).
    Aligned,
    /// The point moved and the bone was rotated.
    Rotated {
        /// Unit rotation axis in bone space.
        axis: Vec3,
        /// Rotation angle in radians, after limits.
        angle: f32,
    },
}

impl StepOutcome {
    /// Rotation angle applied this frame (zero unless [`StepOutcome::Rotated`]).
    pub fn angle(&self) -> f32 {
        match self {
            StepOutcome::Rotated { angle, .. } => *angle,
            _ => 0.0,
        }
    }

    /// Returns true if the simulation state advanced.
    pub fn simulated(&self) -> bool {
        matches!(self, StepOutcome::Aligned | StepOutcome::Rotated { .. })
    }
}

/// Bone transforms read once per step.
struct BoneFrame {
    bone: BoneId,
    world: Transform,
    rest_world: Transform,
    local: Transform,
}

/// One simulated jiggle bone.
#[derive(Debug, Clone)]
pub struct JiggleInstance {
    /// Configuration, free to change between frames.
    pub config: JiggleConfig,
    simulated_position: Vec3,
    previous_position: Vec3,
    orientation: Quat,
    bone: Option<BoneId>,
    reported_unresolved: bool,
}

impl JiggleInstance {
    /// Activates an instance at its current world position.
    pub fn new(config: JiggleConfig, position: Vec3) -> Self {
        Self {
            config,
            simulated_position: position,
            previous_position: position,
            orientation: Quat::IDENTITY,
            bone: None,
            reported_unresolved: false,
        }
    }

    /// The simulated point in world space.
    pub fn simulated_position(&self) -> Vec3 {
        self.simulated_position
    }

    /// The point as it stood when the last step began integrating.
    pub fn previous_position(&self) -> Vec3 {
        self.previous_position
    }

    /// World orientation of the driven bone after the last step.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// World transform of the instance itself.
    ///
    /// Anything attached to the instance rather than to the bone should
    /// follow this.
    pub fn transform(&self) -> Transform {
        Transform::from_translation_rotation(self.simulated_position, self.orientation)
    }

    /// The bone the most recent step resolved.
    ///
    /// Cleared when a step finds no rig or no bone; disabled and idle steps
    /// leave it as it was.
    pub fn bone(&self) -> Option<BoneId> {
        self.bone
    }

    /// Moves the point without imparting velocity.
    pub fn teleport(&mut self, position: Vec3) {
        self.simulated_position = position;
        self.previous_position = position;
    }

    /// Steps with the delta the clock reports for this instance's tick rate.
    pub fn tick<R, C>(&mut self, rig: Option<&mut R>, clock: &C) -> StepOutcome
    where
        R: Rig + ?Sized,
        C: FrameClock + ?Sized,
    {
        let delta = clock.delta(self.config.tick_rate);
        self.step(rig, delta)
    }

    /// Advances the simulation by `delta` seconds and writes the bone override.
    ///
    /// Must run after the rig's animation for the frame has been applied.
    /// A disabled instance, a missing rig or bone, or a non-positive delta
    /// leaves all state untouched.
    pub fn step<R: Rig + ?Sized>(&mut self, rig: Option<&mut R>, delta: f32) -> StepOutcome {
        if !self.config.enabled {
            return StepOutcome::Disabled;
        }
        if !(delta.is_finite() && delta > 0.0) {
            return StepOutcome::Idle;
        }
        let Some(rig) = rig else {
            self.report_unresolved("no rig");
            return StepOutcome::Unresolved;
        };
        let Some(frame) = self.read_bone(&*rig) else {
            self.report_unresolved("bone not found");
            return StepOutcome::Unresolved;
        };
        self.bone = Some(frame.bone);
        if self.reported_unresolved {
            log::debug!("jiggle bone {:?} resolved to {}", self.config.bone_name, frame.bone);
            self.reported_unresolved = false;
        }

        self.simulate(&frame, delta);

        let forward = self.config.forward_axis.direction();
        let target = frame
            .world
            .inverse_transform_point(self.simulated_position)
            .try_normalize()
            .unwrap_or(forward);
        let rotation = clamp_rotation(
            rotation_to(forward, target),
            self.config.min_radians(),
            self.config.max_radians(),
        );
        let angle = rotation.length();

        let outcome = match rotation.try_normalize() {
            Some(axis) if angle > ANGLE_EPSILON => {
                let pose = rotate_local(frame.local, axis, angle);
                match self.config.write_back {
                    WriteBack::Blended { amount, persistent } => {
                        rig.set_bone_pose_override(frame.bone, pose, amount, persistent)
                    }
                    WriteBack::Replace => rig.set_bone_local_pose(frame.bone, pose),
                }
                StepOutcome::Rotated { axis, angle }
            }
            _ => StepOutcome::Aligned,
        };

        self.orientation = rig
            .bone_world_pose(frame.bone)
            .map_or(frame.world.rotation, |t| t.rotation);

        log::trace!(
            "jiggle bone {}: point {} {:?}",
            frame.bone,
            self.simulated_position,
            outcome
        );
        outcome
    }

    fn read_bone<R: Rig + ?Sized>(&self, rig: &R) -> Option<BoneFrame> {
        let bone = rig.find_bone(self.config.bone_name.as_deref()?)?;
        Some(BoneFrame {
            bone,
            world: rig.bone_world_pose(bone)?,
            rest_world: rig.bone_world_rest(bone)?,
            local: rig.bone_local_pose(bone)?,
        })
    }

    /// Integrates the point and applies the tether and collision constraints.
    fn simulate(&mut self, frame: &BoneFrame, delta: f32) {
        let force = self.config.effective_force(frame.rest_world.rotation);
        let velocity = apply_force(
            estimate_velocity(self.simulated_position, self.previous_position, delta),
            force,
            self.config.stiffness,
            self.config.damping,
            delta,
        );

        let start = self.simulated_position;
        self.previous_position = start;

        let goal = frame.world.translation;
        let rest_forward = frame.rest_world.rotation * self.config.forward_axis.direction();
        let fallback = (start - goal).try_normalize().unwrap_or(rest_forward);
        let mut position = constrain_to_tether(goal, start + velocity * delta, fallback);

        if let Some(sphere) = self.config.collision.filter(CollisionSphere::is_valid) {
            position = sphere.push_out(position, position - goal);
        }
        self.simulated_position = position;
    }

    fn report_unresolved(&mut self, reason: &str) {
        self.bone = None;
        if !self.reported_unresolved {
            log::debug!("jiggle bone {:?} skipped: {reason}", self.config.bone_name);
            self.reported_unresolved = true;
        }
    }
}

/// Velocity implied by two successive positions.
pub fn estimate_velocity(current: Vec3, previous: Vec3, delta: f32) -> Vec3 {
    (current - previous) / delta
}

/// Adds `force * stiffness` to the velocity, then applies first-order damping.
///
/// The damping term is `velocity * damping * delta`; when `damping * delta`
/// exceeds one the velocity reverses.
pub fn apply_force(velocity: Vec3, force: Vec3, stiffness: f32, damping: f32, delta: f32) -> Vec3 {
    let velocity = velocity + force * stiffness;
    velocity - velocity * damping * delta
}

/// Projects `point` onto the tether sphere around `goal`.
///
/// If `point` coincides with `goal`, `fallback` supplies the direction.
pub fn constrain_to_tether(goal: Vec3, point: Vec3, fallback: Vec3) -> Vec3 {
    let direction = (point - goal)
        .try_normalize()
        .unwrap_or_else(|| fallback.normalize_or(Vec3::Z));
    goal + direction * TETHER_LENGTH
}

/// Axis-angle vector rotating unit `forward` onto unit `target`.
///
/// Returns zero when the two are parallel or antiparallel.
pub fn rotation_to(forward: Vec3, target: Vec3) -> Vec3 {
    let angle = forward.dot(target).clamp(-1.0, 1.0).acos();
    match forward.cross(target).try_normalize() {
        Some(axis) => axis * angle,
        None => Vec3::ZERO,
    }
}

/// Clamps each component of an axis-angle vector independently.
///
/// Inverted ranges do not panic; the upper bound wins.
pub fn clamp_rotation(rotation: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    rotation.max(min).min(max)
}

/// Rotates a local pose about a bone-space axis, keeping its origin and scale.
fn rotate_local(local: Transform, axis: Vec3, angle: f32) -> Transform {
    // Direction only: carry the axis through the rotation, never the translation
    let axis = (local.rotation * axis).normalize_or(axis);
    local.with_rotation((Quat::from_axis_angle(axis, angle) * local.rotation).normalize())
}
