//! Skeleton, bone, and pose types.

use crate::error::RigError;
use crate::transform::Transform;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bone identifier (index into skeleton).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoneId(pub u32);

impl BoneId {
    /// Returns the index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A bone in a skeleton.
#[derive(Debug, Clone)]
pub struct Bone {
    /// Human-readable name.
    pub name: String,
    /// Parent bone (None for root).
    pub parent: Option<BoneId>,
    /// Rest transform in parent space.
    pub rest: Transform,
}

impl Bone {
    /// Creates a root bone at the parent origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            rest: Transform::IDENTITY,
        }
    }

    /// Sets the parent bone.
    pub fn with_parent(mut self, parent: BoneId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the rest transform.
    pub fn with_rest(mut self, rest: Transform) -> Self {
        self.rest = rest;
        self
    }
}

/// A skeleton (hierarchy of bones in rest pose).
///
/// Parents are always added before their children, so the hierarchy is
/// acyclic by construction.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Creates an empty skeleton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bone, rejecting parents that are not already in the skeleton.
    pub fn add_bone(&mut self, bone: Bone) -> Result<BoneId, RigError> {
        let id = BoneId(self.bones.len() as u32);
        if let Some(parent) = bone.parent {
            if parent.index() >= self.bones.len() {
                return Err(RigError::InvalidParent { bone: id, parent });
            }
        }
        self.bones.push(bone);
        Ok(id)
    }

    /// Returns the number of bones.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Returns a bone by ID.
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.index())
    }

    /// Returns all bones.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Finds a bone by name.
    pub fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.bones
            .iter()
            .position(|b| b.name == name)
            .map(|i| BoneId(i as u32))
    }

    /// Composes per-bone local transforms from the root down to `id`.
    ///
    /// Returns `None` if `id` is not part of this skeleton.
    pub fn compose(&self, id: BoneId, local: impl Fn(BoneId) -> Transform) -> Option<Transform> {
        self.bone(id)?;

        // Collect chain from bone to root
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(bone_id) = current {
            chain.push(bone_id);
            current = self.bones.get(bone_id.index()).and_then(|b| b.parent);
        }

        Some(
            chain
                .into_iter()
                .rev()
                .fold(Transform::IDENTITY, |acc, bone_id| acc.then(&local(bone_id))),
        )
    }

    /// Computes the rest transform of a bone in skeleton space.
    pub fn rest_transform(&self, id: BoneId) -> Option<Transform> {
        self.compose(id, |b| {
            self.bone(b).map(|bone| bone.rest).unwrap_or(Transform::IDENTITY)
        })
    }
}

/// A pose: one local (parent-space) transform per bone.
#[derive(Debug, Clone)]
pub struct Pose {
    transforms: Vec<Transform>,
}

impl Pose {
    /// Creates a pose matching the skeleton's rest transforms.
    pub fn from_rest(skeleton: &Skeleton) -> Self {
        Self {
            transforms: skeleton.bones().iter().map(|b| b.rest).collect(),
        }
    }

    /// Gets the local transform for a bone.
    pub fn get(&self, id: BoneId) -> Option<Transform> {
        self.transforms.get(id.index()).copied()
    }

    /// Sets the local transform for a bone.
    pub fn set(&mut self, id: BoneId, transform: Transform) -> Result<(), RigError> {
        let slot = self
            .transforms
            .get_mut(id.index())
            .ok_or(RigError::InvalidBone(id))?;
        *slot = transform;
        Ok(())
    }

    /// Returns the number of bone transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns true if the pose is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use std::f32::consts::FRAC_PI_2;

    fn simple_skeleton() -> (Skeleton, BoneId, BoneId, BoneId) {
        let mut skel = Skeleton::new();
        let root = skel.add_bone(Bone::new("root")).unwrap();
        let upper = skel
            .add_bone(
                Bone::new("upper")
                    .with_parent(root)
                    .with_rest(Transform::from_translation(Vec3::Y)),
            )
            .unwrap();
        let lower = skel
            .add_bone(
                Bone::new("lower")
                    .with_parent(upper)
                    .with_rest(Transform::from_translation(Vec3::Y)),
            )
            .unwrap();
        (skel, root, upper, lower)
    }

    #[test]
    fn test_skeleton_creation() {
        let (skel, root, upper, lower) = simple_skeleton();

        assert_eq!(skel.bone_count(), 3);
        assert_eq!(skel.bone(root).unwrap().name, "root");
        assert_eq!(skel.bone(upper).unwrap().parent, Some(root));
        assert_eq!(skel.bone(lower).unwrap().parent, Some(upper));
    }

    #[test]
    fn test_add_bone_rejects_unknown_parent() {
        let mut skel = Skeleton::new();
        let err = skel
            .add_bone(Bone::new("orphan").with_parent(BoneId(4)))
            .unwrap_err();
        assert!(matches!(err, RigError::InvalidParent { parent: BoneId(4), .. }));
        assert_eq!(skel.bone_count(), 0);
    }

    #[test]
    fn test_find_bone() {
        let (skel, _, upper, _) = simple_skeleton();

        assert_eq!(skel.find_bone("upper"), Some(upper));
        assert_eq!(skel.find_bone("nonexistent"), None);
    }

    #[test]
    fn test_rest_transform() {
        let (skel, root, upper, lower) = simple_skeleton();

        assert_eq!(skel.rest_transform(root).unwrap().translation, Vec3::ZERO);
        assert_eq!(skel.rest_transform(upper).unwrap().translation, Vec3::Y);
        assert_eq!(
            skel.rest_transform(lower).unwrap().translation,
            Vec3::new(0.0, 2.0, 0.0)
        );
        assert!(skel.rest_transform(BoneId(9)).is_none());
    }

    #[test]
    fn test_posed_compose() {
        let (skel, _, upper, lower) = simple_skeleton();
        let mut pose = Pose::from_rest(&skel);

        // Rotate upper bone 90 degrees around Z
        let rotated = pose
            .get(upper)
            .unwrap()
            .with_rotation(Quat::from_rotation_z(FRAC_PI_2));
        pose.set(upper, rotated).unwrap();

        let lower_world = skel
            .compose(lower, |b| pose.get(b).unwrap_or(Transform::IDENTITY))
            .unwrap();
        // Lower's local Y offset becomes -X once upper is rotated
        assert!((lower_world.translation.x - (-1.0)).abs() < 0.0001);
        assert!((lower_world.translation.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_pose_set_out_of_range() {
        let (skel, _, _, _) = simple_skeleton();
        let mut pose = Pose::from_rest(&skel);

        assert_eq!(pose.len(), 3);
        assert!(pose.set(BoneId(3), Transform::IDENTITY).is_err());
    }
}
