//! Several independent jiggle bones driven against one rig.

use crate::clock::FrameClock;
use crate::solver::{JiggleInstance, StepOutcome};
use sway_rig::Rig;

/// A set of jiggle instances ticked together.
///
/// Instances do not interact; each reads and writes only its own bone, so
/// the order they run in does not matter as long as no two target the same
/// bone.
#[derive(Debug, Clone, Default)]
pub struct JiggleGroup {
    instances: Vec<JiggleInstance>,
}

impl JiggleGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance and returns its index.
    pub fn add(&mut self, instance: JiggleInstance) -> usize {
        let index = self.instances.len();
        self.instances.push(instance);
        index
    }

    /// Gets an instance by index.
    pub fn get(&self, index: usize) -> Option<&JiggleInstance> {
        self.instances.get(index)
    }

    /// Gets a mutable instance by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut JiggleInstance> {
        self.instances.get_mut(index)
    }

    /// Removes an instance, shifting later indices down.
    pub fn remove(&mut self, index: usize) -> Option<JiggleInstance> {
        (index < self.instances.len()).then(|| self.instances.remove(index))
    }

    /// Returns the number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates over the instances.
    pub fn iter(&self) -> impl Iterator<Item = &JiggleInstance> {
        self.instances.iter()
    }

    /// Ticks every instance once, in insertion order.
    pub fn tick<R, C>(&mut self, rig: &mut R, clock: &C) -> Vec<StepOutcome>
    where
        R: Rig + ?Sized,
        C: FrameClock + ?Sized,
    {
        self.instances
            .iter_mut()
            .map(|instance| instance.tick(Some(&mut *rig), clock))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ForwardAxis, FrameTimes, JiggleConfig};
    use glam::Vec3;
    use sway_rig::{Bone, Skeleton, SkeletonRig, Transform};

    fn ears_rig() -> SkeletonRig {
        let mut skel = Skeleton::new();
        let head = skel.add_bone(Bone::new("head")).unwrap();
        for (name, x) in [("ear.l", -0.5), ("ear.r", 0.5)] {
            skel.add_bone(
                Bone::new(name)
                    .with_parent(head)
                    .with_rest(Transform::from_translation(Vec3::new(x, 0.0, 0.0))),
            )
            .unwrap();
        }
        SkeletonRig::new(skel)
    }

    fn ear(name: &str, x: f32) -> JiggleInstance {
        let config = JiggleConfig::new(name).with_forward_axis(ForwardAxis::YPlus);
        JiggleInstance::new(config, Vec3::new(x, 1.0, 0.0))
    }

    #[test]
    fn test_group_bookkeeping() {
        let mut group = JiggleGroup::new();
        assert!(group.is_empty());

        let left = group.add(ear("ear.l", -0.5));
        let right = group.add(ear("ear.r", 0.5));
        assert_eq!(group.len(), 2);
        assert_eq!(group.iter().count(), 2);

        group.get_mut(left).unwrap().config.damping = 3.0;
        assert_eq!(group.get(left).unwrap().config.damping, 3.0);

        assert!(group.remove(right).is_some());
        assert!(group.remove(right).is_none());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_each_instance_touches_only_its_bone() {
        let mut rig = ears_rig();
        let head = rig.bone_id("head").unwrap();
        let left = rig.bone_id("ear.l").unwrap();
        let right = rig.bone_id("ear.r").unwrap();

        let mut group = JiggleGroup::new();
        group.add(ear("ear.l", -0.5));
        group.add(ear("ear.r", 0.5));
        group.add(ear("ear.missing", 0.0));

        // Jerk the head sideways so both ears lag
        rig.set_animated_local(head, Transform::from_translation(Vec3::new(0.6, 0.0, 0.0)))
            .unwrap();
        let outcomes = group.tick(&mut rig, &FrameTimes::default());

        assert!(matches!(outcomes[0], StepOutcome::Rotated { .. }));
        assert!(matches!(outcomes[1], StepOutcome::Rotated { .. }));
        assert_eq!(outcomes[2], StepOutcome::Unresolved);
        assert!(rig.pose_override(left).is_some());
        assert!(rig.pose_override(right).is_some());
        assert!(rig.pose_override(head).is_none());
        assert_eq!(group.get(0).unwrap().bone(), Some(left));
        assert_eq!(group.get(1).unwrap().bone(), Some(right));
    }
}
