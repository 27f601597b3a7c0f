//! Sphere collision volume for the simulated point.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A world-space sphere the simulated point is kept outside of.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionSphere {
    /// Sphere center in world space.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl CollisionSphere {
    /// Creates a sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns true if the sphere can take part in collision.
    ///
    /// Spheres with a non-finite center or a non-positive radius are skipped
    /// by the solver rather than treated as errors.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }

    /// Returns true if `point` lies strictly inside the sphere.
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length() < self.radius
    }

    /// Pushes `point` out onto the surface if it lies inside.
    ///
    /// A point exactly at the center is pushed along `fallback`.
    pub fn push_out(&self, point: Vec3, fallback: Vec3) -> Vec3 {
        if !self.contains(point) {
            return point;
        }
        match (point - self.center).try_normalize() {
            Some(normal) => self.center + normal * self.radius,
            None => self.center + fallback.normalize_or(Vec3::Y) * self.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_point_lands_on_surface() {
        let sphere = CollisionSphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0);
        let inside = Vec3::new(1.5, 2.2, 2.0);
        assert!(sphere.contains(inside));

        let pushed = sphere.push_out(inside, Vec3::Y);
        assert!(((pushed - sphere.center).length() - sphere.radius).abs() < 1e-5);
        // Pushed radially, so the direction from the center is unchanged
        let before = (inside - sphere.center).normalize();
        let after = (pushed - sphere.center).normalize();
        assert!((before - after).length() < 1e-5);
    }

    #[test]
    fn test_outside_point_is_untouched() {
        let sphere = CollisionSphere::new(Vec3::ZERO, 1.0);
        let p = Vec3::new(0.0, 3.0, 0.0);
        assert_eq!(sphere.push_out(p, Vec3::Y), p);
        assert!(!sphere.contains(p));
    }

    #[test]
    fn test_center_uses_fallback() {
        let sphere = CollisionSphere::new(Vec3::ONE, 0.5);
        let pushed = sphere.push_out(Vec3::ONE, Vec3::new(0.0, 0.0, 4.0));
        assert!((pushed - Vec3::new(1.0, 1.0, 1.5)).length() < 1e-6);
    }

    #[test]
    fn test_validity() {
        assert!(CollisionSphere::new(Vec3::ZERO, 1.0).is_valid());
        assert!(!CollisionSphere::new(Vec3::ZERO, 0.0).is_valid());
        assert!(!CollisionSphere::new(Vec3::ZERO, -1.0).is_valid());
        assert!(!CollisionSphere::new(Vec3::NAN, 1.0).is_valid());
        assert!(!CollisionSphere::new(Vec3::ZERO, f32::INFINITY).is_valid());
    }
}
