//! Penalty-based confinement planes
//!
//! Each wall is a one-sided spring-damper: it only pushes once a particle has
//! crossed its plane, and never pulls a particle back toward it.

use crate::constants::*;
use glam::Vec3;

/// A single confinement plane with an inward-pointing unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPlane {
    /// Any point on the plane
    pub origin: Vec3,
    /// Unit normal pointing into the allowed region
    pub normal: Vec3,
    /// Penalty spring stiffness (ks)
    pub spring_constant: f32,
    /// Penalty damping (kd)
    pub damping_constant: f32,
}

impl BoundaryPlane {
    /// Create a plane. The normal is normalized so callers can pass axis
    /// directions of any length.
    pub fn new(origin: Vec3, normal: Vec3, spring_constant: f32, damping_constant: f32) -> Self {
        Self {
            origin,
            normal: normal.normalize_or_zero(),
            spring_constant,
            damping_constant,
        }
    }

    /// Signed depth of `position` past the plane. Positive once the particle
    /// is outside the allowed region.
    pub fn penetration(&self, position: Vec3) -> f32 {
        (self.origin - position).dot(self.normal)
    }

    /// Net spring-damper force of this plane, before the one-sided check
    pub fn penalty_force(&self, position: Vec3, velocity: Vec3) -> Vec3 {
        let spring = self.normal * (self.spring_constant * self.penetration(position));
        let damping = self.normal * (self.damping_constant * velocity.dot(self.normal));
        spring - damping
    }

    /// Contact force this plane applies, or `None` when the net penalty
    /// force does not point inward
    pub fn contact_force(&self, position: Vec3, velocity: Vec3) -> Option<Vec3> {
        let force = self.penalty_force(position, velocity);
        (force.dot(self.normal) > 0.0).then_some(force)
    }
}

/// The set of planes confining the particles
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryBox {
    planes: Vec<BoundaryPlane>,
}

impl BoundaryBox {
    /// Axis-aligned box spanning the interior corners `min` and `max`.
    /// Planes are ordered left, right, bottom, top, back, front.
    pub fn new(min: Vec3, max: Vec3, spring_constant: f32, damping_constant: f32) -> Self {
        let plane = |origin, normal| {
            BoundaryPlane::new(origin, normal, spring_constant, damping_constant)
        };
        Self {
            planes: vec![
                plane(Vec3::new(min.x, 0.0, 0.0), Vec3::X),
                plane(Vec3::new(max.x, 0.0, 0.0), Vec3::NEG_X),
                plane(Vec3::new(0.0, min.y, 0.0), Vec3::Y),
                plane(Vec3::new(0.0, max.y, 0.0), Vec3::NEG_Y),
                plane(Vec3::new(0.0, 0.0, min.z), Vec3::Z),
                plane(Vec3::new(0.0, 0.0, max.z), Vec3::NEG_Z),
            ],
        }
    }

    /// The container of the default scene
    pub fn container() -> Self {
        Self::new(
            Vec3::from_array(CONTAINER_MIN),
            Vec3::from_array(CONTAINER_MAX),
            WALL_SPRING_CONSTANT,
            WALL_DAMPING_CONSTANT,
        )
    }

    /// No confinement at all
    pub fn none() -> Self {
        Self { planes: Vec::new() }
    }

    pub fn from_planes(planes: Vec<BoundaryPlane>) -> Self {
        Self { planes }
    }

    pub fn planes(&self) -> &[BoundaryPlane] {
        &self.planes
    }

    /// Sum of every contact force acting on a particle at `position`
    pub fn contact_force(&self, position: Vec3, velocity: Vec3) -> Vec3 {
        self.planes
            .iter()
            .filter_map(|plane| plane.contact_force(position, velocity))
            .sum()
    }

    /// True when `position` is on the allowed side of every plane
    pub fn contains(&self, position: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.penetration(position) <= 0.0)
    }
}

impl Default for BoundaryBox {
    fn default() -> Self {
        Self::container()
    }
}
