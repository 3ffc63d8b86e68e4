//! Vector math relative to an arbitrary gravity direction.
//!
//! "Planar" always means the plane perpendicular to the gravity direction,
//! "along" means the component parallel to it.

use glam::Vec3;

use crate::transform::DIRECTION_EPSILON;

/// Normalized gravity axis, or `None` when the direction is degenerate
/// (zero length or non-finite).
pub fn gravity_axis(direction: Vec3) -> Option<Vec3> {
    if !direction.is_finite() || direction.length_squared() <= DIRECTION_EPSILON {
        return None;
    }
    Some(direction.normalize())
}

/// Project `v` onto the plane whose normal is `normal`.
///
/// A degenerate normal leaves `v` unchanged.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    match gravity_axis(normal) {
        Some(axis) => v.reject_from_normalized(axis),
        None => v,
    }
}

/// A vector split into its along-gravity and planar parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSplit {
    pub along: Vec3,
    pub planar: Vec3,
}

impl AxisSplit {
    /// Split `v` relative to a unit `axis`.
    pub fn new(v: Vec3, axis: Vec3) -> Self {
        let along = axis * v.dot(axis);
        Self {
            along,
            planar: v - along,
        }
    }

    /// Recombine both parts into a single vector.
    pub fn recombine(&self) -> Vec3 {
        self.along + self.planar
    }

    /// Clamp the planar part to `max` length, leaving the along part untouched.
    /// Returns `true` when clamping changed anything.
    pub fn clamp_planar(&mut self, max: f32) -> bool {
        if self.planar.length() > max {
            self.planar = self.planar.clamp_length_max(max);
            true
        } else {
            false
        }
    }
}
