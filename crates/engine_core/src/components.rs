//! Common ECS components used across the engine.

use glam::{Quat, Vec3};

/// Display name for entities that show up in logs and dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name(pub String);

/// Circular path around a fixed centre (moving planetoids, floating props).
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub center: Vec3,
    pub radius: f32,
    /// Angular speed in radians per second.
    pub angular_speed: f32,
    /// Normal of the orbital plane.
    pub axis: Vec3,
    /// Current angle in radians.
    pub phase: f32,
}

impl Orbit {
    pub fn new(center: Vec3, radius: f32, angular_speed: f32) -> Self {
        Self {
            center,
            radius,
            angular_speed,
            axis: Vec3::Y,
            phase: 0.0,
        }
    }

    /// Position on the orbit for the current phase.
    pub fn position(&self) -> Vec3 {
        let axis = self.axis.try_normalize().unwrap_or(Vec3::Y);
        let start = axis.any_orthonormal_vector() * self.radius;
        self.center + Quat::from_axis_angle(axis, self.phase) * start
    }

    /// Advance the phase and return the new position.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.phase = (self.phase + self.angular_speed * dt).rem_euclid(std::f32::consts::TAU);
        self.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_stays_on_radius() {
        let mut orbit = Orbit::new(Vec3::new(5.0, 0.0, -2.0), 40.0, 0.3);
        for _ in 0..100 {
            let p = orbit.advance(0.1);
            assert!(((p - orbit.center).length() - 40.0).abs() < 1e-3);
        }
    }
}
