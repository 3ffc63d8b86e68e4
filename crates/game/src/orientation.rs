//! Per-frame conversion of raw input into gravity-relative directions.

use engine_core::{look_rotation, project_on_plane, Quat, Transform, Vec2, Vec3, DIRECTION_EPSILON};

/// Directions derived from input for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationFrame {
    /// Camera yaw expressed in the gravity-aligned frame.
    pub view_rotation: Quat,
    /// `forward * vertical + right * horizontal`, not normalized.
    pub move_direction: Vec3,
}

/// Resolves view and movement directions relative to the current gravity and
/// smoothly turns the player's graphics toward the movement direction.
#[derive(Debug, Clone)]
pub struct OrientationResolver {
    view_rotation: Quat,
    facing: Quat,
    rotation_speed: f32,
}

impl OrientationResolver {
    pub fn new(rotation_speed: f32) -> Self {
        Self {
            view_rotation: Quat::IDENTITY,
            facing: Quat::IDENTITY,
            rotation_speed,
        }
    }

    /// Recompute the frame from `axes` (x = horizontal, y = vertical, each in
    /// [-1, 1]), the camera's forward vector and the gravity direction.
    ///
    /// If the camera looks straight along gravity the previous view rotation
    /// is kept; without input the graphics facing is left untouched.
    pub fn resolve(&mut self, axes: Vec2, camera_forward: Vec3, gravity: Vec3, dt: f32) -> OrientationFrame {
        let up = -gravity;
        let planar_forward = project_on_plane(camera_forward, gravity);
        if let Some(view) = look_rotation(planar_forward, up) {
            self.view_rotation = view;
        }

        let orientation = Transform::from_position_rotation(Vec3::ZERO, self.view_rotation);
        let move_direction = orientation.forward() * axes.y + orientation.right() * axes.x;

        if move_direction.length_squared() > DIRECTION_EPSILON {
            if let Some(target) = look_rotation(move_direction, up) {
                let t = (self.rotation_speed * dt).clamp(0.0, 1.0);
                self.facing = self.facing.lerp(target, t);
            }
        }

        OrientationFrame {
            view_rotation: self.view_rotation,
            move_direction,
        }
    }

    /// Displayed rotation of the player's graphics.
    pub fn facing(&self) -> Quat {
        self.facing
    }
}
