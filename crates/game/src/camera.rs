//! Third-person orbit camera that rolls with the local gravity.

use engine_core::{gravity_axis, Quat, Transform, Vec2, Vec3};

/// Radians of rotation per pixel of mouse motion at sensitivity 1.0.
pub const BASE_SENSITIVITY: f32 = 0.002;

/// Orbit camera around the player.
///
/// Yaw and pitch live in a gravity-aligned frame whose local up is `-gravity`.
/// [`ThirdPersonCamera::align`] re-aligns that frame every frame with the
/// shortest rotation, so walking around a planetoid keeps the horizon level
/// without snapping the view.
#[derive(Debug, Clone)]
pub struct ThirdPersonCamera {
    /// Radians per pixel of mouse motion.
    pub sensitivity: f32,
    /// Distance behind the target.
    pub distance: f32,
    /// Offset above the target along local up.
    pub height: f32,
    yaw: f32,
    pitch: f32,
    frame: Quat,
}

impl Default for ThirdPersonCamera {
    fn default() -> Self {
        Self {
            sensitivity: BASE_SENSITIVITY,
            distance: 6.0,
            height: 1.5,
            yaw: 0.0,
            pitch: -0.3,
            frame: Quat::IDENTITY,
        }
    }
}

impl ThirdPersonCamera {
    /// Camera with `sensitivity` as a multiplier of [`BASE_SENSITIVITY`].
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity: BASE_SENSITIVITY * sensitivity,
            ..Default::default()
        }
    }

    /// Apply mouse motion to yaw and pitch.
    pub fn process_mouse(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch -= delta.y * self.sensitivity;

        // Keep away from the poles so forward never lines up with gravity.
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.05;
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
    }

    /// Rotate the camera frame so its up matches `-gravity`. Zero gravity
    /// keeps the current frame.
    pub fn align(&mut self, gravity: Vec3) {
        let Some(down) = gravity_axis(gravity) else {
            return;
        };
        let current_up = self.frame * Vec3::Y;
        let correction = Quat::from_rotation_arc(current_up, -down);
        self.frame = (correction * self.frame).normalize();
    }

    /// World-space rotation of the camera.
    pub fn rotation(&self) -> Quat {
        self.frame * Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.frame * Vec3::Y
    }

    /// Camera transform orbiting `target`.
    pub fn transform(&self, target: Vec3) -> Transform {
        let position = target + self.up() * self.height - self.forward() * self.distance;
        Transform::from_position_rotation(position, self.rotation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_right_turns_camera_right() {
        let mut camera = ThirdPersonCamera {
            pitch: 0.0,
            ..Default::default()
        };
        camera.process_mouse(Vec2::new(100.0, 0.0));
        let forward = camera.forward();
        assert!(forward.x > 0.0);
        assert!(forward.y.abs() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = ThirdPersonCamera::default();
        camera.process_mouse(Vec2::new(0.0, -100_000.0));
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.forward().dot(Vec3::Y) < 0.999);
    }

    #[test]
    fn align_rolls_frame_with_gravity() {
        let mut camera = ThirdPersonCamera::default();
        camera.align(Vec3::NEG_X);
        assert!((camera.up() - Vec3::X).length() < 1e-5);

        // Opposite gravity still yields a valid frame.
        camera.align(Vec3::X);
        assert!((camera.up() - Vec3::NEG_X).length() < 1e-5);
        assert!(camera.forward().is_finite());
    }

    #[test]
    fn zero_gravity_keeps_frame() {
        let mut camera = ThirdPersonCamera::default();
        camera.align(Vec3::NEG_Z);
        let before = camera.rotation();
        camera.align(Vec3::ZERO);
        assert_eq!(camera.rotation(), before);
    }

    #[test]
    fn transform_sits_behind_and_above_target() {
        let camera = ThirdPersonCamera {
            pitch: 0.0,
            ..Default::default()
        };
        let t = camera.transform(Vec3::ZERO);
        assert!((t.position - Vec3::new(0.0, 1.5, 6.0)).length() < 1e-5);
    }
}
