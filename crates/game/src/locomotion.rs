//! Gravity-relative locomotion controller.
//!
//! Drives the player's rigid body once per fixed physics step:
//!
//! 1. follow the motion of the current gravity area
//! 2. probe for ground along gravity
//! 3. turn and push the body along the movement direction projected onto the
//!    plane perpendicular to gravity
//! 4. set drag for the ground/air state
//! 5. cap the planar speed, leaving fall speed untouched
//! 6. jump against gravity when allowed
//!
//! If gravity is undefined (zero) for a step, everything that needs a plane
//! is skipped for that step: the player counts as airborne, no drive force,
//! speed cap or jump is applied.

use engine_core::{gravity_axis, project_on_plane, AxisSplit, Quat, Vec3};
use input::CursorControl;
use physics::{CollisionGroup, ForceMode, GroundProbe, RigidBodyDriver};

use crate::area_tracking::GravityAreaTracker;
use crate::config::MovementConfig;
use crate::error::ControllerError;
use crate::gravity::GravityProvider;
use crate::jump::JumpState;

/// Multiplier between `move_speed` and the drive force.
pub const MOVE_FORCE_SCALE: f32 = 10.0;
/// Blend rate of the body's yaw correction, per second.
pub const ROTATION_BLEND_RATE: f32 = 3.0;

/// What happened during one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub grounded: bool,
    /// Translation applied to follow the gravity area.
    pub area_correction: Vec3,
    /// Drive force applied this step.
    pub drive_force: Vec3,
    pub speed_clamped: bool,
    pub jumped: bool,
}

#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: MovementConfig,
    /// Last move direction written by the per-frame pass.
    move_direction: Vec3,
    jump_held: bool,
    grounded: bool,
    jump: JumpState,
    area: GravityAreaTracker,
    warned_degenerate_gravity: bool,
}

impl LocomotionController {
    /// Validate `config`, freeze the body's rotation and lock the cursor.
    pub fn new<B, C>(config: MovementConfig, body: &mut B, cursor: &mut C) -> Result<Self, ControllerError>
    where
        B: RigidBodyDriver + ?Sized,
        C: CursorControl + ?Sized,
    {
        config.validate()?;
        body.freeze_rotation();
        cursor.lock_and_hide();
        log::info!(
            "Locomotion controller ready (move speed {}, jump force {})",
            config.move_speed,
            config.jump_force
        );
        Ok(Self {
            config,
            move_direction: Vec3::ZERO,
            jump_held: false,
            grounded: false,
            jump: JumpState::new(),
            area: GravityAreaTracker::new(),
            warned_degenerate_gravity: false,
        })
    }

    /// Hand over the latest move direction. Last write wins; non-finite
    /// vectors are dropped.
    pub fn set_move_direction(&mut self, direction: Vec3) {
        if direction.is_finite() {
            self.move_direction = direction;
        }
    }

    pub fn set_jump_held(&mut self, held: bool) {
        self.jump_held = held;
    }

    /// Whether ground lies within reach along `gravity` below `position`.
    pub fn ground_check<P: GroundProbe + ?Sized>(&self, probe: &P, position: Vec3, gravity: Vec3) -> bool {
        probe.probe(
            position,
            gravity,
            self.config.ground_probe_length(),
            CollisionGroup::Ground.group(),
        )
    }

    /// Run one physics step.
    pub fn fixed_step<R, G>(&mut self, rig: &mut R, gravity: &G, dt: f32) -> StepReport
    where
        R: RigidBodyDriver + GroundProbe + ?Sized,
        G: GravityProvider + ?Sized,
    {
        let mut report = StepReport::default();
        self.jump.tick(dt);

        report.area_correction = self.area.follow(gravity.reference_frame());
        if report.area_correction != Vec3::ZERO {
            let position = rig.position();
            rig.move_position(position + report.area_correction);
        }

        let axis = gravity_axis(gravity.gravity_direction());
        if axis.is_none() && !self.warned_degenerate_gravity {
            log::warn!("Gravity direction is undefined; skipping planar movement");
        }
        self.warned_degenerate_gravity = axis.is_none();

        self.grounded = match axis {
            Some(g) => self.ground_check(&*rig, rig.position(), g),
            None => false,
        };
        report.grounded = self.grounded;

        if let Some(g) = axis {
            report.drive_force = self.move_player(rig, g, dt);
        }

        rig.set_drag(if self.grounded { self.config.ground_drag } else { 0.0 });

        if let Some(g) = axis {
            report.speed_clamped = self.limit_speed(rig, g);
            if self.jump_held && self.grounded && self.jump.try_start(self.config.jump_cooldown) {
                self.perform_jump(rig, g);
                report.jumped = true;
            }
        }

        report
    }

    fn move_player<R: RigidBodyDriver + ?Sized>(&self, rig: &mut R, gravity: Vec3, dt: f32) -> Vec3 {
        let direction = project_on_plane(self.move_direction, gravity).normalize_or_zero();
        if direction == Vec3::ZERO {
            return Vec3::ZERO;
        }

        let yaw_degrees = direction.x * self.config.rotation_speed * dt;
        let correction = Quat::from_rotation_y(yaw_degrees.to_radians());
        let current = rig.rotation();
        let blend = (dt * ROTATION_BLEND_RATE).clamp(0.0, 1.0);
        rig.move_rotation(current.slerp(current * correction, blend).normalize());

        let mut force = direction * self.config.move_speed * MOVE_FORCE_SCALE;
        if !self.grounded {
            force *= self.config.air_multiplier;
        }
        rig.add_force(force, ForceMode::Force);
        force
    }

    fn limit_speed<R: RigidBodyDriver + ?Sized>(&self, rig: &mut R, gravity: Vec3) -> bool {
        let mut split = AxisSplit::new(rig.velocity(), gravity);
        if split.clamp_planar(self.config.move_speed) {
            rig.set_velocity(split.recombine());
            true
        } else {
            false
        }
    }

    fn perform_jump<R: RigidBodyDriver + ?Sized>(&self, rig: &mut R, gravity: Vec3) {
        let planar = AxisSplit::new(rig.velocity(), gravity).planar;
        rig.set_velocity(planar);
        rig.add_force(-gravity * self.config.jump_force, ForceMode::Impulse);
        log::debug!("Jump (cooldown {}s)", self.config.jump_cooldown);
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn area_tracker(&self) -> &GravityAreaTracker {
        &self.area
    }
}
