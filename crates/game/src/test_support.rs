//! In-memory rigid body for controller tests.

use std::cell::Cell;

use engine_core::{Quat, Vec3};
use physics::{ForceMode, Group, GroundProbe, RigidBodyDriver};

/// Rigid body with a flat ground plane at a configurable distance below it.
#[derive(Debug)]
pub struct MockBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub drag: f32,
    pub mass: f32,
    pub frozen: bool,
    /// Distance to the ground along any probe direction; `None` = no ground.
    pub ground_distance: Option<f32>,
    /// Every force applied since creation, in order.
    pub forces: Vec<(Vec3, ForceMode)>,
    /// Positions passed to `move_position`, in order.
    pub moves: Vec<Vec3>,
    pub probe_count: Cell<u32>,
    pub last_probe: Cell<Option<(Vec3, Vec3, f32)>>,
}

impl Default for MockBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            drag: 0.0,
            mass: 1.0,
            frozen: false,
            ground_distance: None,
            forces: Vec::new(),
            moves: Vec::new(),
            probe_count: Cell::new(0),
            last_probe: Cell::new(None),
        }
    }
}

impl MockBody {
    pub fn grounded() -> Self {
        Self {
            ground_distance: Some(0.625),
            ..Default::default()
        }
    }

    pub fn impulses(&self) -> Vec<Vec3> {
        self.forces
            .iter()
            .filter(|(_, mode)| *mode == ForceMode::Impulse)
            .map(|(f, _)| *f)
            .collect()
    }

    pub fn continuous_forces(&self) -> Vec<Vec3> {
        self.forces
            .iter()
            .filter(|(_, mode)| *mode == ForceMode::Force)
            .map(|(f, _)| *f)
            .collect()
    }
}

impl RigidBodyDriver for MockBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_position(&mut self, position: Vec3) {
        self.moves.push(position);
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn move_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn drag(&self) -> f32 {
        self.drag
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        if mode == ForceMode::Impulse {
            self.velocity += force / self.mass;
        }
        self.forces.push((force, mode));
    }

    fn freeze_rotation(&mut self) {
        self.frozen = true;
    }

    fn mass(&self) -> f32 {
        self.mass
    }
}

impl GroundProbe for MockBody {
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32, _layers: Group) -> bool {
        self.probe_count.set(self.probe_count.get() + 1);
        self.last_probe.set(Some((origin, direction, max_distance)));
        self.ground_distance.is_some_and(|d| d <= max_distance)
    }
}
