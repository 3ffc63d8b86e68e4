//! Rigid-body driving interface used by gameplay controllers.
//!
//! Controllers talk to the physics engine through [`RigidBodyDriver`] and
//! [`GroundProbe`] so they can be exercised without a live Rapier world.
//! [`PlayerRig`] is the Rapier-backed implementation of both.

use engine_core::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;

use crate::{PhysicsError, PhysicsWorld};

/// How a force vector is applied to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force integrated over the next step.
    Force,
    /// Instantaneous change of momentum.
    Impulse,
}

/// Kinematic access to a single rigid body.
pub trait RigidBodyDriver {
    fn position(&self) -> Vec3;
    /// Teleport the body, keeping its velocity.
    fn move_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn move_rotation(&mut self, rotation: Quat);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn drag(&self) -> f32;
    fn set_drag(&mut self, drag: f32);
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
    /// Stop contacts and torques from rotating the body.
    fn freeze_rotation(&mut self);
    fn mass(&self) -> f32;
}

/// Ray query against a collision layer.
pub trait GroundProbe {
    /// `true` when a collider on `layers` lies within `max_distance` of
    /// `origin` along `direction`. Must not mutate anything.
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: Group) -> bool;
}

/// A dynamic body inside a [`PhysicsWorld`], borrowed for one update.
pub struct PlayerRig<'w> {
    world: &'w mut PhysicsWorld,
    body: RigidBodyHandle,
}

impl<'w> PlayerRig<'w> {
    /// Borrow `body` from `world`. Fails when the body is missing or not dynamic.
    pub fn new(world: &'w mut PhysicsWorld, body: RigidBodyHandle) -> Result<Self, PhysicsError> {
        match world.rigid_body_set.get(body).map(RigidBody::is_dynamic) {
            None => Err(PhysicsError::MissingBody(body)),
            Some(false) => Err(PhysicsError::NotDynamic(body)),
            Some(true) => Ok(Self { world, body }),
        }
    }

    pub fn handle(&self) -> RigidBodyHandle {
        self.body
    }

    fn rb(&self) -> &RigidBody {
        &self.world.rigid_body_set[self.body]
    }

    fn rb_mut(&mut self) -> &mut RigidBody {
        &mut self.world.rigid_body_set[self.body]
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

impl RigidBodyDriver for PlayerRig<'_> {
    fn position(&self) -> Vec3 {
        to_vec3(self.rb().translation())
    }

    fn move_position(&mut self, position: Vec3) {
        self.rb_mut().set_translation(to_vector(position), true);
    }

    fn rotation(&self) -> Quat {
        let rot = self.rb().rotation();
        Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w)
    }

    fn move_rotation(&mut self, rotation: Quat) {
        let q = UnitQuaternion::new_normalize(Quaternion::new(
            rotation.w, rotation.x, rotation.y, rotation.z,
        ));
        self.rb_mut().set_rotation(q, true);
    }

    fn velocity(&self) -> Vec3 {
        to_vec3(self.rb().linvel())
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.rb_mut().set_linvel(to_vector(velocity), true);
    }

    fn drag(&self) -> f32 {
        self.rb().linear_damping()
    }

    fn set_drag(&mut self, drag: f32) {
        self.rb_mut().set_linear_damping(drag);
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        let force = to_vector(force);
        match mode {
            ForceMode::Force => self.rb_mut().add_force(force, true),
            ForceMode::Impulse => self.rb_mut().apply_impulse(force, true),
        }
    }

    fn freeze_rotation(&mut self) {
        let body = self.rb_mut();
        body.lock_rotations(true, true);
        body.set_angvel(Vector::zeros(), true);
    }

    fn mass(&self) -> f32 {
        self.rb().mass()
    }
}

impl GroundProbe for PlayerRig<'_> {
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: Group) -> bool {
        self.world
            .raycast_layers(origin, direction, max_distance, layers, Some(self.body))
            .is_some()
    }
}
