//! Physics world management with Rapier3D.

use crate::collision::{CollisionGroup, PhysicsBody};
use engine_core::{Transform, Vec3};
use rapier3d::prelude::*;

/// Shape of the player's capsule collider.
#[derive(Debug, Clone, Copy)]
pub struct CapsuleShape {
    /// Half height of the cylindrical part.
    pub half_height: f32,
    pub radius: f32,
}

impl CapsuleShape {
    /// Capsule whose total height (caps included) is `height`.
    pub fn with_total_height(height: f32, radius: f32) -> Self {
        Self {
            half_height: (height * 0.5 - radius).max(0.0),
            radius,
        }
    }
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world. Global gravity is zero: each body gets its
    /// own gravity force from the gameplay layer.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: Vector::zeros(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the duration of one step in seconds.
    pub fn set_timestep(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Step the physics simulation.
    ///
    /// Continuous forces only act for the step they were added for, so user
    /// forces are cleared once the step has integrated them.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Update query pipeline for raycasting.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add the player's dynamic body with a capsule collider.
    ///
    /// Rotations are locked so contacts never tip the player over; the
    /// controller rotates the body explicitly.
    /// The capsule carries exactly `mass` kilograms whatever its size.
    pub fn add_player_body(&mut self, position: Vec3, shape: CapsuleShape, mass: f32) -> PhysicsBody {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);
        let collider = ColliderBuilder::capsule_y(shape.half_height, shape.radius)
            .mass(mass)
            .friction(0.0)
            .collision_groups(CollisionGroup::interaction_groups(CollisionGroup::player()))
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        PhysicsBody::with_collider(handle, collider)
    }

    /// Add a kinematic rigid body (moving planetoids, platforms).
    pub fn add_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a static rigid body (for fixed terrain).
    pub fn add_static_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a walkable sphere (planetoid surface) to a rigid body.
    pub fn add_ground_sphere(&mut self, body_handle: RigidBodyHandle, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .collision_groups(CollisionGroup::interaction_groups(CollisionGroup::ground()))
            .build();
        self.collider_set.insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Add a walkable box (platform) to a rigid body.
    pub fn add_ground_box(&mut self, body_handle: RigidBodyHandle, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(CollisionGroup::interaction_groups(CollisionGroup::ground()))
            .build();
        self.collider_set.insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Get the transform of a rigid body.
    pub fn get_body_transform(&self, handle: RigidBodyHandle) -> Option<Transform> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            let rot = body.rotation();
            Transform {
                position: Vec3::new(pos.x, pos.y, pos.z),
                rotation: glam::Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w),
                scale: Vec3::ONE,
            }
        })
    }

    /// Set the position a kinematic body reaches at the end of the next step.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Remove a rigid body and its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}
