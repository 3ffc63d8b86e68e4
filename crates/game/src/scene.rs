//! Demo level: an orbiting planetoid with a few props on its surface and a
//! landing pad nearby.

use engine_core::{Entity, Name, Orbit, Transform, Vec3, World};
use physics::{PhysicsBody, PhysicsWorld};

use crate::gravity::{GravityArea, GravityBody, GravityProvider, GravityShape};
use crate::interaction::{Cosmoguide, Fleurbulle, Interactable, SolPuzzlePiece};

pub const PLANETOID_RADIUS: f32 = 8.0;
const GRAVITY_STRENGTH: f32 = 9.81;
const GRAVITY_RADIUS: f32 = 25.0;

/// Where a prop sits and which way it falls.
struct PropMount {
    anchor: Entity,
    gravity: GravityBody,
}

pub struct Scene {
    pub world: World,
    pub planetoid: Entity,
    pub props: Vec<Box<dyn Interactable>>,
    /// Parallel to `props`.
    mounts: Vec<PropMount>,
}

impl Scene {
    /// Spawn the planetoid on its orbit and scatter the props near its north pole.
    pub fn build(physics: &mut PhysicsWorld) -> Self {
        let mut world = World::new();

        let orbit = Orbit::new(Vec3::ZERO, 3.0, 0.25);
        let center = orbit.position();
        let handle = physics.add_kinematic_body(center);
        let collider = physics.add_ground_sphere(handle, PLANETOID_RADIUS);
        let planetoid = world.spawn((
            Name("Sol".to_string()),
            Transform::from_position(center),
            orbit,
            GravityArea::planetoid(GRAVITY_RADIUS, GRAVITY_STRENGTH),
            PhysicsBody::with_collider(handle, collider),
        ));

        // Flat landing pad off the planetoid's orbit, with its own downward pull.
        let pad_position = Vec3::new(0.0, 2.0, -40.0);
        let pad = physics.add_static_body(pad_position);
        let pad_collider = physics.add_ground_box(pad, Vec3::new(4.0, 0.5, 4.0));
        world.spawn((
            Name("Landing pad".to_string()),
            Transform::from_position(pad_position),
            GravityArea {
                shape: GravityShape::Directional { local_down: Vec3::NEG_Y },
                radius: 8.0,
                priority: 1,
                strength: GRAVITY_STRENGTH,
            },
            PhysicsBody::with_collider(pad, pad_collider),
        ));
        physics.update_query_pipeline();

        let on_surface = |offset: Vec3| Transform::from_position(center + offset);
        let props: Vec<Box<dyn Interactable>> = vec![
            Box::new(Cosmoguide::new(on_surface(Vec3::new(0.8, 8.55, 0.0)))),
            Box::new(SolPuzzlePiece::new(on_surface(Vec3::new(-1.2, 8.5, 0.5)))),
            Box::new(Fleurbulle::new(on_surface(Vec3::new(0.3, 8.55, -1.5)))),
        ];
        let mounts = props
            .iter()
            .map(|_| PropMount {
                anchor: planetoid,
                gravity: GravityBody::new(Vec3::NEG_Y),
            })
            .collect();

        log::info!("Scene ready: planetoid at {:?}, {} props", center, props.len());
        Self {
            world,
            planetoid,
            props,
            mounts,
        }
    }

    /// Spawn point just above the planetoid's north pole.
    pub fn spawn_point(&self) -> Vec3 {
        self.planetoid_position() + Vec3::Y * (PLANETOID_RADIUS + 0.7)
    }

    pub fn planetoid_position(&self) -> Vec3 {
        self.world
            .get::<&Transform>(self.planetoid)
            .map(|t| t.position)
            .unwrap_or(Vec3::ZERO)
    }

    /// Move every orbiting body one step along its path. Kinematic bodies
    /// reach the new position at the end of the next physics step; the ECS
    /// transform and attached props move immediately.
    pub fn advance_planetoids(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let mut moved: Vec<(Entity, Vec3)> = Vec::new();
        for (entity, (transform, orbit, body)) in self
            .world
            .query_mut::<(&mut Transform, &mut Orbit, &PhysicsBody)>()
        {
            let next = orbit.advance(dt);
            let delta = next - transform.position;
            transform.position = next;
            physics.set_kinematic_position(body.rigid_body, next);
            moved.push((entity, delta));
        }

        for (prop, mount) in self.props.iter_mut().zip(&self.mounts) {
            if let Some((_, delta)) = moved.iter().find(|(e, _)| *e == mount.anchor) {
                prop.transform_mut().translate(*delta);
            }
        }
    }

    /// Turn every prop toward `viewer`, upright against its local gravity.
    pub fn face_props(&mut self, viewer: Vec3) {
        for (prop, mount) in self.props.iter_mut().zip(&mut self.mounts) {
            mount.gravity.sample(&self.world, prop.transform().position);
            prop.face(viewer, mount.gravity.gravity_direction());
        }
    }

    pub fn planetoid_name(&self) -> String {
        self.world
            .get::<&Name>(self.planetoid)
            .map(|n| n.0.clone())
            .unwrap_or_default()
    }
}
