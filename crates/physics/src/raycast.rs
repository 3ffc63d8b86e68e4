//! Raycasting for ground probes and interaction queries.

use crate::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl PhysicsWorld {
    /// Cast a ray and return the first hit.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        self.cast(origin, direction, max_distance, QueryFilter::default())
    }

    /// Cast a ray against colliders whose membership intersects `layers`,
    /// ignoring the colliders of `exclude`.
    pub fn raycast_layers(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: Group,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<RaycastHit> {
        let mut filter = QueryFilter::new().groups(InteractionGroups::new(Group::ALL, layers));
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }
        self.cast(origin, direction, max_distance, filter)
    }

    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                }
            })
    }
}
