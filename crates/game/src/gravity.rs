//! Gravity areas and the bodies that fall toward them.
//!
//! Every planetoid (or platform) carries a [`GravityArea`]. A [`GravityBody`]
//! samples the areas around it once per physics step, remembers the winning
//! area as its reference frame and pushes itself along the resulting
//! direction. Controllers only see the [`GravityProvider`] view of it.

use engine_core::{gravity_axis, Entity, Transform, Vec3, World};
use physics::{ForceMode, RigidBodyDriver};

/// The object currently defining gravity for a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    /// Stable identity, comparable across frames.
    pub id: Entity,
    pub position: Vec3,
}

/// Read-only gravity state for one body.
pub trait GravityProvider {
    /// Current "down" direction. Unit length, or zero when undefined.
    fn gravity_direction(&self) -> Vec3;
    /// Area currently defining gravity, if any.
    fn reference_frame(&self) -> Option<ReferenceFrame>;
}

/// Snapshot of a gravity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySample {
    pub direction: Vec3,
    pub reference: Option<ReferenceFrame>,
}

impl GravityProvider for GravitySample {
    fn gravity_direction(&self) -> Vec3 {
        self.direction
    }

    fn reference_frame(&self) -> Option<ReferenceFrame> {
        self.reference
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravityShape {
    /// Pulls toward the area's centre (planetoids).
    Spherical,
    /// Constant direction in the area's local space (flat platforms).
    Directional { local_down: Vec3 },
}

/// Volume of influence attached to an entity that also has a [`Transform`].
#[derive(Debug, Clone, Copy)]
pub struct GravityArea {
    pub shape: GravityShape,
    /// Radius of the sphere of influence around the entity's position.
    pub radius: f32,
    /// Higher priority wins where areas overlap.
    pub priority: i32,
    /// Acceleration in m/s².
    pub strength: f32,
}

impl GravityArea {
    pub fn planetoid(radius: f32, strength: f32) -> Self {
        Self {
            shape: GravityShape::Spherical,
            radius,
            priority: 0,
            strength,
        }
    }

    pub fn contains(&self, transform: &Transform, point: Vec3) -> bool {
        transform.position.distance_squared(point) <= self.radius * self.radius
    }

    /// Gravity direction at `point`, `None` where it is undefined (the exact
    /// centre of a spherical area).
    pub fn direction_at(&self, transform: &Transform, point: Vec3) -> Option<Vec3> {
        match self.shape {
            GravityShape::Spherical => gravity_axis(transform.position - point),
            GravityShape::Directional { local_down } => gravity_axis(transform.rotation * local_down),
        }
    }
}

/// Per-body gravity state.
#[derive(Debug, Clone)]
pub struct GravityBody {
    sample: GravitySample,
    strength: f32,
}

impl GravityBody {
    pub fn new(initial_direction: Vec3) -> Self {
        Self {
            sample: GravitySample {
                direction: gravity_axis(initial_direction).unwrap_or(Vec3::ZERO),
                reference: None,
            },
            strength: 0.0,
        }
    }

    /// Re-evaluate which area owns `position`.
    ///
    /// The containing area with the highest priority wins, ties go to the
    /// nearest centre. Outside every area the last direction is kept, the
    /// reference frame is dropped and no gravity force is applied.
    pub fn sample(&mut self, world: &World, position: Vec3) -> GravitySample {
        let mut best: Option<(i32, f32, Entity, Transform, GravityArea)> = None;
        for (entity, (transform, area)) in world.query::<(&Transform, &GravityArea)>().iter() {
            if !area.contains(transform, position) {
                continue;
            }
            let distance = transform.position.distance_squared(position);
            let better = match best {
                None => true,
                Some((priority, best_distance, ..)) => {
                    area.priority > priority || (area.priority == priority && distance < best_distance)
                }
            };
            if better {
                best = Some((area.priority, distance, entity, *transform, *area));
            }
        }

        match best {
            Some((_, _, entity, transform, area)) => {
                if self.sample.reference.map(|r| r.id) != Some(entity) {
                    log::debug!("Gravity body entered area {:?}", entity);
                }
                if let Some(direction) = area.direction_at(&transform, position) {
                    self.sample.direction = direction;
                }
                self.sample.reference = Some(ReferenceFrame {
                    id: entity,
                    position: transform.position,
                });
                self.strength = area.strength;
            }
            None => {
                if self.sample.reference.is_some() {
                    log::debug!("Gravity body left all gravity areas");
                }
                self.sample.reference = None;
                self.strength = 0.0;
            }
        }
        self.sample
    }

    /// Push the body along the current direction for one step.
    pub fn apply_gravity<B: RigidBodyDriver + ?Sized>(&self, body: &mut B) {
        if self.strength > 0.0 && self.sample.direction != Vec3::ZERO {
            let force = self.sample.direction * self.strength * body.mass();
            body.add_force(force, ForceMode::Force);
        }
    }

}

impl GravityProvider for GravityBody {
    fn gravity_direction(&self) -> Vec3 {
        self.sample.direction
    }

    fn reference_frame(&self) -> Option<ReferenceFrame> {
        self.sample.reference
    }
}
