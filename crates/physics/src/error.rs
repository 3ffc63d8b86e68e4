//! Errors raised while wiring gameplay code to the physics world.

use rapier3d::prelude::RigidBodyHandle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("rigid body {0:?} is not in the physics world")]
    MissingBody(RigidBodyHandle),
    #[error("rigid body {0:?} is not dynamic")]
    NotDynamic(RigidBodyHandle),
}
