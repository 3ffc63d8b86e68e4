//! Errors raised while setting up or driving the player.

use physics::PhysicsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error("movement.{field} = {value} is out of range")]
    InvalidConfig { field: &'static str, value: f32 },
}
