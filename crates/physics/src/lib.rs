//! Physics system using Rapier3D for Planetwalk.
//!
//! The world runs without global gravity; gravity is applied per body as a
//! force so that every body can fall toward its own planetoid.

pub mod body;
pub mod collision;
pub mod error;
pub mod physics_world;
pub mod raycast;

pub use body::*;
pub use collision::*;
pub use error::*;
pub use physics_world::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, Group, RigidBodyHandle};
