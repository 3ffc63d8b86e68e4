//! Core engine types and utilities for Planetwalk.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Gravity-relative vector math
//! - Time management (frame clock + fixed-step accumulator)
//! - Common component types for ECS

pub mod components;
pub mod gravity;
pub mod time;
pub mod transform;

pub use components::*;
pub use gravity::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat3, Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
