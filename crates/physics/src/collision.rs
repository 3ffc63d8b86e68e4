//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Walkable surfaces (planetoids, platforms)
    Ground = 1 << 0,
    /// Player character
    Player = 1 << 1,
    /// Props the player can interact with
    Interactable = 1 << 2,
    /// Triggers and sensors (gravity area volumes)
    Trigger = 1 << 3,
}

impl CollisionGroup {
    /// Single-bit group for this layer.
    pub fn group(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Create a collision group for ground surfaces.
    pub fn ground() -> (Group, Group) {
        let membership = Self::Ground.group();
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Create a collision group for the player.
    pub fn player() -> (Group, Group) {
        let membership = Self::Player.group();
        let filter = Group::from_bits_retain(
            Self::Ground as u32 | Self::Interactable as u32 | Self::Trigger as u32,
        );
        (membership, filter)
    }

    /// Create a collision group for interactable props.
    pub fn interactable() -> (Group, Group) {
        let membership = Self::Interactable.group();
        let filter = Group::from_bits_retain(Self::Ground as u32 | Self::Player as u32);
        (membership, filter)
    }

    /// Create a collision group for sensors.
    pub fn trigger() -> (Group, Group) {
        let membership = Self::Trigger.group();
        let filter = Self::Player.group();
        (membership, filter)
    }

    /// Interaction groups for a layer pair, ready for a collider builder.
    pub fn interaction_groups((membership, filter): (Group, Group)) -> InteractionGroups {
        InteractionGroups::new(membership, filter)
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle) -> Self {
        Self {
            rigid_body,
            collider: None,
        }
    }

    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_collides_with_ground_but_not_triggers_as_ground() {
        let player = CollisionGroup::interaction_groups(CollisionGroup::player());
        let ground = CollisionGroup::interaction_groups(CollisionGroup::ground());
        let trigger = CollisionGroup::interaction_groups(CollisionGroup::trigger());
        assert!(player.test(ground));
        assert!(player.test(trigger));
        assert!(!ground.test(trigger));
    }
}
