//! Carries the player along with the gravity area it stands in.
//!
//! The physics engine does not parent the player to a moving planetoid, so
//! each step the area's displacement since the previous step is replayed on
//! the player before any force is applied.

use engine_core::{Entity, Vec3};

use crate::gravity::ReferenceFrame;

#[derive(Debug, Clone)]
pub struct GravityAreaTracker {
    previous_id: Option<Entity>,
    previous_position: Vec3,
    first_entering: bool,
}

impl Default for GravityAreaTracker {
    fn default() -> Self {
        Self {
            previous_id: None,
            previous_position: Vec3::ZERO,
            first_entering: true,
        }
    }
}

impl GravityAreaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this step's reference frame and return the translation to add
    /// to the player's position.
    ///
    /// A new identity (or the first step after having none) only re-anchors
    /// and returns zero. Without a reference frame the tracker arms itself so
    /// the next area is treated as freshly entered.
    pub fn follow(&mut self, reference: Option<ReferenceFrame>) -> Vec3 {
        let Some(frame) = reference else {
            self.first_entering = true;
            return Vec3::ZERO;
        };

        if self.first_entering || self.previous_id != Some(frame.id) {
            self.previous_id = Some(frame.id);
            self.previous_position = frame.position;
            self.first_entering = false;
            return Vec3::ZERO;
        }

        let delta = self.previous_position - frame.position;
        self.previous_position = frame.position;
        -delta
    }

    /// Identity of the area being followed, if anchored.
    pub fn anchored_to(&self) -> Option<Entity> {
        if self.first_entering {
            None
        } else {
            self.previous_id
        }
    }
}
