//! Props the player can use with the interact key.

use engine_core::{look_rotation, Quat, Transform, Vec3};

use crate::dialogue::DialogSink;
use crate::status::{NpcEvents, PlayerStatus};

pub const ITEM_FOUND_TITLE: &str = "Item found";
pub const COSMOGUIDE_MESSAGE: &str = "You found a CosmoGuide! Press C to explore the universe.";
pub const PUZZLE_PIECE_MESSAGE: &str = "You found a puzzle piece! It's tiny!";

/// Everything an interaction may touch.
pub struct InteractionContext<'a> {
    pub status: &'a mut PlayerStatus,
    pub npc: &'a mut NpcEvents,
    pub dialog: &'a mut dyn DialogSink,
}

/// Whether a prop still reacts to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Active,
    Consumed,
}

pub trait Interactable {
    /// Use the prop. Returns `true` if anything changed.
    fn interact(&mut self, ctx: &mut InteractionContext<'_>) -> bool;
    fn transform(&self) -> &Transform;
    /// Props ride along with the planetoid they sit on.
    fn transform_mut(&mut self) -> &mut Transform;
    fn state(&self) -> InteractionState {
        InteractionState::Active
    }
    /// Turn toward `viewer` with up opposite to `gravity`. Called every
    /// physics step; props without a sprite stay as they are.
    fn face(&mut self, _viewer: Vec3, _gravity: Vec3) {}
    /// Take back whatever the prop handed out. Returns `true` if it was empty.
    fn restock(&mut self) -> bool {
        false
    }
}

/// The in-game guide book. One pickup per game.
#[derive(Debug, Clone)]
pub struct Cosmoguide {
    pub transform: Transform,
    pub state: InteractionState,
}

impl Cosmoguide {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            state: InteractionState::Active,
        }
    }
}

impl Interactable for Cosmoguide {
    fn interact(&mut self, ctx: &mut InteractionContext<'_>) -> bool {
        if self.state == InteractionState::Consumed || ctx.status.has_cosmoguide {
            log::debug!("CosmoGuide already picked up");
            return false;
        }
        ctx.status.give_cosmoguide();
        ctx.dialog.open_message(COSMOGUIDE_MESSAGE, ITEM_FOUND_TITLE);
        self.state = InteractionState::Consumed;
        true
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn state(&self) -> InteractionState {
        self.state
    }
}

/// Quest item that unlocks new NPC dialogue.
#[derive(Debug, Clone)]
pub struct SolPuzzlePiece {
    pub transform: Transform,
    pub state: InteractionState,
}

impl SolPuzzlePiece {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            state: InteractionState::Active,
        }
    }
}

impl Interactable for SolPuzzlePiece {
    fn interact(&mut self, ctx: &mut InteractionContext<'_>) -> bool {
        if self.state == InteractionState::Consumed || ctx.npc.isador_puzzle_piece_found {
            log::debug!("Puzzle piece already found");
            return false;
        }
        ctx.npc.isador_puzzle_piece_found = true;
        ctx.npc.update_npc_pages();
        ctx.dialog.open_message(PUZZLE_PIECE_MESSAGE, ITEM_FOUND_TITLE);
        self.state = InteractionState::Consumed;
        true
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn state(&self) -> InteractionState {
        self.state
    }
}

/// Bubble flower. Hands out a single bubble until it gets it back.
#[derive(Debug, Clone)]
pub struct Fleurbulle {
    pub transform: Transform,
    bubble_available: bool,
}

impl Fleurbulle {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            bubble_available: true,
        }
    }

    pub fn retrieve_bubble(&mut self) {
        log::debug!("Fleurbulle at {:?} regrows its bubble", self.transform.position);
        self.bubble_available = true;
    }

    /// Rotation that turns the flower's sprite toward `target`, keeping its
    /// up opposite to `gravity`. `None` if the target lies along gravity.
    pub fn billboard_rotation(&self, target: Vec3, gravity: Vec3) -> Option<Quat> {
        look_rotation(target - self.transform.position, -gravity)
    }
}

impl Interactable for Fleurbulle {
    fn interact(&mut self, ctx: &mut InteractionContext<'_>) -> bool {
        if !self.bubble_available {
            log::debug!("Fleurbulle already gave its bubble");
            return false;
        }
        if ctx.status.has_bubble_on {
            log::debug!("Player already wears a bubble");
            return false;
        }
        ctx.status.wear_bubble();
        self.bubble_available = false;
        true
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// An empty flower has nothing to offer until it gets its bubble back.
    fn state(&self) -> InteractionState {
        if self.bubble_available {
            InteractionState::Active
        } else {
            InteractionState::Consumed
        }
    }

    fn face(&mut self, viewer: Vec3, gravity: Vec3) {
        if let Some(rotation) = self.billboard_rotation(viewer, gravity) {
            self.transform.rotation = rotation;
        }
    }

    fn restock(&mut self) -> bool {
        if self.bubble_available {
            return false;
        }
        self.retrieve_bubble();
        true
    }
}

/// Index of the active item closest to `position` within `range`.
pub fn nearest_interactable(position: Vec3, items: &[Box<dyn Interactable>], range: f32) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.state() == InteractionState::Active)
        .map(|(i, item)| (i, item.transform().position.distance_squared(position)))
        .filter(|(_, d)| *d <= range * range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogManager;

    struct Harness {
        status: PlayerStatus,
        npc: NpcEvents,
        dialog: DialogManager,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                status: PlayerStatus::default(),
                npc: NpcEvents::default(),
                dialog: DialogManager::new(),
            }
        }

        fn interact(&mut self, item: &mut dyn Interactable) -> bool {
            let mut ctx = InteractionContext {
                status: &mut self.status,
                npc: &mut self.npc,
                dialog: &mut self.dialog,
            };
            item.interact(&mut ctx)
        }
    }

    #[test]
    fn cosmoguide_pickup_fires_once() {
        let mut h = Harness::new();
        let mut guide = Cosmoguide::new(Transform::default());

        assert!(h.interact(&mut guide));
        assert!(h.status.has_cosmoguide);
        assert_eq!(guide.state(), InteractionState::Consumed);
        let message = h.dialog.current().unwrap();
        assert_eq!(message.title, ITEM_FOUND_TITLE);
        assert_eq!(message.text, COSMOGUIDE_MESSAGE);

        assert!(!h.interact(&mut guide));
        assert_eq!(h.dialog.shown_count(), 1);
        h.dialog.close();
        assert!(!h.dialog.is_open());
    }

    #[test]
    fn second_cosmoguide_is_ignored_once_player_has_one() {
        let mut h = Harness::new();
        let mut first = Cosmoguide::new(Transform::default());
        let mut second = Cosmoguide::new(Transform::default());
        h.interact(&mut first);
        assert!(!h.interact(&mut second));
        assert_eq!(second.state(), InteractionState::Active);
    }

    #[test]
    fn puzzle_piece_sets_flag_and_refreshes_pages_once() {
        let mut h = Harness::new();
        let mut piece = SolPuzzlePiece::new(Transform::default());
        assert!(h.interact(&mut piece));
        assert!(!h.interact(&mut piece));
        assert!(h.npc.isador_puzzle_piece_found);
        assert_eq!(h.npc.pages_revision, 1);
        assert_eq!(h.dialog.current().unwrap().text, PUZZLE_PIECE_MESSAGE);
        assert_eq!(h.dialog.shown_count(), 1);
    }

    #[test]
    fn fleurbulle_gives_one_bubble_until_retrieved() {
        let mut h = Harness::new();
        let mut flower = Fleurbulle::new(Transform::default());
        assert!(h.interact(&mut flower));
        assert!(h.status.has_bubble_on);
        assert!(!flower.bubble_available);
        assert_eq!(flower.state(), InteractionState::Consumed);

        h.status.pop_bubble();
        assert!(!h.interact(&mut flower));

        assert!(flower.restock());
        assert!(!flower.restock());
        assert_eq!(flower.state(), InteractionState::Active);
        assert!(h.interact(&mut flower));
    }

    #[test]
    fn fleurbulle_keeps_bubble_when_player_already_wears_one() {
        let mut h = Harness::new();
        h.status.wear_bubble();
        let mut flower = Fleurbulle::new(Transform::default());
        assert!(!h.interact(&mut flower));
        assert!(flower.bubble_available);
        assert!(!h.dialog.is_open());
    }

    #[test]
    fn billboard_faces_target_upright() {
        let flower = Fleurbulle::new(Transform::from_position(Vec3::new(0.0, 10.0, 0.0)));
        let rotation = flower
            .billboard_rotation(Vec3::new(5.0, 10.0, 0.0), Vec3::NEG_Y)
            .unwrap();
        assert!((rotation * Vec3::NEG_Z - Vec3::X).length() < 1e-5);
        assert!((rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
        assert!(flower.billboard_rotation(Vec3::ZERO, Vec3::NEG_Y).is_none());
    }

    #[test]
    fn face_turns_only_the_flower() {
        let viewer = Vec3::new(0.0, 10.0, 5.0);
        let mut flower = Fleurbulle::new(Transform::from_position(Vec3::new(0.0, 10.0, 0.0)));
        flower.face(viewer, Vec3::NEG_Y);
        assert!((flower.transform.forward() - Vec3::Z).length() < 1e-5);

        // Looking straight along gravity keeps the last rotation.
        flower.face(Vec3::new(0.0, 0.0, 0.0), Vec3::NEG_Y);
        assert!((flower.transform.forward() - Vec3::Z).length() < 1e-5);

        let mut guide = Cosmoguide::new(Transform::from_position(Vec3::new(0.0, 10.0, 0.0)));
        guide.face(viewer, Vec3::NEG_Y);
        assert_eq!(guide.transform.rotation, Quat::IDENTITY);
        assert!(!guide.restock());
    }

    #[test]
    fn empty_flower_does_not_hide_other_props() {
        let mut h = Harness::new();
        let mut flower = Fleurbulle::new(Transform::from_position(Vec3::new(0.5, 0.0, 0.0)));
        assert!(h.interact(&mut flower));
        let items: Vec<Box<dyn Interactable>> = vec![
            Box::new(flower),
            Box::new(Cosmoguide::new(Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))),
        ];
        assert_eq!(nearest_interactable(Vec3::ZERO, &items, 2.5), Some(1));
    }

    #[test]
    fn nearest_skips_consumed_and_out_of_range() {
        let mut consumed = Cosmoguide::new(Transform::from_position(Vec3::new(0.5, 0.0, 0.0)));
        consumed.state = InteractionState::Consumed;
        let items: Vec<Box<dyn Interactable>> = vec![
            Box::new(consumed),
            Box::new(SolPuzzlePiece::new(Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))),
            Box::new(Fleurbulle::new(Transform::from_position(Vec3::new(1.5, 0.0, 0.0)))),
            Box::new(Fleurbulle::new(Transform::from_position(Vec3::new(10.0, 0.0, 0.0)))),
        ];
        assert_eq!(nearest_interactable(Vec3::ZERO, &items, 2.5), Some(2));
        assert_eq!(nearest_interactable(Vec3::new(20.0, 0.0, 0.0), &items, 2.5), None);
    }
}
