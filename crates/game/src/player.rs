//! Player controller: ties input, camera, gravity and locomotion to the
//! player's rigid body.

use engine_core::{Transform, Vec3, World};
use input::{CursorControl, InputState};
use physics::{CapsuleShape, PhysicsBody, PhysicsWorld, PlayerRig, RigidBodyDriver};

use crate::camera::ThirdPersonCamera;
use crate::config::GameConfig;
use crate::dialogue::DialogSink;
use crate::error::ControllerError;
use crate::gravity::{GravityBody, GravityProvider};
use crate::interaction::{nearest_interactable, Interactable, InteractionContext};
use crate::locomotion::{LocomotionController, StepReport};
use crate::orientation::{OrientationFrame, OrientationResolver};
use crate::status::{NpcEvents, PlayerStatus};

pub struct PlayerController {
    body: PhysicsBody,
    orientation: OrientationResolver,
    locomotion: LocomotionController,
    gravity: GravityBody,
    pub camera: ThirdPersonCamera,
    pub status: PlayerStatus,
    interact_range: f32,
}

impl PlayerController {
    /// Create the player's body at `position` and lock the cursor.
    pub fn spawn<C: CursorControl + ?Sized>(
        physics: &mut PhysicsWorld,
        position: Vec3,
        config: &GameConfig,
        initial_gravity: Vec3,
        cursor: &mut C,
    ) -> Result<Self, ControllerError> {
        let movement = config.movement;
        movement.validate()?;

        let shape = CapsuleShape::with_total_height(movement.player_height, movement.player_radius);
        let body = physics.add_player_body(position, shape, movement.player_mass);
        let mut rig = PlayerRig::new(physics, body.rigid_body)?;
        let locomotion = LocomotionController::new(movement, &mut rig, cursor)?;

        let mut camera = ThirdPersonCamera::new(config.sensitivity);
        camera.align(initial_gravity);

        log::info!("Player spawned at {:?}", position);
        Ok(Self {
            body,
            orientation: OrientationResolver::new(movement.rotation_speed),
            locomotion,
            gravity: GravityBody::new(initial_gravity),
            camera,
            status: PlayerStatus::default(),
            interact_range: config.interact_range,
        })
    }

    /// Per-frame pass: camera look, input resolution and the hand-off of the
    /// move direction to the next physics step.
    pub fn update(&mut self, input: &InputState, dt: f32) -> OrientationFrame {
        let gravity = self.gravity.gravity_direction();
        if input.is_cursor_locked() {
            self.camera.process_mouse(input.mouse_delta());
        }
        self.camera.align(gravity);

        let frame = self
            .orientation
            .resolve(input.movement_axes(), self.camera.forward(), gravity, dt);
        self.locomotion.set_move_direction(frame.move_direction);
        self.locomotion.set_jump_held(input.is_jump_held());
        frame
    }

    /// Fixed-step pass. Call before [`PhysicsWorld::step`].
    pub fn fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        world: &World,
        dt: f32,
    ) -> Result<StepReport, ControllerError> {
        let mut rig = PlayerRig::new(physics, self.body.rigid_body)?;
        let position = rig.position();
        self.gravity.sample(world, position);
        self.gravity.apply_gravity(&mut rig);
        Ok(self.locomotion.fixed_step(&mut rig, &self.gravity, dt))
    }

    /// Use the nearest active interactable in range. Returns its index if
    /// the interaction changed anything.
    pub fn interact(
        &mut self,
        physics: &PhysicsWorld,
        items: &mut [Box<dyn Interactable>],
        npc: &mut NpcEvents,
        dialog: &mut dyn DialogSink,
    ) -> Option<usize> {
        let position = self.position(physics)?;
        let index = nearest_interactable(position, items, self.interact_range)?;
        let mut ctx = InteractionContext {
            status: &mut self.status,
            npc,
            dialog,
        };
        items[index].interact(&mut ctx).then_some(index)
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.get_body_transform(self.body.rigid_body).map(|t| t.position)
    }

    /// Transform for drawing the player: physics position, smoothed facing.
    pub fn graphics_transform(&self, physics: &PhysicsWorld) -> Option<Transform> {
        let position = self.position(physics)?;
        Some(Transform::from_position_rotation(position, self.orientation.facing()))
    }

    pub fn gravity(&self) -> &GravityBody {
        &self.gravity
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }
}
