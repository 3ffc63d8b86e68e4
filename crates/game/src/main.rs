//! Planetwalk - third-person walking on small planetoids with gravity that follows the ground

mod area_tracking;
mod camera;
mod config;
mod dialogue;
mod error;
mod gravity;
mod interaction;
mod jump;
mod locomotion;
mod orientation;
mod player;
mod scene;
mod script;
mod status;
#[cfg(test)]
mod test_support;

use std::time::Duration;

use anyhow::{Context, Result};
use engine_core::{Quat, Time, Vec3};
use input::{InputState, KeyCode};
use physics::PhysicsWorld;

use config::GameConfig;
use dialogue::DialogManager;
use gravity::GravityProvider;
use interaction::Interactable;
use orientation::OrientationFrame;
use player::PlayerController;
use scene::Scene;
use script::InputScript;
use status::NpcEvents;

/// Simulated display rate of the headless session.
const FRAME_RATE: f64 = 144.0;
/// Physics steps allowed per frame before the accumulator is left to catch up later.
const MAX_STEPS_PER_FRAME: u32 = 3;

fn demo_script() -> InputScript {
    InputScript::new()
        // Pick everything up while standing at the spawn point.
        .tap(KeyCode::KeyE, 1.0)
        .tap(KeyCode::KeyE, 1.3)
        .tap(KeyCode::KeyE, 1.6)
        .tap(KeyCode::KeyE, 1.9)
        .tap(KeyCode::KeyE, 2.2)
        .tap(KeyCode::KeyC, 2.5)
        // Burst the bubble and get a fresh one from the flower.
        .tap(KeyCode::KeyB, 2.7)
        .tap(KeyCode::KeyE, 2.9)
        // Walk around the planetoid.
        .hold(KeyCode::KeyW, 3.0, 9.0)
        .hold(KeyCode::Space, 4.0, 4.3)
        .hold(KeyCode::KeyD, 6.0, 7.5)
        .look(6.0, 0.0, 5.0, 6.0)
        .hold(KeyCode::Space, 8.0, 8.6)
}

struct Session {
    physics: PhysicsWorld,
    scene: Scene,
    player: PlayerController,
    input: InputState,
    /// Directions resolved from the latest frame's input.
    view: OrientationFrame,
    time: Time,
    dialogs: DialogManager,
    npc: NpcEvents,
    /// Prop that handed out the bubble the player wears.
    bubble_source: Option<usize>,
    jumps: u32,
}

impl Session {
    fn new(config: &GameConfig) -> Result<Self> {
        let mut time = Time::new();
        time.set_fixed_rate(config.physics_rate_hz);

        let mut physics = PhysicsWorld::new();
        physics.set_timestep(time.fixed_timestep_seconds());

        let scene = Scene::build(&mut physics);
        let mut input = InputState::new();
        let player = PlayerController::spawn(
            &mut physics,
            scene.spawn_point(),
            config,
            Vec3::NEG_Y,
            &mut input,
        )
        .context("failed to spawn player")?;

        Ok(Self {
            physics,
            scene,
            player,
            input,
            view: OrientationFrame {
                view_rotation: Quat::IDENTITY,
                move_direction: Vec3::ZERO,
            },
            time,
            dialogs: DialogManager::new(),
            npc: NpcEvents::default(),
            bubble_source: None,
            jumps: 0,
        })
    }

    fn frame(&mut self, script: &InputScript, delta: Duration) -> Result<()> {
        self.time.advance(delta);
        let dt = self.time.delta_seconds();
        script.apply(self.time.elapsed_seconds(), &mut self.input);

        self.view = self.player.update(&self.input, dt);

        if self.input.is_interact_pressed() {
            self.handle_interact();
        }
        if self.input.is_guide_pressed() {
            if self.player.status.has_cosmoguide {
                log::info!("Opening the CosmoGuide");
            } else {
                log::info!("No guide to open yet");
            }
        }
        if self.input.is_pop_bubble_pressed() {
            self.pop_bubble();
        }

        let fixed_dt = self.time.fixed_timestep_seconds();
        let mut physics_steps = 0;
        while self.time.should_fixed_update() && physics_steps < MAX_STEPS_PER_FRAME {
            self.scene.advance_planetoids(&mut self.physics, fixed_dt);
            self.face_props();
            let report = self
                .player
                .fixed_update(&mut self.physics, &self.scene.world, fixed_dt)
                .context("player physics step failed")?;
            log::trace!(
                "step grounded={} follow={:?} drive={:?} clamped={}",
                report.grounded,
                report.area_correction,
                report.drive_force,
                report.speed_clamped,
            );
            if report.jumped {
                self.jumps += 1;
                log::info!("Jump #{}", self.jumps);
            }
            self.physics.step();
            physics_steps += 1;
        }

        if self.time.frame_count() % FRAME_RATE as u64 == 0 {
            self.log_progress();
        }

        self.input.begin_frame();
        Ok(())
    }

    /// The interact key dismisses an open message first, otherwise uses the
    /// nearest prop.
    fn handle_interact(&mut self) {
        if let Some(message) = self.dialogs.current() {
            log::debug!("Closing \"{}\"", message.title);
            self.dialogs.close();
            return;
        }
        let had_bubble = self.player.status.has_bubble_on;
        let used = self.player.interact(
            &self.physics,
            &mut self.scene.props,
            &mut self.npc,
            &mut self.dialogs,
        );
        match used {
            Some(index) if !had_bubble && self.player.status.has_bubble_on => {
                self.bubble_source = Some(index);
            }
            Some(_) => {}
            None => log::debug!("Nothing to interact with"),
        }
    }

    /// Burst the worn bubble; the prop it came from grows a new one.
    fn pop_bubble(&mut self) {
        if !self.player.status.pop_bubble() {
            log::debug!("No bubble to pop");
            return;
        }
        let source = self.bubble_source.take();
        if let Some(prop) = source.and_then(|index| self.scene.props.get_mut(index)) {
            prop.restock();
        }
    }

    /// Sprites face the camera every physics step.
    fn face_props(&mut self) {
        if let Some(target) = self.player.position(&self.physics) {
            let viewer = self.player.camera.transform(target).position;
            self.scene.face_props(viewer);
        }
    }

    fn log_progress(&self) {
        let Some(graphics) = self.player.graphics_transform(&self.physics) else {
            return;
        };
        let altitude = graphics.position.distance(self.scene.planetoid_position());
        let anchored = self.player.locomotion().area_tracker().anchored_to();
        log::info!(
            "t={:.1}s altitude={:.2} grounded={} on {} ({:?}) down={:.2?} view={:.2?} facing={:.2?}",
            self.time.elapsed_seconds(),
            altitude,
            self.player.locomotion().is_grounded(),
            self.scene.planetoid_name(),
            anchored,
            self.player.gravity().gravity_direction(),
            self.view.view_rotation * Vec3::NEG_Z,
            graphics.forward(),
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load();
    if std::env::args().any(|a| a == "--save-config") {
        config.save();
    }

    log::info!("Starting Planetwalk");
    let mut session = Session::new(&config)?;
    let script = demo_script();
    let frame = Duration::from_secs_f64(1.0 / FRAME_RATE);
    let end = script.duration() + 1.0;

    while session.time.elapsed_seconds() < end {
        if let Err(e) = session.frame(&script, frame) {
            log::error!("Session aborted: {:#}", e);
            return Err(e);
        }
    }

    log::info!(
        "Session over: {} jumps, {} messages, guide={}, bubble={}, puzzle piece={}",
        session.jumps,
        session.dialogs.shown_count(),
        session.player.status.has_cosmoguide,
        session.player.status.has_bubble_on,
        session.npc.isador_puzzle_piece_found,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{nearest_interactable, InteractionState};

    #[test]
    fn popped_bubble_regrows_on_its_flower() {
        let config = GameConfig::default();
        let mut session = Session::new(&config).unwrap();

        // Guide, close its message, puzzle piece, close, then the flower.
        for _ in 0..5 {
            session.handle_interact();
        }
        assert!(session.player.status.has_cosmoguide);
        assert!(session.npc.isador_puzzle_piece_found);
        assert!(session.player.status.has_bubble_on);
        assert_eq!(session.bubble_source, Some(2));
        assert_eq!(session.scene.props[2].state(), InteractionState::Consumed);

        session.pop_bubble();
        assert!(!session.player.status.has_bubble_on);
        assert_eq!(session.bubble_source, None);
        assert_eq!(session.scene.props[2].state(), InteractionState::Active);

        session.handle_interact();
        assert!(session.player.status.has_bubble_on);

        // Popping with no bubble on changes nothing.
        session.pop_bubble();
        session.pop_bubble();
        assert!(!session.player.status.has_bubble_on);
        assert_eq!(session.scene.props[2].state(), InteractionState::Active);
    }

    #[test]
    fn emptied_props_leave_nothing_in_reach() {
        let config = GameConfig::default();
        let mut session = Session::new(&config).unwrap();
        for _ in 0..5 {
            session.handle_interact();
        }
        let position = session.player.position(&session.physics).unwrap();
        assert_eq!(
            nearest_interactable(position, &session.scene.props, config.interact_range),
            None
        );
    }

    #[test]
    fn demo_frames_turn_the_flower_toward_the_camera() {
        let config = GameConfig::default();
        let mut session = Session::new(&config).unwrap();
        let script = InputScript::new();
        let frame = Duration::from_secs_f64(1.0 / FRAME_RATE);
        for _ in 0..30 {
            session.frame(&script, frame).unwrap();
        }
        let flower = session.scene.props[2].transform();
        let target = session.player.position(&session.physics).unwrap();
        let viewer = session.player.camera.transform(target).position;
        assert!(flower.forward().dot((viewer - flower.position).normalize()) > 0.99);
    }
}
