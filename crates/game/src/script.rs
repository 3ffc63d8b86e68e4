//! Timed input for the headless demo session.

use input::{ElementState, InputState, KeyCode};

/// Length of a tap, in seconds.
const TAP: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
enum Action {
    Hold { key: KeyCode, from: f32, to: f32 },
    Look { dx: f64, dy: f64, from: f32, to: f32 },
}

/// A list of key holds and mouse sweeps, replayed against [`InputState`]
/// as if the events came from a window.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    actions: Vec<Action>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(mut self, key: KeyCode, from: f32, to: f32) -> Self {
        self.actions.push(Action::Hold { key, from, to });
        self
    }

    pub fn tap(self, key: KeyCode, at: f32) -> Self {
        self.hold(key, at, at + TAP)
    }

    /// Move the mouse by (`dx`, `dy`) pixels every frame between `from` and `to`.
    pub fn look(mut self, dx: f64, dy: f64, from: f32, to: f32) -> Self {
        self.actions.push(Action::Look { dx, dy, from, to });
        self
    }

    /// Latest time any action is still active.
    pub fn duration(&self) -> f32 {
        self.actions
            .iter()
            .map(|a| match *a {
                Action::Hold { to, .. } | Action::Look { to, .. } => to,
            })
            .fold(0.0, f32::max)
    }

    /// Feed the events that happen at time `t` into `input`.
    pub fn apply(&self, t: f32, input: &mut InputState) {
        let mut keys: Vec<KeyCode> = Vec::new();
        for action in &self.actions {
            match *action {
                Action::Hold { key, .. } => {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                Action::Look { dx, dy, from, to } => {
                    if (from..to).contains(&t) {
                        input.process_mouse_motion((dx, dy));
                    }
                }
            }
        }

        for key in keys {
            let wanted = self.actions.iter().any(|a| match *a {
                Action::Hold { key: k, from, to } => k == key && (from..to).contains(&t),
                Action::Look { .. } => false,
            });
            let held = input.is_key_held(key);
            if wanted && !held {
                input.process_keyboard(key, ElementState::Pressed);
            } else if !wanted && held {
                input.process_keyboard(key, ElementState::Released);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_presses_once_and_releases_after() {
        let script = InputScript::new().hold(KeyCode::KeyW, 1.0, 2.0);
        let mut input = InputState::new();

        script.apply(0.5, &mut input);
        assert!(!input.is_key_held(KeyCode::KeyW));

        script.apply(1.0, &mut input);
        assert!(input.is_key_pressed(KeyCode::KeyW));
        input.begin_frame();
        script.apply(1.5, &mut input);
        assert!(input.is_key_held(KeyCode::KeyW));
        assert!(!input.is_key_pressed(KeyCode::KeyW));

        script.apply(2.0, &mut input);
        assert!(input.is_key_released(KeyCode::KeyW));
        assert!(!input.is_key_held(KeyCode::KeyW));
    }

    #[test]
    fn repeated_taps_of_one_key_each_press() {
        let script = InputScript::new().tap(KeyCode::KeyE, 1.0).tap(KeyCode::KeyE, 2.0);
        let mut input = InputState::new();
        let mut presses = 0;
        let mut t = 0.0;
        while t < 3.0 {
            script.apply(t, &mut input);
            if input.is_key_pressed(KeyCode::KeyE) {
                presses += 1;
            }
            input.begin_frame();
            t += 0.01;
        }
        assert_eq!(presses, 2);
        assert!((script.duration() - 2.05).abs() < 1e-6);
    }

    #[test]
    fn look_accumulates_mouse_motion() {
        let script = InputScript::new().look(4.0, -2.0, 0.0, 1.0);
        let mut input = InputState::new();
        script.apply(0.5, &mut input);
        input.begin_frame();
        assert_eq!(input.mouse_delta(), glam::Vec2::new(4.0, -2.0));
    }
}
