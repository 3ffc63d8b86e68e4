//! Input handling for keyboard and mouse.

use glam::Vec2;
use std::collections::HashSet;

/// Keys bound to gameplay actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub interact: KeyCode,
    pub guide: KeyCode,
    pub pop_bubble: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            interact: KeyCode::KeyE,
            guide: KeyCode::KeyC,
            pop_bubble: KeyCode::KeyB,
        }
    }
}

/// Cursor lock and visibility, toggled by gameplay code.
pub trait CursorControl {
    fn set_cursor_locked(&mut self, locked: bool);
    fn set_cursor_visible(&mut self, visible: bool);

    /// Lock the cursor to the window and hide it.
    fn lock_and_hide(&mut self) {
        self.set_cursor_locked(true);
        self.set_cursor_visible(false);
    }
}

/// Manages input state for the current frame.
#[derive(Debug)]
pub struct InputState {
    pub bindings: KeyBindings,

    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
    cursor_visible: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            accumulated_delta: Vec2::ZERO,
            cursor_locked: false,
            cursor_visible: true,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Raw movement axes: x = horizontal (right positive), y = vertical
    /// (forward positive). Each axis is -1, 0 or 1 and the pair is not
    /// normalized, so diagonals have length sqrt(2).
    pub fn movement_axes(&self) -> Vec2 {
        let axis = |negative: KeyCode, positive: KeyCode| {
            let mut value = 0.0;
            if self.is_key_held(positive) {
                value += 1.0;
            }
            if self.is_key_held(negative) {
                value -= 1.0;
            }
            value
        };
        let b = self.bindings;
        Vec2::new(axis(b.left, b.right), axis(b.back, b.forward))
    }

    /// Check if jump is held.
    pub fn is_jump_held(&self) -> bool {
        self.is_key_held(self.bindings.jump)
    }

    /// Check if interact was pressed this frame.
    pub fn is_interact_pressed(&self) -> bool {
        self.is_key_pressed(self.bindings.interact)
    }

    /// Check if the guide key was pressed this frame.
    pub fn is_guide_pressed(&self) -> bool {
        self.is_key_pressed(self.bindings.guide)
    }

    /// Check if the bubble was popped this frame.
    pub fn is_pop_bubble_pressed(&self) -> bool {
        self.is_key_pressed(self.bindings.pop_bubble)
    }
}

impl CursorControl for InputState {
    fn set_cursor_locked(&mut self, locked: bool) {
        log::debug!("Cursor locked: {}", locked);
        self.cursor_locked = locked;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_are_raw_and_cancel_out() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        assert_eq!(input.movement_axes(), Vec2::new(1.0, 1.0));

        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        assert_eq!(input.movement_axes(), Vec2::new(0.0, 1.0));

        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        input.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        assert_eq!(input.movement_axes(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn pressed_only_lasts_one_frame_but_held_persists() {
        let mut input = InputState::new();
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        assert!(input.is_jump_held());
        assert!(input.is_interact_pressed());

        input.begin_frame();
        // Key repeat must not count as a fresh press.
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        assert!(input.is_jump_held());
        assert!(!input.is_interact_pressed());

        input.process_keyboard(KeyCode::KeyB, ElementState::Pressed);
        assert!(input.is_pop_bubble_pressed());
        input.begin_frame();
        assert!(!input.is_pop_bubble_pressed());
    }

    #[test]
    fn mouse_delta_is_latched_per_frame() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -1.0));
        input.process_mouse_motion((2.0, 0.5));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, -0.5));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn lock_and_hide_sets_both_flags() {
        let mut input = InputState::new();
        assert!(input.is_cursor_visible());
        input.lock_and_hide();
        assert!(input.is_cursor_locked());
        assert!(!input.is_cursor_visible());
    }
}
