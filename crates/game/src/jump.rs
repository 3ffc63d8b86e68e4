//! Jump readiness and cooldown.

/// Ready-to-jump gate. A jump puts it on cooldown; it re-arms once the
/// cooldown has fully elapsed. Nothing can be queued while cooling down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpState {
    ready: bool,
    cooldown_remaining: f32,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            ready: true,
            cooldown_remaining: 0.0,
        }
    }
}

impl JumpState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Advance the cooldown timer.
    pub fn tick(&mut self, dt: f32) {
        if self.ready {
            return;
        }
        self.cooldown_remaining -= dt;
        if self.cooldown_remaining <= 0.0 {
            self.cooldown_remaining = 0.0;
            self.ready = true;
        }
    }

    /// Consume readiness. Returns `false` (and changes nothing) while cooling down.
    pub fn try_start(&mut self, cooldown: f32) -> bool {
        if !self.ready {
            return false;
        }
        self.ready = false;
        self.cooldown_remaining = cooldown;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_blocks_until_elapsed() {
        let mut jump = JumpState::new();
        assert!(jump.try_start(0.25));
        assert!(!jump.is_ready());

        jump.tick(0.1);
        assert!(!jump.try_start(0.25));
        jump.tick(0.1);
        assert!(!jump.is_ready());
        jump.tick(0.1);
        assert!(jump.is_ready());
        assert!(jump.try_start(0.25));
    }

    #[test]
    fn blocked_attempt_does_not_extend_cooldown() {
        let mut jump = JumpState::new();
        jump.try_start(0.25);
        jump.tick(0.2);
        jump.try_start(0.25);
        assert!((jump.cooldown_remaining - 0.05).abs() < 1e-6);
    }

    #[test]
    fn zero_cooldown_rearms_on_next_tick() {
        let mut jump = JumpState::new();
        assert!(jump.try_start(0.0));
        assert!(!jump.is_ready());
        jump.tick(1.0 / 60.0);
        assert!(jump.is_ready());
    }
}
