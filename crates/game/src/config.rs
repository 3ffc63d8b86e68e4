//! Game configuration (movement tuning, simulation rates, input). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ControllerError;

/// Tuning for the gravity-relative locomotion controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// How fast the graphics and body turn toward the movement direction.
    pub rotation_speed: f32,
    /// Drive force scale and planar speed cap (m/s).
    pub move_speed: f32,
    /// Total height of the player capsule.
    pub player_height: f32,
    pub player_radius: f32,
    /// Mass of the player's body (kg). Forces and impulses are tuned for 1.
    pub player_mass: f32,
    /// Extra probe length below the capsule for the ground check.
    pub raycast_margin: f32,
    /// Linear damping while grounded.
    pub ground_drag: f32,
    /// Impulse applied against gravity when jumping.
    pub jump_force: f32,
    /// Seconds before another jump is allowed.
    pub jump_cooldown: f32,
    /// Drive force multiplier while airborne, in [0, 1].
    pub air_multiplier: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 7.0,
            move_speed: 7.0,
            player_height: 1.25,
            player_radius: 0.3,
            player_mass: 1.0,
            raycast_margin: 0.2,
            ground_drag: 5.0,
            jump_force: 12.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.4,
        }
    }
}

impl MovementConfig {
    /// Length of the ground probe measured from the body centre.
    pub fn ground_probe_length(&self) -> f32 {
        self.player_height * 0.5 + self.raycast_margin
    }

    /// Reject values that would make the controller misbehave.
    pub fn validate(&self) -> Result<(), ControllerError> {
        let positive = [
            ("rotation_speed", self.rotation_speed),
            ("move_speed", self.move_speed),
            ("player_height", self.player_height),
            ("player_radius", self.player_radius),
            ("player_mass", self.player_mass),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ControllerError::InvalidConfig { field, value });
            }
        }
        let non_negative = [
            ("raycast_margin", self.raycast_margin),
            ("ground_drag", self.ground_drag),
            ("jump_force", self.jump_force),
            ("jump_cooldown", self.jump_cooldown),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ControllerError::InvalidConfig { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.air_multiplier) {
            return Err(ControllerError::InvalidConfig {
                field: "air_multiplier",
                value: self.air_multiplier,
            });
        }
        if self.player_radius * 2.0 > self.player_height {
            return Err(ControllerError::InvalidConfig {
                field: "player_radius",
                value: self.player_radius,
            });
        }
        Ok(())
    }
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub movement: MovementConfig,
    /// Fixed physics rate in Hz.
    #[serde(default = "default_physics_rate")]
    pub physics_rate_hz: f64,
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// How close the player must be to an interactable to use it.
    #[serde(default = "default_interact_range")]
    pub interact_range: f32,
}

fn default_physics_rate() -> f64 {
    60.0
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_interact_range() -> f32 {
    2.5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            physics_rate_hz: default_physics_rate(),
            sensitivity: default_sensitivity(),
            interact_range: default_interact_range(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let m = MovementConfig::default();
        assert_eq!(m.move_speed, 7.0);
        assert_eq!(m.jump_force, 12.0);
        assert_eq!(m.jump_cooldown, 0.25);
        assert_eq!(m.player_mass, 1.0);
        assert!((m.ground_probe_length() - 0.825).abs() < 1e-6);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn partial_ron_fills_missing_fields() {
        let config: GameConfig =
            ron::from_str("(movement: (move_speed: 9.0), physics_rate_hz: 120.0)").unwrap();
        assert_eq!(config.movement.move_speed, 9.0);
        assert_eq!(config.movement.jump_force, 12.0);
        assert_eq!(config.physics_rate_hz, 120.0);
        assert_eq!(config.interact_range, 2.5);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = MovementConfig {
            air_multiplier: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ControllerError::InvalidConfig { field: "air_multiplier", .. })
        ));

        let bad = MovementConfig {
            move_speed: f32::NAN,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = MovementConfig {
            player_radius: 1.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = MovementConfig {
            player_mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ControllerError::InvalidConfig { field: "player_mass", .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_from(Path::new("/nonexistent/planetwalk/config.ron"));
        assert_eq!(config.physics_rate_hz, 60.0);
    }
}
