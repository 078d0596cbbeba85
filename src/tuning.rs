//! Data-driven game balance
//!
//! Every gameplay number lives here so a JSON file can rebalance a run
//! without touching code. Missing fields fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::TuningError;

/// Costs and effect sizes of the upgrade menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    pub gun_cost: u32,
    pub health_cost: u32,
    pub health_amount: u32,
    pub speed_cost: u32,
    pub speed_amount: f32,
    pub max_projectiles_cost: u32,
    pub max_projectiles_amount: usize,
    pub max_enemies_cost: u32,
    pub max_enemies_amount: usize,
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            gun_cost: 15,
            health_cost: 10,
            health_amount: 20,
            speed_cost: 15,
            speed_amount: 2.0,
            max_projectiles_cost: 20,
            max_projectiles_amount: 5,
            max_enemies_cost: 25,
            max_enemies_amount: 5,
        }
    }
}

/// Game balance parameters
///
/// Speeds are in surface units per frame, durations in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Character ===
    pub character_start: Vec2,
    pub character_size: Vec2,
    pub character_speed: f32,
    pub max_health: u32,

    // === Gun ===
    /// Barrel length drawn in front of the character
    pub gun_length: f32,
    /// Gap between barrel tip and spawned projectile
    pub muzzle_margin: f32,
    pub shot_cooldown_secs: f32,
    pub multi_shot_spread: f32,

    // === Projectiles ===
    pub projectile_size: Vec2,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    pub enemy_projectile_damage: u32,
    pub max_projectiles: usize,

    // === Enemies ===
    pub enemy_size: Vec2,
    pub enemy_speed: f32,
    /// Chance per enemy per frame of firing
    pub enemy_fire_chance: f64,
    pub initial_enemies: usize,
    pub max_enemies: usize,
    pub enemy_spawn_secs: f32,

    // === Coin ===
    pub coin_size: Vec2,
    pub coin_respawn_secs: f32,

    // === Power-ups ===
    pub power_up_size: Vec2,
    pub power_up_spawn_secs: f32,
    pub modifier_secs: f32,
    pub speed_boost_factor: f32,

    // === Progression ===
    pub coin_collector_threshold: u32,
    pub upgrades: UpgradeTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            surface_width: 960.0,
            surface_height: 540.0,

            character_start: Vec2::new(50.0, 50.0),
            character_size: Vec2::new(30.0, 30.0),
            character_speed: 5.0,
            max_health: 100,

            gun_length: 10.0,
            muzzle_margin: 10.0,
            shot_cooldown_secs: 1.0,
            multi_shot_spread: 0.2,

            projectile_size: Vec2::new(10.0, 5.0),
            player_projectile_speed: 10.0,
            enemy_projectile_speed: 5.0,
            enemy_projectile_damage: 10,
            max_projectiles: 10,

            enemy_size: Vec2::new(30.0, 30.0),
            enemy_speed: 3.0,
            enemy_fire_chance: 0.01,
            initial_enemies: 3,
            max_enemies: 10,
            enemy_spawn_secs: 30.0,

            coin_size: Vec2::new(30.0, 30.0),
            coin_respawn_secs: 30.0,

            power_up_size: Vec2::new(30.0, 30.0),
            power_up_spawn_secs: 20.0,
            modifier_secs: 5.0,
            speed_boost_factor: 2.0,

            coin_collector_threshold: 50,
            upgrades: UpgradeTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values that would put NaN or nonsense into the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let sizes = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("character_size", self.character_size.min_element()),
            ("projectile_size", self.projectile_size.min_element()),
            ("enemy_size", self.enemy_size.min_element()),
            ("coin_size", self.coin_size.min_element()),
            ("power_up_size", self.power_up_size.min_element()),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and > 0",
                });
            }
        }

        let non_negative = [
            ("character_speed", self.character_speed),
            ("gun_length", self.gun_length),
            ("muzzle_margin", self.muzzle_margin),
            ("shot_cooldown_secs", self.shot_cooldown_secs),
            ("multi_shot_spread", self.multi_shot_spread),
            ("player_projectile_speed", self.player_projectile_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
            ("enemy_speed", self.enemy_speed),
            ("modifier_secs", self.modifier_secs),
            ("speed_boost_factor", self.speed_boost_factor),
            ("upgrades.speed_amount", self.upgrades.speed_amount),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and >= 0",
                });
            }
        }

        let periods = [
            ("enemy_spawn_secs", self.enemy_spawn_secs),
            ("coin_respawn_secs", self.coin_respawn_secs),
            ("power_up_spawn_secs", self.power_up_spawn_secs),
        ];
        for (field, value) in periods {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "period must be finite and > 0",
                });
            }
        }

        if !self.character_start.is_finite() {
            return Err(TuningError::Invalid {
                field: "character_start",
                reason: "must be finite",
            });
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(TuningError::Invalid {
                field: "enemy_fire_chance",
                reason: "must be within [0, 1]",
            });
        }
        if self.max_health == 0 {
            return Err(TuningError::Invalid {
                field: "max_health",
                reason: "must be > 0",
            });
        }
        Ok(())
    }

    #[inline]
    pub fn surface(&self) -> Vec2 {
        Vec2::new(self.surface_width, self.surface_height)
    }
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    ((secs / SIM_DT).round() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "enemy_speed": 4.5, "upgrades": { "gun_cost": 3 } }"#)
            .unwrap();
        assert_eq!(tuning.enemy_speed, 4.5);
        assert_eq!(tuning.upgrades.gun_cost, 3);
        assert_eq!(tuning.upgrades.health_cost, 10);
        assert_eq!(tuning.max_projectiles, 10);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json_str(r#"{ "enemy_fire_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "enemy_fire_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_surface() {
        let err = Tuning::from_json_str(r#"{ "surface_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "surface_width", .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json_str("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), 60);
        assert_eq!(secs_to_ticks(20.0), 1200);
        assert_eq!(secs_to_ticks(0.0), 1);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Tuning::load("/definitely/not/here.json"),
            Err(TuningError::Io(_))
        ));
    }
}
