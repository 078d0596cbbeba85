//! Read-only view of the state for the presentation layer

use glam::Vec2;
use serde::Serialize;

use super::achievements::Achievement;
use super::state::{GamePhase, GameState, Owner, PowerUpKind};
use crate::palette::Rgba;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterView {
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub color: Rgba,
    pub has_gun: bool,
    pub invincible: bool,
    pub multi_shot: bool,
    pub speed_boost: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: Owner,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub paused: bool,
    pub surface: Vec2,
    pub character: CharacterView,
    pub coin: BoxView,
    pub enemies: Vec<BoxView>,
    pub projectiles: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
    pub score: u32,
    pub health: u32,
    pub max_health: u32,
    pub max_projectiles: usize,
    pub max_enemies: usize,
    /// Seconds until the gun is ready (0 when ready)
    pub cooldown: f32,
    pub gun_upgrade_available: bool,
    pub achievements: Vec<Achievement>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let now = self.time_ticks;
        let c = &self.character;
        Snapshot {
            tick: now,
            phase: self.phase,
            paused: self.is_paused(),
            surface: self.surface,
            character: CharacterView {
                pos: c.pos,
                size: c.size,
                angle: c.angle,
                speed: c.speed(now),
                color: c.color(now),
                has_gun: c.has_gun,
                invincible: c.invincible(now),
                multi_shot: c.multi_shot(now),
                speed_boost: c.modifiers.is_active(PowerUpKind::SpeedBoost, now),
            },
            coin: BoxView {
                id: 0,
                pos: self.coin.pos,
                size: self.coin.size,
                color: self.coin.color(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| BoxView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                    color: e.color(),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    size: p.size,
                    owner: p.owner,
                    color: p.color(),
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size,
                    color: p.color(),
                })
                .collect(),
            score: self.score,
            health: self.health,
            max_health: self.tuning.max_health,
            max_projectiles: self.max_projectiles,
            max_enemies: self.max_enemies,
            cooldown: self.cooldown_remaining(),
            gun_upgrade_available: self.gun_upgrade_available(),
            achievements: self.achievements.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::with_seed(Tuning::default(), 8);
        state.score = 20;
        let snap = state.snapshot();
        assert_eq!(snap.enemies.len(), 3);
        assert_eq!(snap.score, 20);
        assert_eq!(snap.health, 100);
        assert!(snap.gun_upgrade_available);
        assert!(!snap.paused);
        assert_eq!(snap.cooldown, 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::with_seed(Tuning::default(), 8);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"enemies\""));
    }
}
