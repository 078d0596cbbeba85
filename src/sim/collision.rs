//! Collision detection and effects
//!
//! Each pass scans first and removes afterward, so removing one entry never
//! shifts the next one out from under the scan.

use std::collections::HashSet;

use super::geometry::touching;
use super::state::{GameEvent, GameState, Owner};
use crate::tuning::secs_to_ticks;

/// Coin pickup: +1 score, coin moves elsewhere
pub fn collect_coin(state: &mut GameState) {
    if touching(&state.character, &state.coin) {
        state.score = state.score.saturating_add(1);
        state.relocate_coin();
        state.events.push(GameEvent::CoinCollected { score: state.score });
    }
}

/// Every enemy touching the character drains one coin. Enemies survive contact.
pub fn enemy_contact(state: &mut GameState) {
    let contacts = state
        .enemies
        .iter()
        .filter(|e| touching(&state.character, *e))
        .count();
    for _ in 0..contacts {
        state.lose_score(1);
        state.events.push(GameEvent::EnemyContact { score: state.score });
    }
}

/// Pick up every power-up the character touches
pub fn collect_power_ups(state: &mut GameState) {
    let now = state.time_ticks;
    let duration = secs_to_ticks(state.tuning.modifier_secs);

    let mut taken = Vec::new();
    for power_up in &state.power_ups {
        if touching(&state.character, power_up) {
            taken.push((power_up.id, power_up.kind));
        }
    }
    if taken.is_empty() {
        return;
    }

    for &(_, kind) in &taken {
        if state.character.modifiers.activate(kind, now, duration) {
            log::debug!("{:?} active", kind);
        } else {
            log::debug!("{:?} refreshed", kind);
        }
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
    let taken: HashSet<u32> = taken.into_iter().map(|(id, _)| id).collect();
    state.power_ups.retain(|p| !taken.contains(&p.id));
}

/// Player shots destroy enemies. A shot kills at most one enemy and an enemy
/// dies at most once; both are removed.
pub fn projectiles_hit_enemies(state: &mut GameState) {
    let mut dead_enemies = HashSet::new();
    let mut spent = HashSet::new();

    for projectile in state.projectiles.iter().filter(|p| p.owner == Owner::Player) {
        let hit = state
            .enemies
            .iter()
            .find(|e| !dead_enemies.contains(&e.id) && touching(projectile, *e));
        if let Some(enemy) = hit {
            dead_enemies.insert(enemy.id);
            spent.insert(projectile.id);
        }
    }
    if dead_enemies.is_empty() {
        return;
    }

    state.enemies.retain(|e| !dead_enemies.contains(&e.id));
    state.projectiles.retain(|p| !spent.contains(&p.id));
    let mut ids: Vec<u32> = dead_enemies.into_iter().collect();
    ids.sort_unstable();
    for id in ids {
        state.events.push(GameEvent::EnemyDestroyed { id });
    }
}

/// Enemy shots that reach the character cost health and are removed.
///
/// Invincibility only changes the character's colour; hits still land.
pub fn projectiles_hit_character(state: &mut GameState) {
    let spent: HashSet<u32> = state
        .projectiles
        .iter()
        .filter(|p| p.owner == Owner::Enemy && touching(*p, &state.character))
        .map(|p| p.id)
        .collect();
    if spent.is_empty() {
        return;
    }
    state.projectiles.retain(|p| !spent.contains(&p.id));

    let damage = state.tuning.enemy_projectile_damage;
    for _ in 0..spent.len() {
        state.damage(damage);
        state.events.push(GameEvent::PlayerHit { health: state.health });
    }
}

/// Run every collision pass in frame order
pub fn resolve(state: &mut GameState) {
    collect_coin(state);
    enemy_contact(state);
    collect_power_ups(state);
    projectiles_hit_enemies(state);
    projectiles_hit_character(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, PowerUp, PowerUpKind, Projectile};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> GameState {
        let mut state = GameState::with_seed(Tuning::default(), 5);
        state.enemies.clear();
        // park the coin away from the character
        state.coin.pos = Vec2::new(600.0, 400.0);
        state
    }

    fn enemy(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::splat(30.0),
        }
    }

    fn shot(id: u32, x: f32, y: f32, owner: Owner) -> Projectile {
        Projectile {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(10.0, 5.0),
            owner,
        }
    }

    #[test]
    fn test_coin_pickup() {
        let mut state = state();
        state.coin.pos = state.character.pos;
        collect_coin(&mut state);
        assert_eq!(state.score, 1);
        let coin = &state.coin;
        assert!(coin.pos.x >= 0.0 && coin.pos.x + coin.size.x <= state.surface.x);
        assert!(coin.pos.y >= 0.0 && coin.pos.y + coin.size.y <= state.surface.y);
        assert_eq!(state.events, vec![GameEvent::CoinCollected { score: 1 }]);
    }

    #[test]
    fn test_enemy_contact_drains_score_floor_zero() {
        let mut state = state();
        state.enemies = vec![enemy(1, 60.0, 60.0), enemy(2, 40.0, 40.0), enemy(3, 500.0, 500.0)];
        state.score = 1;
        enemy_contact(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_enemy_contact_per_enemy() {
        let mut state = state();
        state.enemies = vec![enemy(1, 60.0, 60.0), enemy(2, 40.0, 40.0)];
        state.score = 5;
        enemy_contact(&mut state);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_invincible_still_drained_by_contact() {
        let mut state = state();
        state.enemies = vec![enemy(1, 60.0, 60.0)];
        state.score = 5;
        state
            .character
            .modifiers
            .activate(PowerUpKind::Invincibility, 0, 300);
        enemy_contact(&mut state);
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_adjacent_power_ups_both_collected() {
        let mut state = state();
        let size = Vec2::splat(30.0);
        state.power_ups = vec![
            PowerUp { id: 1, kind: PowerUpKind::SpeedBoost, pos: Vec2::new(45.0, 50.0), size },
            PowerUp { id: 2, kind: PowerUpKind::MultiShot, pos: Vec2::new(55.0, 50.0), size },
            PowerUp { id: 3, kind: PowerUpKind::Invincibility, pos: Vec2::new(700.0, 50.0), size },
        ];
        collect_power_ups(&mut state);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].id, 3);
        assert!(state.character.multi_shot(0));
        assert_eq!(state.character.speed(0), 10.0);
    }

    #[test]
    fn test_projectile_kills_only_its_enemy() {
        let mut state = state();
        state.enemies = vec![enemy(10, 200.0, 200.0), enemy(11, 300.0, 300.0), enemy(12, 400.0, 200.0)];
        state.projectiles = vec![
            shot(20, 205.0, 205.0, Owner::Player),
            shot(21, 700.0, 100.0, Owner::Player),
            shot(22, 405.0, 205.0, Owner::Enemy),
        ];
        projectiles_hit_enemies(&mut state);

        let enemy_ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        let shot_ids: Vec<u32> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(enemy_ids, vec![11, 12]);
        assert_eq!(shot_ids, vec![21, 22]);
        assert_eq!(state.events, vec![GameEvent::EnemyDestroyed { id: 10 }]);
    }

    #[test]
    fn test_two_shots_one_enemy() {
        let mut state = state();
        state.enemies = vec![enemy(10, 200.0, 200.0)];
        state.projectiles = vec![
            shot(20, 205.0, 205.0, Owner::Player),
            shot(21, 210.0, 210.0, Owner::Player),
        ];
        projectiles_hit_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, 21);
    }

    #[test]
    fn test_consecutive_hits_not_skipped() {
        let mut state = state();
        state.enemies = vec![enemy(10, 200.0, 200.0), enemy(11, 240.0, 200.0)];
        state.projectiles = vec![
            shot(20, 205.0, 205.0, Owner::Player),
            shot(21, 245.0, 205.0, Owner::Player),
        ];
        projectiles_hit_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_enemy_shot_damages_character() {
        let mut state = state();
        state.projectiles = vec![
            shot(1, 55.0, 55.0, Owner::Enemy),
            shot(2, 60.0, 60.0, Owner::Player),
            shot(3, 600.0, 60.0, Owner::Enemy),
        ];
        projectiles_hit_character(&mut state);
        assert_eq!(state.health, 90);
        let ids: Vec<u32> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_invincible_still_takes_shot_damage() {
        let mut state = state();
        state
            .character
            .modifiers
            .activate(PowerUpKind::Invincibility, 0, 300);
        state.projectiles = vec![shot(1, 55.0, 55.0, Owner::Enemy)];
        projectiles_hit_character(&mut state);
        assert_eq!(state.health, 90);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.events, vec![GameEvent::PlayerHit { health: 90 }]);
    }

    #[test]
    fn test_health_floors_at_zero() {
        let mut state = state();
        state.health = 5;
        state.projectiles = vec![shot(1, 55.0, 55.0, Owner::Enemy)];
        projectiles_hit_character(&mut state);
        assert_eq!(state.health, 0);
    }
}
