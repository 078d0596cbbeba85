//! Enemy, coin and power-up spawning
//!
//! Periodic spawns run off the simulation clock, so they stop while the game
//! is paused and can never land in the middle of a frame's collision pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::max_origin;
use super::state::{Enemy, GameState, PowerUp, PowerUpKind};
use crate::tuning::{Tuning, secs_to_ticks};

/// A repeating timer measured in simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub period_ticks: u64,
    pub next_at: u64,
}

impl Interval {
    pub fn new(period_ticks: u64, now: u64) -> Self {
        let period_ticks = period_ticks.max(1);
        Self {
            period_ticks,
            next_at: now + period_ticks,
        }
    }

    /// True once per elapsed period
    pub fn poll(&mut self, now: u64) -> bool {
        if now >= self.next_at {
            self.next_at += self.period_ticks;
            true
        } else {
            false
        }
    }

    /// Ticks until the next firing
    pub fn remaining(&self, now: u64) -> u64 {
        self.next_at.saturating_sub(now)
    }
}

/// The three independent spawn timers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub power_up: Interval,
    pub coin: Interval,
    pub enemy: Interval,
}

impl SpawnTimers {
    pub fn new(tuning: &Tuning, now: u64) -> Self {
        Self {
            power_up: Interval::new(secs_to_ticks(tuning.power_up_spawn_secs), now),
            coin: Interval::new(secs_to_ticks(tuning.coin_respawn_secs), now),
            enemy: Interval::new(secs_to_ticks(tuning.enemy_spawn_secs), now),
        }
    }
}

/// Uniform random top-left position that keeps a box of `size` on the surface
fn random_origin(rng: &mut impl Rng, surface: Vec2, size: Vec2) -> Vec2 {
    let max = max_origin(surface, size);
    Vec2::new(rng.random_range(0.0..=max.x), rng.random_range(0.0..=max.y))
}

impl GameState {
    /// Place one enemy at random, unless the enemy cap is reached.
    ///
    /// Returns the new enemy's ID.
    pub fn spawn_enemy(&mut self) -> Option<u32> {
        if self.enemies.len() >= self.max_enemies {
            log::debug!("Enemy spawn rejected: cap {} reached", self.max_enemies);
            return None;
        }
        let size = self.tuning.enemy_size;
        let pos = random_origin(&mut self.rng, self.surface, size);
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos, size });
        log::debug!("Spawned enemy {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        Some(id)
    }

    /// Move the coin somewhere new
    pub fn relocate_coin(&mut self) {
        self.coin.pos = random_origin(&mut self.rng, self.surface, self.coin.size);
    }

    /// Drop a power-up of a random kind at a random spot
    pub fn spawn_power_up(&mut self) -> u32 {
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let size = self.tuning.power_up_size;
        let pos = random_origin(&mut self.rng, self.surface, size);
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp { id, kind, pos, size });
        log::debug!("Spawned {:?} power-up {}", kind, id);
        id
    }
}

/// Fire whichever periodic spawns are due this tick
pub fn run_timers(state: &mut GameState) {
    let now = state.time_ticks;
    if state.timers.power_up.poll(now) {
        state.spawn_power_up();
    }
    if state.timers.coin.poll(now) {
        state.relocate_coin();
    }
    if state.timers.enemy.poll(now) {
        state.spawn_enemy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;

    fn state() -> GameState {
        GameState::with_seed(Tuning::default(), 7)
    }

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut interval = Interval::new(10, 0);
        let fired: Vec<u64> = (0..=35).filter(|&t| interval.poll(t)).collect();
        assert_eq!(fired, vec![10, 20, 30]);
    }

    #[test]
    fn test_enemy_cap_enforced() {
        let mut state = state();
        state.max_enemies = 4;
        assert!(state.spawn_enemy().is_some());
        assert!(state.spawn_enemy().is_none());
        assert_eq!(state.enemies.len(), 4);
    }

    #[test]
    fn test_spawned_entities_stay_on_surface() {
        let mut state = state();
        state.max_enemies = 500;
        let surface = Rect::new(0.0, 0.0, state.surface.x, state.surface.y);
        for _ in 0..200 {
            state.spawn_enemy();
            state.spawn_power_up();
            state.relocate_coin();
            let c = &state.coin;
            assert!(c.pos.x >= 0.0 && c.pos.x + c.size.x <= surface.size.x);
            assert!(c.pos.y >= 0.0 && c.pos.y + c.size.y <= surface.size.y);
        }
        for e in &state.enemies {
            assert!(e.pos.x >= 0.0 && e.pos.x + e.size.x <= surface.size.x);
            assert!(e.pos.y >= 0.0 && e.pos.y + e.size.y <= surface.size.y);
        }
        for p in &state.power_ups {
            assert!(p.pos.x >= 0.0 && p.pos.x + p.size.x <= surface.size.x);
        }
    }

    #[test]
    fn test_power_ups_are_uncapped() {
        let mut state = state();
        for _ in 0..50 {
            state.spawn_power_up();
        }
        assert_eq!(state.power_ups.len(), 50);
    }

    #[test]
    fn test_run_timers_schedule() {
        let mut state = state();
        let enemies = state.enemies.len();

        state.time_ticks = 1200;
        run_timers(&mut state);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.enemies.len(), enemies);

        let coin = state.coin.pos;
        state.time_ticks = 1800;
        run_timers(&mut state);
        assert_ne!(state.coin.pos, coin);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.enemies.len(), enemies + 1);

        state.time_ticks = 2400;
        run_timers(&mut state);
        assert_eq!(state.power_ups.len(), 2);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = state();
        let a = state.spawn_power_up();
        let b = state.spawn_enemy().unwrap();
        let c = state.spawn_power_up();
        assert!(a != b && b != c && a != c);
    }
}
