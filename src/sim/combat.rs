//! Shooting: player gun with cooldown and multi-shot, random enemy fire

use glam::Vec2;
use rand::Rng;

use super::geometry::{angle_to_dir, direction_to};
use super::movement::update_facing;
use super::state::{GameEvent, GamePhase, GameState, Owner, Projectile};
use crate::tuning::secs_to_ticks;

impl GameState {
    /// Append a projectile unless the collection is full.
    ///
    /// Overflow drops the newest shot; projectiles already in flight are kept.
    pub fn push_projectile(&mut self, pos: Vec2, vel: Vec2, owner: Owner) -> bool {
        if self.projectiles.len() >= self.max_projectiles {
            return false;
        }
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            vel,
            size: self.tuning.projectile_size,
            owner,
        });
        true
    }

    /// Where the player's shots leave the barrel
    pub fn muzzle(&self) -> Vec2 {
        let c = &self.character;
        let reach = Vec2::splat(self.tuning.gun_length + self.tuning.muzzle_margin) + c.size * 0.5;
        c.center() + c.facing() * reach
    }

    /// Fire toward `target`.
    ///
    /// Ignored (returns 0) without a gun, during cooldown, or when not playing;
    /// fire commands are never queued. Otherwise returns how many projectiles
    /// made it into the collection and starts the cooldown.
    pub fn fire_at(&mut self, target: Vec2) -> usize {
        if self.phase != GamePhase::Playing || !self.can_shoot() {
            return 0;
        }
        self.aim_target = Some(target);
        update_facing(self);

        let speed = self.tuning.player_projectile_speed;
        let origin = self.muzzle();
        let facing = self.character.facing();
        let dir = direction_to(origin, target).unwrap_or(facing);

        let mut fired = usize::from(self.push_projectile(origin, dir * speed, Owner::Player));
        if self.character.multi_shot(self.time_ticks) {
            let spread = self.tuning.multi_shot_spread;
            for offset in [-spread, spread] {
                let vel = angle_to_dir(self.character.angle + offset) * speed;
                fired += usize::from(self.push_projectile(origin, vel, Owner::Player));
            }
        }

        self.shoot_ready_at = self.time_ticks + secs_to_ticks(self.tuning.shot_cooldown_secs);
        self.events.push(GameEvent::ShotFired { projectiles: fired });
        fired
    }
}

/// Each enemy independently rolls to fire one shot at the character
pub fn enemy_fire(state: &mut GameState) {
    let chance = state.tuning.enemy_fire_chance;
    let speed = state.tuning.enemy_projectile_speed;
    let target = state.character.center();

    let mut shots = Vec::new();
    for enemy in &state.enemies {
        if state.rng.random_bool(chance) {
            let origin = enemy.center();
            if let Some(dir) = direction_to(origin, target) {
                shots.push((origin, dir * speed));
            }
        }
    }
    for (origin, vel) in shots {
        state.push_projectile(origin, vel, Owner::Enemy);
    }
}
