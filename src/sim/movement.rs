//! Per-frame movement: character, facing angle, enemy seek, projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Body, clamp_origin, direction_to};
use super::state::GameState;

/// Directional inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Screen-space unit step (y grows downward)
    pub fn step(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Which directional inputs are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn set(&mut self, dir: Direction, pressed: bool) {
        match dir {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Sum of held unit steps. Opposite keys cancel; diagonals are not normalized.
    pub fn axis(&self) -> Vec2 {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .into_iter()
            .filter(|&d| self.is_held(d))
            .map(Direction::step)
            .sum()
    }
}

/// Move the character by its effective speed along every held axis, then
/// clamp it onto the surface
pub fn move_character(state: &mut GameState, held: &HeldDirections) {
    let speed = state.character.speed(state.time_ticks);
    let character = &mut state.character;
    character.pos = clamp_origin(character.pos + held.axis() * speed, character.size, state.surface);
}

/// Point the character at the aim target
pub fn update_facing(state: &mut GameState) {
    let Some(target) = state.aim_target else {
        return;
    };
    if let Some(dir) = direction_to(state.character.center(), target) {
        state.character.angle = dir.y.atan2(dir.x);
    }
}

/// Every enemy steps toward the character at constant speed.
///
/// The step never overshoots, and an enemy sitting exactly on the character
/// stays put.
pub fn seek_enemies(state: &mut GameState) {
    let target = state.character.pos;
    let speed = state.tuning.enemy_speed;
    for enemy in &mut state.enemies {
        if let Some(dir) = direction_to(enemy.pos, target) {
            let step = speed.min(enemy.pos.distance(target));
            enemy.pos += dir * step;
        }
    }
}

/// Advance projectiles ballistically and drop the ones that left the surface
pub fn move_projectiles(state: &mut GameState) {
    let surface = state.surface;
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }
    state
        .projectiles
        .retain(|p| !p.bounds().origin_outside(surface));
}
