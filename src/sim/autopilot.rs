//! Idle/demo mode: a simple AI that plays the game
//!
//! Chases power-ups (or the coin when there are none), shoots the nearest
//! enemy whenever the gun is ready, and spends coins on the gun first and
//! health when it runs low.

use glam::Vec2;

use super::movement::{Direction, HeldDirections};
use super::state::GameState;
use super::tick::{Command, TickInput};
use super::upgrades::UpgradeKind;

/// Health at or below which the AI buys healing
const LOW_HEALTH: u32 = 50;

/// Choose the inputs for the next tick
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let me = state.character.center();

    // Go get the nearest power-up, otherwise the coin
    let goal = state
        .power_ups
        .iter()
        .map(|p| p.pos + p.size * 0.5)
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
        .unwrap_or(state.coin.pos + state.coin.size * 0.5);
    input.held = steer(me, goal, state.character.speed(state.time_ticks) * 0.5);

    // Track the nearest enemy
    let nearest_enemy = state
        .enemies
        .iter()
        .map(|e| e.center())
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));
    if let Some(enemy) = nearest_enemy {
        input.aim = Some(enemy);
        if state.can_shoot() {
            input.commands.push(Command::FireAt(enemy));
        }
    }

    // Shopping
    if state.gun_upgrade_available() {
        input.commands.push(Command::Purchase(UpgradeKind::Gun));
    } else if state.health <= LOW_HEALTH && state.score >= state.upgrade_cost(UpgradeKind::Health) {
        input.commands.push(Command::Purchase(UpgradeKind::Health));
    }

    input
}

/// Hold the keys that move `from` toward `to`, ignoring axes within `deadzone`
fn steer(from: Vec2, to: Vec2, deadzone: f32) -> HeldDirections {
    let delta = to - from;
    let mut held = HeldDirections::default();
    if delta.x > deadzone {
        held.set(Direction::Right, true);
    } else if delta.x < -deadzone {
        held.set(Direction::Left, true);
    }
    if delta.y > deadzone {
        held.set(Direction::Down, true);
    } else if delta.y < -deadzone {
        held.set(Direction::Up, true);
    }
    held
}
