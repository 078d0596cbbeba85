//! Fixed timestep simulation tick
//!
//! Core game loop: one call advances the simulation by exactly one frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::achievements::check_achievements;
use super::autopilot;
use super::collision;
use super::combat::enemy_fire;
use super::movement::{HeldDirections, move_character, move_projectiles, seek_enemies, update_facing};
use super::spawner::run_timers;
use super::state::{GameEvent, GamePhase, GameState};
use super::upgrades::UpgradeKind;

/// Discrete commands from the input layer, applied at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Shoot toward a surface point (ignored during cooldown, never queued)
    FireAt(Vec2),
    TogglePause,
    Purchase(UpgradeKind),
    /// Debug hook
    AddScore(u32),
    SpawnEnemy,
    /// Start over from startup defaults
    Reset,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional keys currently held
    pub held: HeldDirections,
    /// Latest pointer position
    pub aim: Option<Vec2>,
    /// One-shot commands, in arrival order
    pub commands: Vec<Command>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::FireAt(target) => {
            state.fire_at(target);
        }
        Command::TogglePause => state.toggle_pause(),
        Command::Purchase(upgrade) => {
            if let Err(e) = state.purchase(upgrade) {
                log::debug!("Purchase refused: {}", e);
            }
        }
        Command::AddScore(amount) => state.add_score(amount),
        Command::SpawnEnemy => {
            state.spawn_enemy();
        }
        Command::Reset => state.reset(),
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Game over is terminal until a reset arrives
    if state.is_over() {
        if input.commands.contains(&Command::Reset) {
            state.reset();
        }
        return;
    }

    // Idle/demo mode - AI plays the game
    let mut input = input.clone();
    if input.idle_mode {
        let ai = autopilot::drive(state);
        input.held = ai.held;
        input.aim = ai.aim.or(input.aim);
        input.commands.extend(ai.commands);
    }
    let input = &input;

    // Input sampling
    if let Some(aim) = input.aim {
        state.aim_target = Some(aim);
    }
    for &command in &input.commands {
        apply_command(state, command);
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;
    for kind in state.character.modifiers.expire(now) {
        log::debug!("{:?} expired", kind);
        state.events.push(GameEvent::ModifierExpired(kind));
    }

    // Physics
    move_character(state, &input.held);
    update_facing(state);
    seek_enemies(state);
    move_projectiles(state);
    enemy_fire(state);

    // Spawns
    run_timers(state);

    // Collisions and effects
    collision::resolve(state);

    // Termination
    if state.health == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::warn!(
            "Game over at tick {} with {} coins",
            state.time_ticks,
            state.score
        );
        return;
    }

    check_achievements(state);
}
