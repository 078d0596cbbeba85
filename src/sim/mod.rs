//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One tick per frame, timers counted in ticks
//! - All randomness through the state's RNG
//! - Removal passes scan first, mutate after

pub mod achievements;
pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod geometry;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use achievements::Achievement;
pub use geometry::{Body, Rect, direction_to};
pub use movement::{Direction, HeldDirections};
pub use snapshot::Snapshot;
pub use spawner::{Interval, SpawnTimers};
pub use state::{
    Character, Coin, Enemy, GameEvent, GamePhase, GameState, Modifiers, Owner, PowerUp,
    PowerUpKind, Projectile,
};
pub use tick::{Command, TickInput, tick};
pub use upgrades::UpgradeKind;
