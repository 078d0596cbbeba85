//! Frame driver and command surface for the presentation layer
//!
//! Input handlers only touch the pending [`TickInput`]; the simulation itself
//! runs in [`Session::update`], once per display refresh.

use glam::Vec2;

use crate::consts::*;
use crate::error::PurchaseError;
use crate::sim::{Command, Direction, GameEvent, GameState, Snapshot, TickInput, UpgradeKind, tick};
use crate::tuning::Tuning;

/// A running game plus its pending input
pub struct Session {
    state: GameState,
    input: TickInput,
    accumulator: f32,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self::from_state(GameState::new(tuning))
    }

    pub fn with_seed(tuning: Tuning, seed: u64) -> Self {
        Self::from_state(GameState::with_seed(tuning, seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn set_directional_input(&mut self, dir: Direction, pressed: bool) {
        self.input.held.set(dir, pressed);
    }

    pub fn set_aim_target(&mut self, x: f32, y: f32) {
        self.input.aim = Some(Vec2::new(x, y));
    }

    pub fn fire_at(&mut self, x: f32, y: f32) {
        self.input.commands.push(Command::FireAt(Vec2::new(x, y)));
    }

    pub fn toggle_pause(&mut self) {
        self.input.commands.push(Command::TogglePause);
    }

    /// Queue a purchase by menu id. Unknown ids are rejected here and never
    /// reach the simulation.
    pub fn purchase(&mut self, id: &str) -> Result<(), PurchaseError> {
        let upgrade = UpgradeKind::from_id(id).ok_or_else(|| {
            log::debug!("Rejected unknown upgrade id {:?}", id);
            PurchaseError::UnknownUpgrade(id.to_string())
        })?;
        self.input.commands.push(Command::Purchase(upgrade));
        Ok(())
    }

    pub fn add_score(&mut self, amount: u32) {
        self.input.commands.push(Command::AddScore(amount));
    }

    pub fn spawn_enemy_now(&mut self) {
        self.input.commands.push(Command::SpawnEnemy);
    }

    pub fn reset(&mut self) {
        self.input.commands.push(Command::Reset);
    }

    /// Toggle the AI player
    pub fn set_idle_mode(&mut self, enabled: bool) {
        self.input.idle_mode = enabled;
        log::info!("Idle mode: {}", enabled);
    }

    /// The drawing surface changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Run exactly one simulation tick with the pending input
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input);
        // Clear one-shot inputs after processing
        self.input.commands.clear();
    }

    /// Advance by the wall-clock time since the last refresh.
    ///
    /// Returns the number of ticks simulated.
    pub fn update(&mut self, elapsed_secs: f32) -> u32 {
        let dt = if elapsed_secs.is_finite() {
            elapsed_secs.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn session() -> Session {
        let mut tuning = Tuning::default();
        tuning.enemy_fire_chance = 0.0;
        tuning.initial_enemies = 0;
        Session::with_seed(tuning, 31)
    }

    #[test]
    fn test_update_fixed_steps() {
        let mut s = session();
        assert_eq!(s.update(SIM_DT * 0.5), 0);
        assert_eq!(s.update(SIM_DT * 0.6), 1);
        assert_eq!(s.state().time_ticks, 1);
        // long hitches are clamped
        assert_eq!(s.update(5.0), 6);
    }

    #[test]
    fn test_commands_wait_for_next_tick() {
        let mut s = session();
        s.add_score(20);
        assert_eq!(s.state().score, 0);
        s.step();
        assert_eq!(s.state().score, 20);
        s.step();
        assert_eq!(s.state().score, 20);
    }

    #[test]
    fn test_held_direction_persists() {
        let mut s = session();
        s.set_directional_input(Direction::Right, true);
        s.step();
        s.step();
        assert_eq!(s.snapshot().character.pos, Vec2::new(60.0, 50.0));
        s.set_directional_input(Direction::Right, false);
        s.step();
        assert_eq!(s.snapshot().character.pos, Vec2::new(60.0, 50.0));
    }

    #[test]
    fn test_buy_gun_then_fire() {
        let mut s = session();
        s.add_score(15);
        s.purchase("gun").unwrap();
        s.step();
        assert!(s.snapshot().character.has_gun);
        assert!(!s.snapshot().gun_upgrade_available);

        s.fire_at(600.0, 65.0);
        s.step();
        assert_eq!(s.snapshot().projectiles.len(), 1);

        // cooldown: second click is dropped, not queued
        s.fire_at(600.0, 65.0);
        s.step();
        s.step();
        assert_eq!(s.snapshot().projectiles.len(), 1);
    }

    #[test]
    fn test_unknown_purchase_rejected() {
        let mut s = session();
        assert!(matches!(s.purchase("rocket"), Err(PurchaseError::UnknownUpgrade(_))));
        s.step();
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut s = session();
        s.toggle_pause();
        s.step();
        assert!(s.snapshot().paused);
        s.update(1.0);
        assert_eq!(s.state().time_ticks, 0);
        s.toggle_pause();
        s.step();
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(s.state().time_ticks, 1);
    }

    #[test]
    fn test_spawn_enemy_now() {
        let mut s = session();
        s.spawn_enemy_now();
        s.step();
        assert_eq!(s.snapshot().enemies.len(), 1);
    }

    #[test]
    fn test_resize_applies_immediately() {
        let mut s = session();
        s.resize(60.0, 60.0);
        assert_eq!(s.snapshot().character.pos, Vec2::new(30.0, 30.0));
        assert_eq!(s.snapshot().surface, Vec2::new(60.0, 60.0));
    }
}
