//! Game state and entity types
//!
//! Everything the frame loop reads or writes lives in [`GameState`]; there
//! is no ambient global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::Achievement;
use super::geometry::{Body, Rect, angle_to_dir, clamp_origin};
use super::spawner::SpawnTimers;
use super::upgrades::UpgradeKind;
use crate::palette::{self, Rgba};
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frame loop suspended: no physics, no spawn timers
    Paused,
    /// Health ran out; only a reset leaves this phase
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincibility,
    SpeedBoost,
    MultiShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Invincibility,
        PowerUpKind::SpeedBoost,
        PowerUpKind::MultiShot,
    ];
}

/// Timed modifiers, stored as the tick at which each one runs out.
///
/// Picking up a modifier that is already running pushes its expiry out
/// instead of applying the effect a second time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    invincible_until: Option<u64>,
    speed_boost_until: Option<u64>,
    multi_shot_until: Option<u64>,
}

impl Modifiers {
    fn slot(&self, kind: PowerUpKind) -> Option<u64> {
        match kind {
            PowerUpKind::Invincibility => self.invincible_until,
            PowerUpKind::SpeedBoost => self.speed_boost_until,
            PowerUpKind::MultiShot => self.multi_shot_until,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut Option<u64> {
        match kind {
            PowerUpKind::Invincibility => &mut self.invincible_until,
            PowerUpKind::SpeedBoost => &mut self.speed_boost_until,
            PowerUpKind::MultiShot => &mut self.multi_shot_until,
        }
    }

    /// Start or refresh a modifier. Returns true if it was not already running.
    pub fn activate(&mut self, kind: PowerUpKind, now: u64, duration_ticks: u64) -> bool {
        let was_active = self.is_active(kind, now);
        let until = now + duration_ticks;
        let slot = self.slot_mut(kind);
        *slot = Some(slot.map_or(until, |old| old.max(until)));
        !was_active
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind, now: u64) -> bool {
        matches!(self.slot(kind), Some(until) if now < until)
    }

    /// Ticks left on a modifier (0 if inactive)
    pub fn remaining_ticks(&self, kind: PowerUpKind, now: u64) -> u64 {
        self.slot(kind).map_or(0, |until| until.saturating_sub(now))
    }

    /// Clear every modifier whose expiry has passed, returning the kinds that ended
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut ended = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = self.slot_mut(kind);
            if matches!(*slot, Some(until) if until <= now) {
                *slot = None;
                ended.push(kind);
            }
        }
        ended
    }
}

/// The player's avatar (singleton)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Facing angle (radians), follows the aim target
    pub angle: f32,
    /// Speed before modifiers (units per frame)
    pub base_speed: f32,
    pub speed_boost_factor: f32,
    pub has_gun: bool,
    pub modifiers: Modifiers,
}

impl Character {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: clamp_origin(tuning.character_start, tuning.character_size, tuning.surface()),
            size: tuning.character_size,
            angle: 0.0,
            base_speed: tuning.character_speed,
            speed_boost_factor: tuning.speed_boost_factor,
            has_gun: false,
            modifiers: Modifiers::default(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn facing(&self) -> Vec2 {
        angle_to_dir(self.angle)
    }

    /// Effective movement speed at tick `now`
    pub fn speed(&self, now: u64) -> f32 {
        if self.modifiers.is_active(PowerUpKind::SpeedBoost, now) {
            self.base_speed * self.speed_boost_factor
        } else {
            self.base_speed
        }
    }

    #[inline]
    pub fn invincible(&self, now: u64) -> bool {
        self.modifiers.is_active(PowerUpKind::Invincibility, now)
    }

    #[inline]
    pub fn multi_shot(&self, now: u64) -> bool {
        self.modifiers.is_active(PowerUpKind::MultiShot, now)
    }

    pub fn color(&self, now: u64) -> Rgba {
        if self.invincible(now) {
            palette::YELLOW
        } else {
            palette::RED
        }
    }
}

impl Body for Character {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    pub size: Vec2,
    pub owner: Owner,
}

impl Projectile {
    pub fn color(&self) -> Rgba {
        match self.owner {
            Owner::Player => palette::ORANGE,
            Owner::Enemy => palette::PURPLE,
        }
    }
}

impl Body for Projectile {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A seeking enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Enemy {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn color(&self) -> Rgba {
        palette::BLUE
    }
}

impl Body for Enemy {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// The coin (singleton, relocated rather than destroyed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Coin {
    pub fn color(&self) -> Rgba {
        palette::GOLD
    }
}

impl Body for Coin {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl PowerUp {
    pub fn color(&self) -> Rgba {
        palette::GREEN
    }
}

impl Body for PowerUp {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Things that happened during a frame, for sound and notification layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { score: u32 },
    /// An enemy is touching the character and drained a coin
    EnemyContact { score: u32 },
    EnemyDestroyed { id: u32 },
    ShotFired { projectiles: usize },
    PlayerHit { health: u32 },
    PowerUpCollected(PowerUpKind),
    ModifierExpired(PowerUpKind),
    UpgradePurchased(UpgradeKind),
    AchievementUnlocked(Achievement),
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters the run was started with
    pub tuning: Tuning,
    /// Drawing surface size, supplied by the presentation layer
    pub surface: Vec2,
    pub phase: GamePhase,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    pub character: Character,
    /// Latest pointer position; the facing angle tracks it
    pub aim_target: Option<Vec2>,
    pub coin: Coin,
    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Projectiles in insertion order, never longer than `max_projectiles`
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub health: u32,
    pub max_projectiles: usize,
    pub max_enemies: usize,
    /// Tick at which the gun may fire again
    pub shoot_ready_at: u64,
    /// Unlocked achievements in unlock order
    pub achievements: Vec<Achievement>,
    pub timers: SpawnTimers,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
    /// Surface size received after game over, applied on reset
    pending_surface: Option<Vec2>,
}

impl GameState {
    /// Create a new run with an entropy-seeded RNG
    pub fn new(tuning: Tuning) -> Self {
        let tuning = Self::checked(tuning);
        let surface = tuning.surface();
        Self::from_rng(tuning, Pcg32::from_rng(&mut rand::rng()), surface)
    }

    /// Create a new run with a fixed seed (reproducible spawns)
    pub fn with_seed(tuning: Tuning, seed: u64) -> Self {
        let tuning = Self::checked(tuning);
        let surface = tuning.surface();
        Self::from_rng(tuning, Pcg32::seed_from_u64(seed), surface)
    }

    /// Out-of-range tuning would panic inside the frame loop; run on defaults instead
    fn checked(tuning: Tuning) -> Tuning {
        match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({}); using defaults", e);
                Tuning::default()
            }
        }
    }

    fn from_rng(tuning: Tuning, rng: Pcg32, surface: Vec2) -> Self {
        let mut character = Character::new(&tuning);
        character.pos = clamp_origin(character.pos, character.size, surface);
        let mut state = Self {
            character,
            coin: Coin {
                pos: Vec2::ZERO,
                size: tuning.coin_size,
            },
            surface,
            phase: GamePhase::Playing,
            time_ticks: 0,
            aim_target: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            health: tuning.max_health,
            max_projectiles: tuning.max_projectiles,
            max_enemies: tuning.max_enemies,
            shoot_ready_at: 0,
            achievements: Vec::new(),
            timers: SpawnTimers::new(&tuning, 0),
            events: Vec::new(),
            tuning,
            rng,
            next_id: 1,
            pending_surface: None,
        };
        state.populate();
        state
    }

    /// Startup entities: random coin and the initial enemy batch
    fn populate(&mut self) {
        self.relocate_coin();
        for _ in 0..self.tuning.initial_enemies {
            self.spawn_enemy();
        }
        log::info!(
            "New run: surface {}x{}, {} enemies",
            self.surface.x,
            self.surface.y,
            self.enemies.len()
        );
    }

    /// Reinitialise every entity to startup defaults.
    ///
    /// Surface size, tuning and RNG stream carry over.
    pub fn reset(&mut self) {
        let tuning = self.tuning.clone();
        let rng = self.rng.clone();
        let surface = self.pending_surface.unwrap_or(self.surface);
        *self = Self::from_rng(tuning, rng, surface);
        log::info!("Run reset");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a new surface size and pull the character back on screen.
    ///
    /// After game over the final frame stays frozen; the size is held until
    /// the next reset.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::debug!("Ignoring invalid surface size {}x{}", width, height);
            return;
        }
        if self.is_over() {
            self.pending_surface = Some(Vec2::new(width, height));
            return;
        }
        self.surface = Vec2::new(width, height);
        self.character.pos = clamp_origin(self.character.pos, self.character.size, self.surface);
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Flip between playing and paused (no effect once the game is over)
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        log::debug!("Phase now {:?}", self.phase);
    }

    /// Debug hook: grant coins
    pub fn add_score(&mut self, amount: u32) {
        if self.is_over() {
            return;
        }
        self.score = self.score.saturating_add(amount);
    }

    /// Take coins away, never below zero
    pub fn lose_score(&mut self, amount: u32) {
        self.score = self.score.saturating_sub(amount);
    }

    /// Apply damage, never below zero
    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restore health, never above the maximum
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.tuning.max_health);
    }

    /// Seconds until the gun can fire again (0 when ready)
    pub fn cooldown_remaining(&self) -> f32 {
        self.shoot_ready_at.saturating_sub(self.time_ticks) as f32 * crate::consts::SIM_DT
    }

    #[inline]
    pub fn can_shoot(&self) -> bool {
        self.character.has_gun && self.time_ticks >= self.shoot_ready_at
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
