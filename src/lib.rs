//! Coin Arena - A top-down coin collecting arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, spawning, game state)
//! - `session`: Frame driver and command surface for a presentation layer
//! - `tuning`: Data-driven game balance
//! - `error`: Error types for purchases and tuning files

pub mod error;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{PurchaseError, TuningError};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Entity colors handed to the renderer
pub mod palette {
    /// Linear RGBA
    pub type Rgba = [f32; 4];

    pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
    /// Invincible character
    pub const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
    pub const ORANGE: Rgba = [1.0, 0.65, 0.0, 1.0];
    pub const PURPLE: Rgba = [0.5, 0.0, 0.5, 1.0];
    pub const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];
    pub const GOLD: Rgba = [1.0, 0.84, 0.0, 1.0];
    pub const GREEN: Rgba = [0.0, 0.5, 0.0, 1.0];
}
