//! Coin Arena entry point
//!
//! Runs a headless game in idle mode and prints the final frame as JSON.
//!
//! Usage: `coin-arena [tuning.json] [frames]`

use coin_arena::consts::SIM_DT;
use coin_arena::sim::GameEvent;
use coin_arena::{Session, Tuning};

const DEFAULT_FRAMES: u64 = 3600;

fn main() {
    env_logger::init();
    log::info!("Coin Arena (headless) starting...");

    let mut args = std::env::args().skip(1);

    let tuning = match args.next().filter(|p| p != "-") {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load tuning from {}: {}; using defaults", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let frames = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Bad frame count {:?}; running {}", arg, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }),
        None => DEFAULT_FRAMES,
    };

    let mut session = Session::new(tuning);
    session.set_idle_mode(true);

    for frame in 0..frames {
        session.update(SIM_DT);

        for event in session.drain_events() {
            match event {
                GameEvent::UpgradePurchased(upgrade) => log::info!("Bought {}", upgrade.label()),
                GameEvent::AchievementUnlocked(a) => log::info!("Achievement: {}", a.title()),
                GameEvent::GameOver => log::info!("Game over after {} frames", frame + 1),
                _ => {}
            }
        }

        if frame % 600 == 0 {
            let snap = session.snapshot();
            log::info!(
                "frame {}: score {}, health {}, enemies {}",
                frame,
                snap.score,
                snap.health,
                snap.enemies.len()
            );
        }

        if session.state().is_over() {
            break;
        }
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
