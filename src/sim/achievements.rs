//! Achievements, evaluated every frame and unlocked at most once

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    CoinCollector,
    Survivor,
    IronMan,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::CoinCollector => "Coin Collector: Collect 50 Coins",
            Achievement::Survivor => "Survivor: Defeat All Enemies",
            Achievement::IronMan => "Iron Man: Maintain Full Health",
        }
    }
}

impl GameState {
    /// Record an achievement. Returns false if it was already unlocked.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.achievements.contains(&achievement) {
            return false;
        }
        self.achievements.push(achievement);
        log::info!("Achievement unlocked: {}", achievement.title());
        self.events.push(GameEvent::AchievementUnlocked(achievement));
        true
    }
}

pub fn check_achievements(state: &mut GameState) {
    if state.score >= state.tuning.coin_collector_threshold {
        state.unlock(Achievement::CoinCollector);
    }
    if state.enemies.is_empty() {
        state.unlock(Achievement::Survivor);
    }
    if state.health == state.tuning.max_health {
        state.unlock(Achievement::IronMan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_unlock_is_idempotent() {
        let mut state = GameState::with_seed(Tuning::default(), 1);
        assert!(state.unlock(Achievement::Survivor));
        assert!(!state.unlock(Achievement::Survivor));
        assert_eq!(state.achievements, vec![Achievement::Survivor]);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_check_achievements() {
        let mut state = GameState::with_seed(Tuning::default(), 1);
        check_achievements(&mut state);
        // full health at start, enemies alive, no coins yet
        assert_eq!(state.achievements, vec![Achievement::IronMan]);

        state.score = 50;
        state.enemies.clear();
        check_achievements(&mut state);
        check_achievements(&mut state);
        assert_eq!(
            state.achievements,
            vec![Achievement::IronMan, Achievement::CoinCollector, Achievement::Survivor]
        );
        assert_eq!(state.events.len(), 3);
    }
}
