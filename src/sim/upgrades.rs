//! Upgrade shop: score-gated purchases that change simulation parameters

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::error::PurchaseError;

/// Purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Unlocks shooting (one-time)
    Gun,
    Health,
    Speed,
    MaxProjectiles,
    MaxEnemies,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Gun,
        UpgradeKind::Health,
        UpgradeKind::Speed,
        UpgradeKind::MaxProjectiles,
        UpgradeKind::MaxEnemies,
    ];

    /// Stable identifier used by menus
    pub fn id(&self) -> &'static str {
        match self {
            UpgradeKind::Gun => "gun",
            UpgradeKind::Health => "health",
            UpgradeKind::Speed => "speed",
            UpgradeKind::MaxProjectiles => "max_projectiles",
            UpgradeKind::MaxEnemies => "max_enemies",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "gun" => Some(UpgradeKind::Gun),
            "health" => Some(UpgradeKind::Health),
            "speed" => Some(UpgradeKind::Speed),
            "max_projectiles" | "projectiles" => Some(UpgradeKind::MaxProjectiles),
            "max_enemies" | "enemies" => Some(UpgradeKind::MaxEnemies),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::Gun => "Gun",
            UpgradeKind::Health => "+Health",
            UpgradeKind::Speed => "+Speed",
            UpgradeKind::MaxProjectiles => "+Max Projectiles",
            UpgradeKind::MaxEnemies => "+Max Enemies",
        }
    }
}

impl GameState {
    /// Price of an upgrade under the current tuning
    pub fn upgrade_cost(&self, upgrade: UpgradeKind) -> u32 {
        let costs = &self.tuning.upgrades;
        match upgrade {
            UpgradeKind::Gun => costs.gun_cost,
            UpgradeKind::Health => costs.health_cost,
            UpgradeKind::Speed => costs.speed_cost,
            UpgradeKind::MaxProjectiles => costs.max_projectiles_cost,
            UpgradeKind::MaxEnemies => costs.max_enemies_cost,
        }
    }

    /// Whether the gun button should be enabled
    pub fn gun_upgrade_available(&self) -> bool {
        !self.character.has_gun && self.score >= self.upgrade_cost(UpgradeKind::Gun)
    }

    /// Buy an upgrade. On any error nothing changes.
    pub fn purchase(&mut self, upgrade: UpgradeKind) -> Result<(), PurchaseError> {
        if self.is_over() {
            return Err(PurchaseError::GameOver);
        }
        if upgrade == UpgradeKind::Gun && self.character.has_gun {
            return Err(PurchaseError::AlreadyOwned(upgrade));
        }
        let cost = self.upgrade_cost(upgrade);
        if self.score < cost {
            return Err(PurchaseError::InsufficientScore {
                upgrade,
                cost,
                score: self.score,
            });
        }

        self.score -= cost;
        let amounts = self.tuning.upgrades.clone();
        match upgrade {
            UpgradeKind::Gun => self.character.has_gun = true,
            UpgradeKind::Health => {
                let amount = amounts.health_amount;
                self.heal(amount);
            }
            UpgradeKind::Speed => self.character.base_speed += amounts.speed_amount,
            UpgradeKind::MaxProjectiles => self.max_projectiles += amounts.max_projectiles_amount,
            UpgradeKind::MaxEnemies => self.max_enemies += amounts.max_enemies_amount,
        }
        log::info!("Purchased {} for {} coins ({} left)", upgrade.label(), cost, self.score);
        self.events.push(GameEvent::UpgradePurchased(upgrade));
        Ok(())
    }

    /// Buy by menu identifier; unknown identifiers are rejected
    pub fn purchase_by_id(&mut self, id: &str) -> Result<(), PurchaseError> {
        let upgrade =
            UpgradeKind::from_id(id).ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;
        self.purchase(upgrade)
    }
}
