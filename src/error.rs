//! Error types for the API edges
//!
//! Nothing inside the frame loop returns an error: gameplay failures (not
//! enough coins, a hit that drains health) are state changes, not faults.

use core::fmt;

use crate::sim::UpgradeKind;

/// Why a purchase was refused. State is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientScore {
        upgrade: UpgradeKind,
        cost: u32,
        score: u32,
    },
    AlreadyOwned(UpgradeKind),
    UnknownUpgrade(String),
    /// The run is over; only a reset is accepted
    GameOver,
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientScore {
                upgrade,
                cost,
                score,
            } => write!(f, "{} costs {} coins, have {}", upgrade.label(), cost, score),
            Self::AlreadyOwned(upgrade) => write!(f, "{} already owned", upgrade.label()),
            Self::UnknownUpgrade(id) => write!(f, "unknown upgrade id {id:?}"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Failure loading or validating a [`crate::Tuning`]
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning json: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_error_display() {
        let err = PurchaseError::InsufficientScore {
            upgrade: UpgradeKind::Gun,
            cost: 15,
            score: 3,
        };
        assert_eq!(err.to_string(), "Gun costs 15 coins, have 3");
        assert_eq!(
            PurchaseError::UnknownUpgrade("laser".into()).to_string(),
            "unknown upgrade id \"laser\""
        );
    }

    #[test]
    fn test_tuning_error_source() {
        use std::error::Error;

        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = TuningError::from(parse);
        assert!(err.source().is_some());

        let invalid = TuningError::Invalid {
            field: "enemy_speed",
            reason: "must be finite and >= 0",
        };
        assert!(invalid.source().is_none());
        assert!(invalid.to_string().contains("enemy_speed"));
    }
}
