use thiserror::Error;

use crate::core::types::{CombatantId, VehicleId};

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("Combatant not found: {0:?}")]
    CombatantNotFound(CombatantId),

    #[error("Vehicle not found: {0:?}")]
    VehicleNotFound(VehicleId),

    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    #[error("Unknown armor: {0}")]
    UnknownArmor(String),

    #[error("Unknown vehicle type: {0}")]
    UnknownVehicleType(String),

    #[error("Unknown {kind} stat '{stat}' requested for {id}")]
    UnknownStat {
        kind: &'static str,
        id: String,
        stat: String,
    },

    #[error("Stat '{stat}' is not {expected}")]
    StatType {
        stat: String,
        expected: &'static str,
    },

    #[error("Unknown hit location chart: {0}")]
    UnknownHitlocChart(String),

    #[error("Hit location chart has no locations: {0}")]
    EmptyHitlocChart(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
