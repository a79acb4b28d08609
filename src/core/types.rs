//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for vehicles taking part in a combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub Uuid);

impl VehicleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for combat sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Fold the id into a single word, used to derive per-session RNG seeds
    pub fn seed_bits(&self) -> u64 {
        let (hi, lo) = self.0.as_u64_pair();
        hi ^ lo
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Team membership; combatants on different teams oppose each other
pub type TeamId = u32;

/// Turn counter within a single combat session
pub type Turn = u32;

/// How a combatant is positioned on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stance {
    #[default]
    Normal,
    /// Behind cover, attacks that get through may be absorbed by it
    Cover,
    /// All-out attack, easier to hit
    Aggressive,
    /// Focused on avoiding fire
    Evasive,
}
