//! Collaborator interfaces the engine consumes, with default adapters

pub mod dice;
pub mod hitloc;
pub mod stats;

pub use dice::{Dice, RollResult, ScriptedDice, SeededDice};
pub use hitloc::{HitLocations, HitlocCatalog, HitlocChart, HitlocTarget, LocationSeverity};
pub use stats::{ArmorStats, StatCatalog, StatLookup, StatValue, VehicleStats, WeaponStats};
