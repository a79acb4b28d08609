//! Combat configuration with documented constants
//!
//! Every tunable number used by the resolution engine lives here. Values
//! load from TOML; any field left out of a file keeps its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SkirmishError};

/// Roll adjustments applied by hit location severity class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityDeltas {
    /// Limbs and other non-vital locations
    pub normal: i32,
    /// Torso, abdomen and similar
    pub vital: i32,
    /// Head, neck, fuel tanks
    pub critical: i32,
}

impl Default for SeverityDeltas {
    fn default() -> Self {
        Self {
            normal: -10,
            vital: 0,
            critical: 20,
        }
    }
}

/// Upper bounds (inclusive) of each damage band on the adjusted roll
///
/// Anything above `impair_max` is incapacitating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageBands {
    pub graze_max: i32,
    pub flesh_max: i32,
    pub impair_max: i32,
}

impl Default for DamageBands {
    fn default() -> Self {
        Self {
            graze_max: 30,
            flesh_max: 69,
            impair_max: 99,
        }
    }
}

/// Dice modifier each wound contributes to a combatant's damage modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WoundModifiers {
    pub graze: f64,
    pub flesh: f64,
    pub impair: f64,
    pub incap: f64,
}

impl Default for WoundModifiers {
    fn default() -> Self {
        Self {
            graze: -0.1,
            flesh: -0.5,
            impair: -1.0,
            incap: -2.0,
        }
    }
}

/// Attack and defense dice modifiers granted by stance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceModifiers {
    pub aggressive_attack: i32,
    pub aggressive_defense: i32,
    pub evasive_attack: i32,
    pub evasive_defense: i32,
}

impl Default for StanceModifiers {
    fn default() -> Self {
        Self {
            aggressive_attack: 1,
            aggressive_defense: -1,
            evasive_attack: -1,
            evasive_defense: 1,
        }
    }
}

/// Configuration for the combat resolution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === ABILITIES ===
    /// Ability rolled for stress recovery and personal knockout saves
    pub composure_ability: String,

    /// Ability rolled to dodge ranged and explosive attacks
    pub dodge_ability: String,

    /// Ability rolled by both sides when a subdued combatant tries to escape
    pub escape_ability: String,

    // === CONSCIOUSNESS ===
    /// Extra dice player characters get on knockout saves
    pub pc_knockout_bonus: i32,

    /// Damage modifier at or below which fresh damage forces a knockout save
    pub knockout_damage_threshold: f64,

    // === COVER ===
    /// Percent chance that cover absorbs a hit, indexed by attack margin
    ///
    /// Margins at or past the end of the table (and never less than the
    /// decisive margin) always get through.
    pub cover_chances: Vec<u32>,

    // === ARMOR ===
    /// Success difference that counts as an unambiguous win
    pub decisive_margin: i32,

    /// Value returned by armor resolution when the attack is fully stopped
    pub armor_stop_value: u32,

    // === DAMAGE ===
    pub severity_deltas: SeverityDeltas,

    /// Percent of the armor value subtracted from the damage roll
    pub armor_reduction_percent: u32,

    pub damage_bands: DamageBands,

    pub wound_modifiers: WoundModifiers,

    // === ATTACKS ===
    /// Dice added when attacking the combatant being aimed at
    pub aim_bonus: i32,

    /// Dice removed from an attack roll that calls a location
    pub called_shot_penalty: i32,

    pub stance_modifiers: StanceModifiers,

    /// Stress inflicted by a successful suppression
    pub suppress_stress: u32,

    // === CREW HITS ===
    /// Weapon used for secondary hits on vehicle occupants
    pub shrapnel_weapon: String,

    /// Upper bound of shrapnel hits each occupant takes (at least one)
    pub shrapnel_hits_per_occupant: u32,

    /// Attacker name reported on crew hit outcomes
    pub crew_hit_label: String,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            composure_ability: "Composure".to_string(),
            dodge_ability: "Reaction".to_string(),
            escape_ability: "Athletics".to_string(),

            pc_knockout_bonus: 1,
            knockout_damage_threshold: -1.0,

            // Bigger margins punch through more often
            cover_chances: vec![0, 50, 25],

            decisive_margin: 3,
            armor_stop_value: 100,

            severity_deltas: SeverityDeltas::default(),
            armor_reduction_percent: 50,
            damage_bands: DamageBands::default(),
            wound_modifiers: WoundModifiers::default(),

            aim_bonus: 3,
            called_shot_penalty: 2,
            stance_modifiers: StanceModifiers::default(),
            suppress_stress: 1,

            shrapnel_weapon: "Shrapnel".to_string(),
            shrapnel_hits_per_occupant: 1,
            crew_hit_label: "Crew hit".to_string(),
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate().map_err(SkirmishError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.decisive_margin < 1 {
            return Err(format!(
                "decisive_margin ({}) must be at least 1",
                self.decisive_margin
            ));
        }

        if self.cover_chances.first().copied().unwrap_or(0) != 0 {
            return Err("cover_chances[0] must be 0: a zero margin never hits cover".into());
        }

        if self.cover_chances.len() > self.decisive_margin as usize {
            return Err(format!(
                "cover_chances has {} entries but margins of {} or more always bypass cover",
                self.cover_chances.len(),
                self.decisive_margin
            ));
        }

        if self.cover_chances.iter().any(|&c| c > 100) {
            return Err("cover_chances are percentages and must not exceed 100".into());
        }

        let bands = &self.damage_bands;
        if !(bands.graze_max < bands.flesh_max && bands.flesh_max < bands.impair_max) {
            return Err(format!(
                "damage bands must increase: graze_max ({}) < flesh_max ({}) < impair_max ({})",
                bands.graze_max, bands.flesh_max, bands.impair_max
            ));
        }

        let deltas = &self.severity_deltas;
        if !(deltas.normal <= deltas.vital && deltas.vital <= deltas.critical) {
            return Err(format!(
                "severity deltas must not decrease: normal ({}) <= vital ({}) <= critical ({})",
                deltas.normal, deltas.vital, deltas.critical
            ));
        }

        if self.armor_stop_value == 0 {
            return Err("armor_stop_value must be positive".into());
        }

        if self.shrapnel_hits_per_occupant == 0 {
            return Err("shrapnel_hits_per_occupant must be at least 1".into());
        }

        Ok(())
    }
}
