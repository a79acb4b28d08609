//! Damage severity
//!
//! A hit that got past armor is graded by a percentile roll shifted by the
//! weapon's lethality, where it landed, and how much armor it went through.

use serde::{Deserialize, Serialize};

use crate::combat::context::CombatContext;
use crate::core::config::{CombatConfig, DamageBands};
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::ports::hitloc::{HitlocTarget, LocationSeverity};

/// Wound severity, least to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Graze,
    Flesh,
    Impair,
    Incap,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Graze => "GRAZE",
            Severity::Flesh => "FLESH",
            Severity::Impair => "IMPAIR",
            Severity::Incap => "INCAP",
        }
    }

    /// Band an adjusted damage roll falls into
    pub fn from_roll(adjusted: i32, bands: &DamageBands) -> Self {
        if adjusted <= bands.graze_max {
            Severity::Graze
        } else if adjusted <= bands.flesh_max {
            Severity::Flesh
        } else if adjusted <= bands.impair_max {
            Severity::Impair
        } else {
            Severity::Incap
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that shifts a damage roll besides the roll itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageInputs {
    pub lethality: i32,
    pub lethality_mod: i32,
    pub location: LocationSeverity,
    pub armor: u32,
}

/// Percentile roll after lethality, location and armor adjustments
pub fn adjusted_damage_roll(roll: u32, inputs: &DamageInputs, config: &CombatConfig) -> i32 {
    let deltas = &config.severity_deltas;
    let location_delta = match inputs.location {
        LocationSeverity::Normal => deltas.normal,
        LocationSeverity::Vital => deltas.vital,
        LocationSeverity::Critical => deltas.critical,
    };
    let armor_reduction = (inputs.armor * config.armor_reduction_percent / 100) as i32;

    roll as i32 + inputs.lethality + inputs.lethality_mod + location_delta - armor_reduction
}

impl CombatContext<'_> {
    /// Grade the wound from a hit that got past armor
    ///
    /// # Arguments
    /// * `target` - The combatant that was hit
    /// * `location` - Where the hit landed
    /// * `weapon` - Weapon that made the hit
    /// * `armor` - Value returned by armor resolution for this hit
    /// * `crew_hit` - Whether the hit is shrapnel inside a vehicle
    pub fn determine_damage(
        &mut self,
        target: CombatantId,
        location: &str,
        weapon: &str,
        armor: u32,
        crew_hit: bool,
    ) -> Result<Severity> {
        let (personal_chart, vehicle_chart) = self.chart_names(target)?;
        let charts = HitlocTarget {
            personal_chart: &personal_chart,
            vehicle_chart: vehicle_chart.as_deref(),
        };
        let location_severity = self.rules.hitlocs.severity(&charts, location, crew_hit)?;

        let inputs = DamageInputs {
            lethality: self.rules.stats.weapon_int(weapon, "lethality")? as i32,
            lethality_mod: self.session.get(target)?.lethality_mod,
            location: location_severity,
            armor,
        };

        let roll = self.dice.uniform_int(100);
        let adjusted = adjusted_damage_roll(roll, &inputs, &self.rules.config);
        let severity = Severity::from_roll(adjusted, &self.rules.config.damage_bands);

        tracing::debug!(
            "Damage roll {} -> {} ({:?} location, armor {}) = {}",
            roll,
            adjusted,
            location_severity,
            armor,
            severity
        );

        Ok(severity)
    }
}
