//! Armor resolution
//!
//! The weapon's penetration dice race the armor's protection dice for the
//! hit location. A decisive win either way settles it; anything closer means
//! the armor only partly absorbs the hit.

use crate::combat::context::CombatContext;
use crate::core::error::Result;
use crate::core::types::CombatantId;

/// How a penetration contest came out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorContest {
    Penetrated,
    Stopped,
    Partial,
}

/// Judge a penetration contest from the two success counts
pub fn judge_contest(penetration: u32, protection: u32, decisive_margin: i32) -> ArmorContest {
    let diff = penetration as i32 - protection as i32;
    if diff >= decisive_margin {
        ArmorContest::Penetrated
    } else if -diff >= decisive_margin {
        ArmorContest::Stopped
    } else {
        ArmorContest::Partial
    }
}

impl CombatContext<'_> {
    /// Armor value for a hit: 0 is no help at all, the stop value stops it
    ///
    /// The attacker's net successes count as extra penetration successes.
    pub fn determine_armor(
        &mut self,
        target: CombatantId,
        location: &str,
        weapon: &str,
        attacker_net_successes: u32,
    ) -> Result<u32> {
        let Some(armor) = self.armor_worn(target)? else {
            return Ok(0);
        };

        let protection = self.rules.stats.armor_stat(&armor, "protection")?;
        let Some(&rating) = protection.as_table("protection")?.get(location) else {
            tracing::debug!("{} leaves the {} unprotected", armor, location);
            return Ok(0);
        };
        let penetration = self.rules.stats.weapon_int(weapon, "penetration")?;

        let pen_successes =
            self.dice.roll_dice(penetration as i32).successes + attacker_net_successes;
        let protect_successes = self.dice.roll_dice(rating as i32).successes;

        let config = &self.rules.config;
        let value = match judge_contest(pen_successes, protect_successes, config.decisive_margin) {
            ArmorContest::Penetrated => 0,
            ArmorContest::Stopped => config.armor_stop_value,
            ArmorContest::Partial => self.dice.uniform_int(config.armor_stop_value),
        };

        tracing::debug!(
            "{} vs {} at {}: {} penetration vs {} protection = {}",
            weapon,
            armor,
            location,
            pen_successes,
            protect_successes,
            value
        );

        Ok(value)
    }
}
