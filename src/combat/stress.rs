//! Stress recovery and consciousness
//!
//! Stress bleeds off at the start of each turn. Fresh damage that pushes a
//! combatant's damage modifier past the threshold forces a knockout save;
//! anyone knocked out gets a save each turn to come around.

use crate::combat::context::CombatContext;
use crate::combat::session::CombatEventKind;
use crate::core::error::Result;
use crate::core::types::CombatantId;

impl CombatContext<'_> {
    /// Shed stress: one point plus one per composure success
    pub fn reset_stress(&mut self, id: CombatantId) -> Result<()> {
        let combatant = self.session.get(id)?;
        let successes =
            combatant.roll_ability(&mut *self.dice, &self.rules.config.composure_ability, 0);
        let stress = combatant.stress.saturating_sub(1 + successes);

        self.session.get_mut(id)?.stress = stress;
        Ok(())
    }

    /// Knock out a freshly hurt combatant who fails their save
    pub fn check_for_knockout(&mut self, id: CombatantId) -> Result<()> {
        let combatant = self.session.get(id)?;
        if combatant.is_ko || !combatant.freshly_damaged {
            return Ok(());
        }
        let damage_mod = combatant.total_damage_mod(&self.rules.config.wound_modifiers);
        if damage_mod > self.rules.config.knockout_damage_threshold {
            return Ok(());
        }

        let successes = self.make_knockout_roll(id)?;
        if successes == 0 {
            let combatant = self.session.get_mut(id)?;
            combatant.is_ko = true;
            combatant.action = None;
            self.session.emit(CombatEventKind::KnockedOut, id);
        }
        Ok(())
    }

    /// Give a knocked-out combatant a chance to wake up
    pub fn check_for_unknockout(&mut self, id: CombatantId) -> Result<()> {
        let combatant = self.session.get(id)?;
        if !combatant.is_ko {
            return Ok(());
        }

        let successes = self.make_knockout_roll(id)?;
        if successes > 0 {
            self.session.get_mut(id)?.is_ko = false;
            self.session.emit(CombatEventKind::Recovered, id);
        }
        Ok(())
    }

    /// Roll a consciousness save, returning the success count
    ///
    /// Inside a vehicle the vehicle's toughness carries the save. On foot the
    /// combatant rolls composure, with player characters getting bonus dice.
    pub fn make_knockout_roll(&mut self, id: CombatantId) -> Result<u32> {
        let config = &self.rules.config;
        let combatant = self.session.get(id)?;
        let damage_dice = combatant.damage_dice_mod(&config.wound_modifiers);

        if let Some(vehicle_id) = combatant.vehicle {
            let vehicle = self.session.vehicle(vehicle_id)?;
            let toughness = self.rules.stats.vehicle_int(&vehicle.vehicle_type, "toughness")?;
            let pool = toughness as i32 + damage_dice;
            let successes = self.dice.roll_dice(pool).successes;
            tracing::debug!(
                "{} knockout save in {} ({} dice): {}",
                combatant.name,
                vehicle.vehicle_type,
                pool,
                successes
            );
            return Ok(successes);
        }

        let bonus = if combatant.is_npc {
            0
        } else {
            config.pc_knockout_bonus
        };
        Ok(combatant.roll_ability(&mut *self.dice, &config.composure_ability, damage_dice + bonus))
    }
}
