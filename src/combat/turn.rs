//! Turn boundary cleanup

use crate::combat::context::CombatContext;
use crate::core::error::Result;
use crate::core::types::CombatantId;

impl CombatContext<'_> {
    /// Clear per-turn state and run the turn's stress and knockout checks
    ///
    /// Knocked-out NPCs are removed from the session.
    pub fn reset_for_new_turn(&mut self, id: CombatantId) -> Result<()> {
        let still_subdued = self.session.is_subdued(id);

        let combatant = self.session.get_mut(id)?;
        combatant.posed = false;
        combatant.recoil = 0;
        if combatant.is_aiming() && !combatant.action.as_ref().is_some_and(|a| a.is_aim()) {
            tracing::debug!("{} stops aiming", combatant.name);
            combatant.aim_target = None;
        }
        if !still_subdued {
            combatant.subdued_by = None;
        }

        self.reset_stress(id)?;
        // Needs this turn's fresh damage, so runs before the flag is cleared
        self.check_for_knockout(id)?;

        let combatant = self.session.get_mut(id)?;
        combatant.freshly_damaged = false;

        if combatant.is_ko && combatant.is_npc {
            self.session.leave_combat(id)?;
        }
        Ok(())
    }
}
