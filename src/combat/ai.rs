//! Action selection for unattended combatants
//!
//! Priority order, first match wins: reload when dry, struggle when held,
//! otherwise pick a random conscious enemy and use the weapon the way it is
//! meant to be used.

use crate::combat::action::Action;
use crate::combat::context::CombatContext;
use crate::core::error::Result;
use crate::core::types::CombatantId;

/// Weapon type that queues Explode
pub const EXPLOSIVE_WEAPON_TYPE: &str = "Explosive";
/// Weapon type that queues Suppress
pub const SUPPRESSIVE_WEAPON_TYPE: &str = "Suppressive";

impl CombatContext<'_> {
    /// Whether the combatant has at least `rounds` left
    pub fn check_ammo(&self, id: CombatantId, rounds: u32) -> Result<bool> {
        Ok(self.session.get(id)?.ammo.map_or(true, |ammo| ammo >= rounds))
    }

    /// Choose and queue an action; `None` when there's nobody to fight
    pub fn choose_action(&mut self, id: CombatantId) -> Result<Option<Action>> {
        let action = if !self.check_ammo(id, 1)? {
            Action::Reload
        } else if self.session.is_subdued(id) {
            Action::Escape
        } else {
            let combatant = self.session.get(id)?;
            let enemies: Vec<CombatantId> = self
                .session
                .active_combatants()
                .into_iter()
                .filter(|c| c.team != combatant.team)
                .map(|c| c.id)
                .collect();
            if enemies.is_empty() {
                tracing::debug!("{} has nobody to fight", combatant.name);
                return Ok(None);
            }

            let weapon_type = self.rules.stats.weapon_text(&combatant.weapon, "weapon_type")?;
            let target = enemies[self.dice.uniform_int(enemies.len() as u32) as usize];
            match weapon_type.as_str() {
                EXPLOSIVE_WEAPON_TYPE => Action::Explode { target },
                SUPPRESSIVE_WEAPON_TYPE => Action::Suppress { target },
                _ => Action::attack(target),
            }
        };

        let combatant = self.session.get_mut(id)?;
        tracing::debug!("AI queues {:?} for {}", action, combatant.name);
        combatant.action = Some(action.clone());
        Ok(Some(action))
    }
}
