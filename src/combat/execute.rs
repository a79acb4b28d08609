//! Resolving queued actions

use crate::combat::action::Action;
use crate::combat::context::CombatContext;
use crate::combat::outcome::Outcome;
use crate::core::error::Result;
use crate::core::types::CombatantId;

impl CombatContext<'_> {
    /// Resolve whatever the combatant has queued
    ///
    /// Knocked-out combatants and combatants with nothing queued do nothing.
    pub fn resolve_action(&mut self, id: CombatantId) -> Result<Vec<Outcome>> {
        let combatant = self.session.get(id)?;
        if combatant.is_ko {
            return Ok(Vec::new());
        }
        let Some(action) = combatant.action.clone() else {
            return Ok(Vec::new());
        };
        let actor = combatant.name.clone();

        if action.uses_ammo() && !self.spend_ammo(id)? {
            tracing::info!("{} is out of ammo", actor);
            return Ok(vec![Outcome::OutOfAmmo { actor }]);
        }

        let outcomes = match &action {
            Action::Aim { target } => {
                self.session.get_mut(id)?.aim_target = Some(*target);
                vec![Outcome::Aiming {
                    actor,
                    target: self.name_of(*target)?,
                }]
            }
            Action::Attack {
                target,
                called_shot,
                modifier,
            } => self.attack_target(id, *target, *modifier, called_shot.as_deref(), false)?,
            Action::Explode { target } => self.attack_target(id, *target, 0, None, false)?,
            Action::Suppress { target } => self.suppress(id, *target)?,
            Action::Reload => self.reload(id)?,
            Action::Escape => self.escape(id)?,
        };

        if action.is_single_shot() {
            self.session.get_mut(id)?.action = None;
        }
        Ok(outcomes)
    }

    /// Spend one round; false when the weapon is dry
    fn spend_ammo(&mut self, id: CombatantId) -> Result<bool> {
        let combatant = self.session.get_mut(id)?;
        match combatant.ammo {
            None => Ok(true),
            Some(0) => Ok(false),
            Some(rounds) => {
                combatant.ammo = Some(rounds - 1);
                Ok(true)
            }
        }
    }

    fn reload(&mut self, id: CombatantId) -> Result<Vec<Outcome>> {
        let weapon = self.session.get(id)?.weapon.clone();
        let capacity = self.rules.stats.weapon_int(&weapon, "ammo")?;

        let combatant = self.session.get_mut(id)?;
        combatant.ammo = (capacity > 0).then_some(capacity as u32);
        Ok(vec![Outcome::Reloaded {
            actor: combatant.name.clone(),
        }])
    }

    /// Opposed escape roll against whoever holds the combatant
    fn escape(&mut self, id: CombatantId) -> Result<Vec<Outcome>> {
        let subdued_by = self.session.get(id)?.subdued_by;
        let subduer = match subdued_by {
            Some(subduer) if self.session.is_subdued(id) => subduer,
            _ => {
                let combatant = self.session.get_mut(id)?;
                combatant.subdued_by = None;
                return Ok(vec![Outcome::NotSubdued {
                    actor: combatant.name.clone(),
                }]);
            }
        };

        let config = &self.rules.config;
        let combatant = self.session.get(id)?;
        let holder = self.session.get(subduer)?;
        let struggle = combatant.roll_ability(
            &mut *self.dice,
            &config.escape_ability,
            combatant.damage_dice_mod(&config.wound_modifiers),
        );
        let hold = holder.roll_ability(
            &mut *self.dice,
            &config.escape_ability,
            holder.damage_dice_mod(&config.wound_modifiers),
        );
        let actor = combatant.name.clone();
        let subduer_name = holder.name.clone();

        if struggle > hold {
            self.session.get_mut(id)?.subdued_by = None;
            tracing::info!("{} escapes from {}", actor, subduer_name);
            Ok(vec![Outcome::Escaped {
                actor,
                subduer: subduer_name,
            }])
        } else {
            Ok(vec![Outcome::EscapeFailed {
                actor,
                subduer: subduer_name,
            }])
        }
    }

    /// Attack roll against the target's composure; a win adds stress
    fn suppress(&mut self, id: CombatantId, target: CombatantId) -> Result<Vec<Outcome>> {
        let attack = self.roll_attack(id, target, 0, false)?;

        let config = &self.rules.config;
        let defender = self.session.get(target)?;
        let composure = defender.roll_ability(
            &mut *self.dice,
            &config.composure_ability,
            defender.damage_dice_mod(&config.wound_modifiers),
        );

        let actor = self.name_of(id)?;
        let target_name = self.name_of(target)?;
        if attack > composure {
            let stress = config.suppress_stress;
            self.session.get_mut(target)?.add_stress(stress);
            Ok(vec![Outcome::Suppressed {
                actor,
                target: target_name,
            }])
        } else {
            Ok(vec![Outcome::SuppressionResisted {
                actor,
                target: target_name,
            }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::fixtures::{duel, rules};
    use crate::ports::dice::ScriptedDice;

    #[test]
    fn test_knocked_out_does_nothing() {
        let rules = rules();
        let (mut session, a, b) = duel();
        {
            let ann = session.get_mut(a).unwrap();
            ann.is_ko = true;
            ann.action = Some(Action::attack(b));
        }
        let mut dice = ScriptedDice::new();
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();
        assert!(outcomes.is_empty());
        assert!(dice.pools.is_empty());
        assert_eq!(session.get(a).unwrap().ammo, Some(6));
    }

    #[test]
    fn test_aim_sets_target() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().action = Some(Action::Aim { target: b });

        let mut dice = ScriptedDice::new();
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();
        assert_eq!(outcomes[0].key(), "combat.aiming");
        let ann = session.get(a).unwrap();
        assert_eq!(ann.aim_target, Some(b));
        assert_eq!(ann.action, Some(Action::Aim { target: b }));
    }

    #[test]
    fn test_attack_spends_ammo() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().action = Some(Action::attack(b));

        let mut dice = ScriptedDice::new().with_successes([0, 1]);
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();
        assert_eq!(outcomes[0].key(), "combat.attack_dodged");
        assert_eq!(session.get(a).unwrap().ammo, Some(5));
    }

    #[test]
    fn test_dry_weapon_cannot_attack() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().ammo = Some(0);
        session.get_mut(a).unwrap().action = Some(Action::attack(b));

        let mut dice = ScriptedDice::new();
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();
        assert_eq!(outcomes, vec![Outcome::OutOfAmmo { actor: "Ann".into() }]);
        assert!(dice.pools.is_empty());
    }

    #[test]
    fn test_reload_fills_and_clears() {
        let rules = rules();
        let (mut session, a, _) = duel();
        session.get_mut(a).unwrap().ammo = Some(0);
        session.get_mut(a).unwrap().action = Some(Action::Reload);

        let mut dice = ScriptedDice::new();
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();
        assert_eq!(outcomes[0].key(), "combat.reloaded");
        let ann = session.get(a).unwrap();
        assert_eq!(ann.ammo, Some(6));
        assert_eq!(ann.action, None);
    }

    #[test]
    fn test_escape() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().subdued_by = Some(b);
        session.get_mut(a).unwrap().action = Some(Action::Escape);

        let mut dice = ScriptedDice::new().with_successes([1, 1, 2, 0]);
        let mut ctx = CombatContext::new(&mut session, &mut dice, &rules);
        let outcomes = ctx.resolve_action(a).unwrap();
        assert_eq!(outcomes[0].key(), "combat.escape_failed");
        assert_eq!(ctx.session.get(a).unwrap().subdued_by, Some(b));
        assert_eq!(ctx.session.get(a).unwrap().action, None);

        ctx.session.get_mut(a).unwrap().action = Some(Action::Escape);
        let outcomes = ctx.resolve_action(a).unwrap();
        assert_eq!(outcomes[0].key(), "combat.escaped");
        assert_eq!(ctx.session.get(a).unwrap().subdued_by, None);
    }

    #[test]
    fn test_escape_without_holder_reports_it() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().subdued_by = Some(b);
        session.get_mut(b).unwrap().is_ko = true;
        session.get_mut(a).unwrap().action = Some(Action::Escape);

        let mut dice = ScriptedDice::new();
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();

        assert_eq!(outcomes, vec![Outcome::NotSubdued { actor: "Ann".into() }]);
        assert!(dice.pools.is_empty());
        let ann = session.get(a).unwrap();
        assert_eq!(ann.subdued_by, None);
        assert_eq!(ann.action, None);
    }

    #[test]
    fn test_suppress_adds_stress() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().weapon = "MG".into();
        session.get_mut(a).unwrap().action = Some(Action::Suppress { target: b });

        let mut dice = ScriptedDice::new().with_successes([3, 1, 1, 1]);
        let mut ctx = CombatContext::new(&mut session, &mut dice, &rules);
        let outcomes = ctx.resolve_action(a).unwrap();
        assert_eq!(outcomes[0].key(), "combat.suppressed");
        assert_eq!(ctx.session.get(b).unwrap().stress, 1);

        let outcomes = ctx.resolve_action(a).unwrap();
        assert_eq!(outcomes[0].key(), "combat.suppression_resisted");
        assert_eq!(ctx.session.get(b).unwrap().stress, 1);
    }

    #[test]
    fn test_explode_attacks_target() {
        let rules = rules();
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().weapon = "Grenade".into();
        session.get_mut(a).unwrap().ammo = Some(1);
        session.get_mut(a).unwrap().action = Some(Action::Explode { target: b });

        let mut dice = ScriptedDice::new().with_successes([2, 0]).with_uniform([0, 50]);
        let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
            .resolve_action(a)
            .unwrap();
        assert!(outcomes[0].is_hit());
        assert_eq!(session.get(a).unwrap().ammo, Some(0));
        assert_eq!(session.get(b).unwrap().wounds[0].description, "Grenade - Abdomen");
    }
}
