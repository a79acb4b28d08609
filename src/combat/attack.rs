//! Attack resolution
//!
//! An attack is an opposed roll: the attacker's weapon skill against the
//! defender's dodge (or weapon skill in melee). A hit then goes through hit
//! location, armor and damage in that order.

use crate::combat::context::CombatContext;
use crate::combat::outcome::Outcome;
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::{CombatantId, Stance};
use crate::ports::hitloc::HitlocTarget;

/// Weapon type defended with the defender's own weapon skill
pub const MELEE_WEAPON_TYPE: &str = "Melee";
/// Weapon type whose wounds are stun damage
pub const STUN_WEAPON_TYPE: &str = "Stun";

/// Result of the opposed attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMargin {
    Dodged,
    HitsCover,
    Hit { net_successes: u32 },
}

impl AttackMargin {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackMargin::Hit { .. })
    }
}

/// Percent chance cover stops an attack that won by `margin`
///
/// Zero at margin 0 and at or past the decisive margin.
pub fn cover_chance(margin: u32, config: &CombatConfig) -> u32 {
    if margin as i64 >= config.decisive_margin as i64 {
        return 0;
    }
    config.cover_chances.get(margin as usize).copied().unwrap_or(0)
}

impl CombatContext<'_> {
    /// Does cover absorb an attack that won by `margin`?
    pub fn stopped_by_cover(&mut self, margin: u32, attacker: CombatantId) -> bool {
        let chance = cover_chance(margin, &self.rules.config);
        if chance == 0 {
            return false;
        }

        let draw = self.dice.uniform_int(100);
        let stopped = draw < chance;
        tracing::debug!(
            "{} cover check: margin {}, {}% chance, drew {}: {}",
            self.session.get(attacker).map_or("?", |c| c.name.as_str()),
            margin,
            chance,
            draw,
            if stopped { "stopped" } else { "through" }
        );
        stopped
    }

    /// Roll the attacker's weapon skill against `target`
    pub fn roll_attack(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
        modifier: i32,
        called_shot: bool,
    ) -> Result<u32> {
        let config = &self.rules.config;
        let combatant = self.session.get(attacker)?;
        let skill = self.rules.stats.weapon_text(&combatant.weapon, "skill")?;
        let accuracy = self.rules.stats.weapon_int(&combatant.weapon, "accuracy")? as i32;

        let aim = if combatant.aim_target == Some(target) {
            config.aim_bonus
        } else {
            0
        };
        let called = if called_shot {
            config.called_shot_penalty
        } else {
            0
        };
        let stance = match combatant.stance {
            Stance::Aggressive => config.stance_modifiers.aggressive_attack,
            Stance::Evasive => config.stance_modifiers.evasive_attack,
            Stance::Normal | Stance::Cover => 0,
        };

        let total = modifier + accuracy - combatant.stress as i32
            + combatant.damage_dice_mod(&config.wound_modifiers)
            + aim
            - called
            + stance;

        Ok(combatant.roll_ability(&mut *self.dice, &skill, total))
    }

    /// Roll the defender's response to an attack made with `weapon`
    pub fn roll_defense(&mut self, defender: CombatantId, weapon: &str) -> Result<u32> {
        let config = &self.rules.config;
        let combatant = self.session.get(defender)?;
        if combatant.is_ko {
            return Ok(0);
        }

        let ability = if self.rules.stats.weapon_text(weapon, "weapon_type")? == MELEE_WEAPON_TYPE {
            self.rules.stats.weapon_text(&combatant.weapon, "skill")?
        } else {
            config.dodge_ability.clone()
        };
        let stance = match combatant.stance {
            Stance::Aggressive => config.stance_modifiers.aggressive_defense,
            Stance::Evasive => config.stance_modifiers.evasive_defense,
            Stance::Normal | Stance::Cover => 0,
        };
        let modifier = combatant.damage_dice_mod(&config.wound_modifiers) + stance;

        Ok(combatant.roll_ability(&mut *self.dice, &ability, modifier))
    }

    /// Opposed attack roll, including recoil and cover
    pub fn determine_attack_margin(
        &mut self,
        attacker: CombatantId,
        defender: CombatantId,
        modifier: i32,
        called_shot: Option<&str>,
    ) -> Result<AttackMargin> {
        let combatant = self.session.get(attacker)?;
        let recoil = combatant.recoil as i32;
        let weapon = combatant.weapon.clone();

        let attack = self.roll_attack(attacker, defender, modifier - recoil, called_shot.is_some())?;
        let defense = self.roll_defense(defender, &weapon)?;

        let result = if defense > attack {
            AttackMargin::Dodged
        } else {
            let margin = attack - defense;
            let in_cover = self.session.get(defender)?.stance == Stance::Cover;
            if in_cover && self.stopped_by_cover(margin, attacker) {
                AttackMargin::HitsCover
            } else {
                AttackMargin::Hit {
                    net_successes: margin,
                }
            }
        };

        tracing::debug!("Attack {} vs defense {}: {:?}", attack, defense, result);
        Ok(result)
    }

    /// Passengers can't be singled out; attacks on them land on the pilot
    fn redirect_to_pilot(&self, target: CombatantId) -> CombatantId {
        self.session
            .riding_in(target)
            .and_then(|vehicle| vehicle.pilot)
            .unwrap_or(target)
    }

    /// Attack a target with the attacker's current weapon
    ///
    /// # Arguments
    /// * `attacker` - Combatant making the attack
    /// * `target` - Intended target; passengers are redirected to their pilot
    /// * `modifier` - Dice added to the attack roll
    /// * `called_shot` - Location the attacker is aiming for
    /// * `crew_hit` - Whether this is shrapnel inside a vehicle
    ///
    /// # Returns
    /// Outcomes in the order they happened
    pub fn attack_target(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
        modifier: i32,
        called_shot: Option<&str>,
        crew_hit: bool,
    ) -> Result<Vec<Outcome>> {
        let target = self.redirect_to_pilot(target);
        let margin = self.determine_attack_margin(attacker, target, modifier, called_shot)?;

        let weapon = self.session.get(attacker)?.weapon.clone();
        let recoil = self.rules.stats.weapon_int(&weapon, "recoil")?.max(0) as u32;
        let combatant = self.session.get_mut(attacker)?;
        combatant.recoil = combatant.recoil.saturating_add(recoil);

        let attacker_name = self.name_of(attacker)?;
        match margin {
            AttackMargin::Dodged => Ok(vec![Outcome::AttackDodged {
                attacker: attacker_name,
                target: self.name_of(target)?,
            }]),
            AttackMargin::HitsCover => Ok(vec![Outcome::AttackHitsCover {
                attacker: attacker_name,
                target: self.name_of(target)?,
            }]),
            AttackMargin::Hit { net_successes } => self.resolve_attack(
                &attacker_name,
                target,
                &weapon,
                net_successes,
                called_shot,
                crew_hit,
            ),
        }
    }

    /// Apply a hit: location, armor, damage and crew spillover
    pub fn resolve_attack(
        &mut self,
        attacker_label: &str,
        target: CombatantId,
        weapon: &str,
        net_successes: u32,
        called_shot: Option<&str>,
        crew_hit: bool,
    ) -> Result<Vec<Outcome>> {
        let (personal_chart, vehicle_chart) = self.chart_names(target)?;
        let charts = HitlocTarget {
            personal_chart: &personal_chart,
            vehicle_chart: vehicle_chart.as_deref(),
        };
        let location = self.rules.hitlocs.determine_hitloc(
            &charts,
            net_successes,
            called_shot,
            crew_hit,
            self.rules.config.decisive_margin.max(0) as u32,
            &mut *self.dice,
        )?;
        let target_name = self.name_of(target)?;

        let armor = self.determine_armor(target, &location, weapon, net_successes)?;
        if armor >= self.rules.config.armor_stop_value {
            tracing::info!("{}'s {} hit on {} stopped by armor", attacker_label, weapon, target_name);
            return Ok(vec![Outcome::AttackStoppedByArmor {
                attacker: attacker_label.to_string(),
                target: target_name,
                location,
            }]);
        }

        let severity = self.determine_damage(target, &location, weapon, armor, crew_hit)?;
        let is_stun = self.rules.stats.weapon_text(weapon, "weapon_type")? == STUN_WEAPON_TYPE;

        let combatant = self.session.get_mut(target)?;
        combatant.inflict_damage(severity, format!("{weapon} - {location}"), is_stun, crew_hit);
        combatant.freshly_damaged = true;
        combatant.add_stress(1);

        tracing::info!(
            "{} hits {} in the {} with {}: {}",
            attacker_label,
            target_name,
            location,
            weapon,
            severity
        );

        let mut outcomes = vec![Outcome::AttackHits {
            attacker: attacker_label.to_string(),
            target: target_name,
            location: location.clone(),
            severity,
        }];
        // Shrapnel doesn't spray shrapnel
        if !crew_hit {
            outcomes.extend(self.resolve_possible_crew_hit(target, &location, severity)?);
        }
        Ok(outcomes)
    }
}
