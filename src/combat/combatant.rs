//! Combatant and vehicle records
//!
//! Records are owned by the combat session. Relationships between them
//! (vehicle occupancy, subduer, aim target) are stored as ids, never as
//! owned references.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::action::Action;
use crate::combat::damage::Severity;
use crate::core::config::WoundModifiers;
use crate::core::types::{CombatantId, Stance, TeamId, VehicleId};
use crate::ports::dice::Dice;

/// Chart used for combatants that don't name one
pub const DEFAULT_HITLOC_CHART: &str = "Humanoid";

/// A wound received in this combat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wound {
    pub severity: Severity,
    /// e.g. "Rifle - Chest"
    pub description: String,
    pub is_stun: bool,
    pub crew_hit: bool,
}

/// Anyone taking part in a combat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: TeamId,
    /// Non-player characters are driven by the AI and leave when knocked out
    pub is_npc: bool,
    pub weapon: String,
    pub armor: Option<String>,
    /// Vehicle this combatant is piloting or riding in
    pub vehicle: Option<VehicleId>,
    pub hitloc_chart: String,
    pub abilities: AHashMap<String, i32>,
    pub stance: Stance,
    /// Dice lost to recoil this turn
    pub recoil: u32,
    pub stress: u32,
    pub is_ko: bool,
    pub subdued_by: Option<CombatantId>,
    pub aim_target: Option<CombatantId>,
    pub freshly_damaged: bool,
    pub posed: bool,
    pub action: Option<Action>,
    /// Rounds left; `None` for weapons that don't use ammunition
    pub ammo: Option<u32>,
    /// Added to damage rolls against this combatant
    pub lethality_mod: i32,
    pub wounds: Vec<Wound>,
}

impl Combatant {
    pub fn new(name: &str, team: TeamId, weapon: &str) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.to_string(),
            team,
            is_npc: false,
            weapon: weapon.to_string(),
            armor: None,
            vehicle: None,
            hitloc_chart: DEFAULT_HITLOC_CHART.to_string(),
            abilities: AHashMap::new(),
            stance: Stance::Normal,
            recoil: 0,
            stress: 0,
            is_ko: false,
            subdued_by: None,
            aim_target: None,
            freshly_damaged: false,
            posed: false,
            action: None,
            ammo: None,
            lethality_mod: 0,
            wounds: Vec::new(),
        }
    }

    /// Mark as AI-controlled
    pub fn npc(mut self) -> Self {
        self.is_npc = true;
        self
    }

    pub fn with_armor(mut self, armor: &str) -> Self {
        self.armor = Some(armor.to_string());
        self
    }

    pub fn with_ability(mut self, ability: &str, rating: i32) -> Self {
        self.abilities.insert(ability.to_string(), rating);
        self
    }

    pub fn with_ammo(mut self, rounds: u32) -> Self {
        self.ammo = Some(rounds);
        self
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = stance;
        self
    }

    /// Untrained abilities rate 0
    pub fn ability_rating(&self, ability: &str) -> i32 {
        self.abilities.get(ability).copied().unwrap_or(0)
    }

    /// Roll an ability with a dice modifier, returning the success count
    pub fn roll_ability(&self, dice: &mut dyn Dice, ability: &str, modifier: i32) -> u32 {
        let pool = self.ability_rating(ability) + modifier;
        let successes = dice.roll_dice(pool).successes;
        tracing::debug!(
            "{} rolls {} ({} dice): {} successes",
            self.name,
            ability,
            pool,
            successes
        );
        successes
    }

    pub fn is_aiming(&self) -> bool {
        self.aim_target.is_some()
    }

    pub fn add_stress(&mut self, points: u32) {
        self.stress = self.stress.saturating_add(points);
    }

    pub fn inflict_damage(
        &mut self,
        severity: Severity,
        description: String,
        is_stun: bool,
        crew_hit: bool,
    ) {
        self.wounds.push(Wound {
            severity,
            description,
            is_stun,
            crew_hit,
        });
    }

    /// Sum of wound penalties; zero when unhurt, more negative as wounds pile up
    pub fn total_damage_mod(&self, modifiers: &WoundModifiers) -> f64 {
        self.wounds
            .iter()
            .map(|w| match w.severity {
                Severity::Graze => modifiers.graze,
                Severity::Flesh => modifiers.flesh,
                Severity::Impair => modifiers.impair,
                Severity::Incap => modifiers.incap,
            })
            .sum()
    }

    /// Damage modifier as whole dice, rounded against the combatant
    pub fn damage_dice_mod(&self, modifiers: &WoundModifiers) -> i32 {
        self.total_damage_mod(modifiers).floor() as i32
    }
}

/// A vehicle in the combat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Looked up in the stat catalog for toughness, armor and hit locations
    pub vehicle_type: String,
    pub pilot: Option<CombatantId>,
    pub passengers: Vec<CombatantId>,
}

impl Vehicle {
    pub fn new(vehicle_type: &str) -> Self {
        Self {
            id: VehicleId::new(),
            vehicle_type: vehicle_type.to_string(),
            pilot: None,
            passengers: Vec::new(),
        }
    }

    /// Passengers first, then the pilot
    pub fn occupants(&self) -> Vec<CombatantId> {
        let mut occupants = self.passengers.clone();
        occupants.extend(self.pilot);
        occupants
    }

    pub fn is_passenger(&self, id: CombatantId) -> bool {
        self.passengers.contains(&id)
    }
}
