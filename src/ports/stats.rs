//! Stat lookup port for weapons, armor and vehicles
//!
//! The engine asks for stats by name, e.g. `weapon_stat("Rifle", "lethality")`.
//! [`StatCatalog`] is the TOML-backed implementation shipped with the crate.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SkirmishError};

/// A single stat value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Text(String),
    /// Keyed ratings, e.g. armor protection per hit location
    Table(BTreeMap<String, i64>),
}

impl StatValue {
    pub fn as_int(&self, stat: &str) -> Result<i64> {
        match self {
            StatValue::Int(v) => Ok(*v),
            _ => Err(SkirmishError::StatType {
                stat: stat.to_string(),
                expected: "an integer",
            }),
        }
    }

    pub fn as_text(&self, stat: &str) -> Result<&str> {
        match self {
            StatValue::Text(v) => Ok(v),
            _ => Err(SkirmishError::StatType {
                stat: stat.to_string(),
                expected: "text",
            }),
        }
    }

    pub fn as_table(&self, stat: &str) -> Result<&BTreeMap<String, i64>> {
        match self {
            StatValue::Table(v) => Ok(v),
            _ => Err(SkirmishError::StatType {
                stat: stat.to_string(),
                expected: "a table",
            }),
        }
    }
}

/// Named stat lookup for weapons, armor and vehicle types
pub trait StatLookup: Send + Sync {
    fn weapon_stat(&self, weapon: &str, stat: &str) -> Result<StatValue>;

    fn armor_stat(&self, armor: &str, stat: &str) -> Result<StatValue>;

    fn vehicle_stat(&self, vehicle_type: &str, stat: &str) -> Result<StatValue>;

    fn weapon_int(&self, weapon: &str, stat: &str) -> Result<i64> {
        self.weapon_stat(weapon, stat)?.as_int(stat)
    }

    fn weapon_text(&self, weapon: &str, stat: &str) -> Result<String> {
        Ok(self.weapon_stat(weapon, stat)?.as_text(stat)?.to_string())
    }

    fn vehicle_int(&self, vehicle_type: &str, stat: &str) -> Result<i64> {
        self.vehicle_stat(vehicle_type, stat)?.as_int(stat)
    }
}

/// Weapon stats as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Ability rolled to attack with this weapon
    pub skill: String,
    /// "Melee", "Ranged", "Explosive", "Suppressive", "Stun", ...
    pub weapon_type: String,
    #[serde(default)]
    pub lethality: i64,
    #[serde(default)]
    pub penetration: i64,
    #[serde(default)]
    pub recoil: i64,
    #[serde(default)]
    pub accuracy: i64,
    /// Rounds per reload; 0 for weapons without ammunition
    #[serde(default)]
    pub ammo: i64,
}

impl WeaponStats {
    pub fn new(skill: &str, weapon_type: &str) -> Self {
        Self {
            skill: skill.to_string(),
            weapon_type: weapon_type.to_string(),
            lethality: 0,
            penetration: 0,
            recoil: 0,
            accuracy: 0,
            ammo: 0,
        }
    }
}

/// Armor stats as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorStats {
    /// Protection rating per hit location; unlisted locations are unprotected
    #[serde(default)]
    pub protection: BTreeMap<String, i64>,
}

impl ArmorStats {
    pub fn protecting(locations: &[(&str, i64)]) -> Self {
        Self {
            protection: locations
                .iter()
                .map(|(loc, rating)| (loc.to_string(), *rating))
                .collect(),
        }
    }
}

/// Vehicle type stats as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleStats {
    pub toughness: i64,
    /// Armor entry protecting the vehicle and everyone inside
    pub armor: String,
    /// Hit location chart used for attacks on the vehicle
    pub hitloc_chart: String,
}

/// TOML-backed stat tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatCatalog {
    #[serde(default)]
    pub weapons: AHashMap<String, WeaponStats>,
    #[serde(default)]
    pub armor: AHashMap<String, ArmorStats>,
    #[serde(default)]
    pub vehicles: AHashMap<String, VehicleStats>,
}

impl StatCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_weapon(mut self, name: &str, stats: WeaponStats) -> Self {
        self.weapons.insert(name.to_string(), stats);
        self
    }

    pub fn with_armor(mut self, name: &str, stats: ArmorStats) -> Self {
        self.armor.insert(name.to_string(), stats);
        self
    }

    pub fn with_vehicle(mut self, name: &str, stats: VehicleStats) -> Self {
        self.vehicles.insert(name.to_string(), stats);
        self
    }

    fn unknown_stat(kind: &'static str, id: &str, stat: &str) -> SkirmishError {
        SkirmishError::UnknownStat {
            kind,
            id: id.to_string(),
            stat: stat.to_string(),
        }
    }
}

impl StatLookup for StatCatalog {
    fn weapon_stat(&self, weapon: &str, stat: &str) -> Result<StatValue> {
        let w = self
            .weapons
            .get(weapon)
            .ok_or_else(|| SkirmishError::UnknownWeapon(weapon.to_string()))?;

        Ok(match stat {
            "skill" => StatValue::Text(w.skill.clone()),
            "weapon_type" => StatValue::Text(w.weapon_type.clone()),
            "lethality" => StatValue::Int(w.lethality),
            "penetration" => StatValue::Int(w.penetration),
            "recoil" => StatValue::Int(w.recoil),
            "accuracy" => StatValue::Int(w.accuracy),
            "ammo" => StatValue::Int(w.ammo),
            _ => return Err(Self::unknown_stat("weapon", weapon, stat)),
        })
    }

    fn armor_stat(&self, armor: &str, stat: &str) -> Result<StatValue> {
        let a = self
            .armor
            .get(armor)
            .ok_or_else(|| SkirmishError::UnknownArmor(armor.to_string()))?;

        match stat {
            "protection" => Ok(StatValue::Table(a.protection.clone())),
            _ => Err(Self::unknown_stat("armor", armor, stat)),
        }
    }

    fn vehicle_stat(&self, vehicle_type: &str, stat: &str) -> Result<StatValue> {
        let v = self
            .vehicles
            .get(vehicle_type)
            .ok_or_else(|| SkirmishError::UnknownVehicleType(vehicle_type.to_string()))?;

        Ok(match stat {
            "toughness" => StatValue::Int(v.toughness),
            "armor" => StatValue::Text(v.armor.clone()),
            "hitloc_chart" => StatValue::Text(v.hitloc_chart.clone()),
            _ => return Err(Self::unknown_stat("vehicle", vehicle_type, stat)),
        })
    }
}
