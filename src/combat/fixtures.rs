//! Shared rules and rosters for unit tests

use crate::combat::combatant::{Combatant, Vehicle};
use crate::combat::context::Rulebook;
use crate::combat::session::CombatSession;
use crate::core::config::CombatConfig;
use crate::core::types::{CombatantId, VehicleId};
use crate::ports::hitloc::{HitlocCatalog, HitlocChart};
use crate::ports::stats::{ArmorStats, StatCatalog, VehicleStats, WeaponStats};

fn weapon(skill: &str, weapon_type: &str, lethality: i64, penetration: i64) -> WeaponStats {
    let mut stats = WeaponStats::new(skill, weapon_type);
    stats.lethality = lethality;
    stats.penetration = penetration;
    stats
}

fn chart(locations: &[&str], vital: &[&str], critical: &[&str], crew: &[&str]) -> HitlocChart {
    let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
    HitlocChart {
        locations: owned(locations),
        vital_areas: owned(vital),
        critical_areas: owned(critical),
        crew_areas: owned(crew),
    }
}

pub fn stats() -> StatCatalog {
    let mut rifle = weapon("Firearms", "Ranged", 0, 4);
    rifle.recoil = 1;
    rifle.accuracy = 1;
    rifle.ammo = 6;

    let mut grenade = weapon("Demolitions", "Explosive", 10, 2);
    grenade.ammo = 1;

    let mut mg = weapon("Firearms", "Suppressive", 5, 5);
    mg.recoil = 2;
    mg.ammo = 20;

    StatCatalog::new()
        .with_weapon("Rifle", rifle)
        .with_weapon("Knife", weapon("Melee", "Melee", 0, 1))
        .with_weapon("Grenade", grenade)
        .with_weapon("MG", mg)
        .with_weapon("Taser", weapon("Firearms", "Stun", 0, 0))
        .with_weapon("Shrapnel", weapon("Firearms", "Ranged", 0, 2))
        .with_armor("Tactical", ArmorStats::protecting(&[("Chest", 2), ("Abdomen", 2)]))
        .with_armor(
            "ViperHull",
            ArmorStats::protecting(&[("Wing", 6), ("Engine", 4), ("Cockpit", 3)]),
        )
        .with_vehicle(
            "Viper",
            VehicleStats {
                toughness: 5,
                armor: "ViperHull".into(),
                hitloc_chart: "Fighter".into(),
            },
        )
}

pub fn hitlocs() -> HitlocCatalog {
    HitlocCatalog::new()
        .with_chart(
            "Humanoid",
            chart(
                &["Leg", "Arm", "Abdomen", "Chest", "Head"],
                &["Abdomen", "Chest"],
                &["Head"],
                &[],
            ),
        )
        .with_chart(
            "Fighter",
            chart(&["Wing", "Engine", "Cockpit"], &[], &["Engine"], &["Cockpit"]),
        )
}

pub fn rules() -> Rulebook {
    Rulebook::new(CombatConfig::default(), stats(), hitlocs())
}

pub fn rifleman(name: &str, team: u32) -> Combatant {
    Combatant::new(name, team, "Rifle")
        .with_ability("Firearms", 5)
        .with_ability("Reaction", 3)
        .with_ability("Composure", 3)
        .with_ammo(6)
}

/// Two opposing riflemen
pub fn duel() -> (CombatSession, CombatantId, CombatantId) {
    let mut session = CombatSession::new();
    let a = session.join(rifleman("Ann", 1));
    let b = session.join(rifleman("Bob", 2));
    (session, a, b)
}

/// A Viper with a pilot and one passenger
pub fn crewed_viper(session: &mut CombatSession) -> (VehicleId, CombatantId, CombatantId) {
    let viper = session.add_vehicle(Vehicle::new("Viper"));
    let pilot = session.join(rifleman("Pilot", 3));
    let gunner = session.join(rifleman("Gunner", 3));
    session.board(pilot, viper, true).unwrap();
    session.board(gunner, viper, false).unwrap();
    (viper, pilot, gunner)
}
