//! Combat integration tests
//!
//! End-to-end turns against the rules shipped in `data/`, with scripted dice
//! so every roll is known.

use std::path::Path;

use skirmish::combat::{
    process_sessions, Action, CombatContext, CombatEventKind, CombatSession, Combatant, Outcome,
    Rulebook, Severity, Vehicle,
};
use skirmish::core::types::{CombatantId, Stance, VehicleId};
use skirmish::core::CombatConfig;
use skirmish::ports::{ScriptedDice, StatLookup};

fn rules() -> Rulebook {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    Rulebook::load_dir(&dir).expect("shipped data should load")
}

fn soldier(name: &str, team: u32, weapon: &str) -> Combatant {
    Combatant::new(name, team, weapon)
        .with_ability("Firearms", 5)
        .with_ability("Reaction", 3)
        .with_ability("Composure", 3)
        .with_ability("Athletics", 3)
}

fn duel() -> (CombatSession, CombatantId, CombatantId) {
    let mut session = CombatSession::new();
    let ann = session.join(soldier("Ann", 1, "Rifle").with_ammo(6));
    let bob = session.join(soldier("Bob", 2, "Rifle").with_ammo(6));
    (session, ann, bob)
}

fn crewed_viper(session: &mut CombatSession) -> (VehicleId, CombatantId, CombatantId) {
    let viper = session.add_vehicle(Vehicle::new("Viper"));
    let pilot = session.join(soldier("Vex", 3, "Pistol"));
    let gunner = session.join(soldier("Gus", 3, "Rifle"));
    session.board(pilot, viper, true).unwrap();
    session.board(gunner, viper, false).unwrap();
    (viper, pilot, gunner)
}

#[test]
fn test_shipped_data_loads() {
    let rules = rules();
    assert_eq!(rules.config, CombatConfig::default());
    assert_eq!(rules.stats.weapon_int("Rifle", "ammo").unwrap(), 6);
    assert_eq!(rules.stats.vehicle_int("Viper", "toughness").unwrap(), 5);
}

#[test]
fn test_hit_runs_location_armor_and_damage() {
    let rules = rules();
    let (mut session, a, b) = duel();
    session.get_mut(a).unwrap().action = Some(Action::attack(b));

    // Attack 3 vs dodge 1, location draw 0 shifted by 2, damage roll 50
    let mut dice = ScriptedDice::new().with_successes([3, 1]).with_uniform([0, 50]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .resolve_action(a)
        .unwrap();

    assert_eq!(
        outcomes,
        vec![Outcome::AttackHits {
            attacker: "Ann".into(),
            target: "Bob".into(),
            location: "Abdomen".into(),
            severity: Severity::Flesh,
        }]
    );
    // Firearms 5 + accuracy 1 against Reaction 3
    assert_eq!(dice.pools, vec![6, 3]);
    assert_eq!(dice.uniform_bounds, vec![5, 100]);

    let ann = session.get(a).unwrap();
    assert_eq!(ann.ammo, Some(5));
    assert_eq!(ann.recoil, 1);
    let bob = session.get(b).unwrap();
    assert_eq!(bob.wounds.len(), 1);
    assert_eq!(bob.wounds[0].description, "Rifle - Abdomen");
    assert_eq!(bob.stress, 1);
    assert!(bob.freshly_damaged);
}

#[test]
fn test_tie_goes_to_the_attacker() {
    let rules = rules();
    let (mut session, a, b) = duel();

    let mut dice = ScriptedDice::new().with_successes([2, 2]).with_uniform([0, 50]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .attack_target(a, b, 0, None, false)
        .unwrap();
    assert!(outcomes[0].is_hit());
}

#[test]
fn test_recoil_builds_within_a_turn() {
    let rules = rules();
    let (mut session, a, b) = duel();

    let mut dice = ScriptedDice::new();
    let mut ctx = CombatContext::new(&mut session, &mut dice, &rules);
    ctx.attack_target(a, b, 0, None, false).unwrap();
    ctx.attack_target(a, b, 0, None, false).unwrap();
    drop(ctx);

    // Second attack loses a die to the first one's recoil
    assert_eq!(dice.pools[0], 6);
    assert_eq!(dice.pools[2], 5);
}

#[test]
fn test_cover_absorbs_narrow_wins_only() {
    let rules = rules();
    let (mut session, a, b) = duel();
    session.get_mut(b).unwrap().stance = Stance::Cover;

    let mut dice = ScriptedDice::new().with_successes([2, 1]).with_uniform([10]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .attack_target(a, b, 0, None, false)
        .unwrap();
    assert_eq!(outcomes[0].key(), "combat.attack_hits_cover");
    assert!(session.get(b).unwrap().wounds.is_empty());

    // A decisive margin never checks cover
    let mut dice = ScriptedDice::new().with_successes([4, 1]).with_uniform([0, 0]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .attack_target(a, b, 0, None, false)
        .unwrap();
    assert!(outcomes[0].is_hit());
    assert_eq!(dice.uniform_bounds, vec![5, 100]);
}

#[test]
fn test_armor_stops_a_decisive_protection_win() {
    let rules = rules();
    let (mut session, a, b) = duel();
    session.get_mut(b).unwrap().armor = Some("Tactical".into());

    // Tie on the attack, location draw 3 is the Chest
    let mut dice = ScriptedDice::new()
        .with_successes([2, 2, 0, 3])
        .with_uniform([3]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .attack_target(a, b, 0, None, false)
        .unwrap();

    assert_eq!(
        outcomes,
        vec![Outcome::AttackStoppedByArmor {
            attacker: "Ann".into(),
            target: "Bob".into(),
            location: "Chest".into(),
        }]
    );
    // Rifle penetration 4 against Tactical chest plate 5
    assert_eq!(&dice.pools[2..], &[4, 5]);
    assert!(session.get(b).unwrap().wounds.is_empty());
}

#[test]
fn test_called_shot_lands_on_a_decisive_margin() {
    let rules = rules();
    let (mut session, a, b) = duel();
    session.get_mut(a).unwrap().action = Some(Action::Attack {
        target: b,
        called_shot: Some("Head".into()),
        modifier: 0,
    });

    let mut dice = ScriptedDice::new().with_successes([4, 1]).with_uniform([15]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .resolve_action(a)
        .unwrap();

    // Head is critical: 15 + 20 lands in the flesh band
    assert_eq!(
        outcomes[0],
        Outcome::AttackHits {
            attacker: "Ann".into(),
            target: "Bob".into(),
            location: "Head".into(),
            severity: Severity::Flesh,
        }
    );
    assert_eq!(dice.uniform_bounds, vec![100]);
    // 5 + 1 accuracy - 2 for calling the shot
    assert_eq!(dice.pools[0], 4);
}

#[test]
fn test_cockpit_hit_sprays_the_crew() {
    let rules = rules();
    let (mut session, a, _) = duel();
    let (_, pilot, gunner) = crewed_viper(&mut session);

    // Aimed at the gunner, lands on the pilot. Margin 2 from draw 0 is the
    // Cockpit; penetration 1 + 2 net beats protection 0 decisively.
    let mut dice = ScriptedDice::new()
        .with_successes([3, 1, 1, 0])
        .with_uniform([0, 50, 0, 50, 0, 50]);
    let outcomes = CombatContext::new(&mut session, &mut dice, &rules)
        .attack_target(a, gunner, 0, None, false)
        .unwrap();

    let targets: Vec<_> = outcomes
        .iter()
        .map(|o| match o {
            Outcome::AttackHits {
                attacker,
                target,
                location,
                ..
            } => (attacker.as_str(), target.as_str(), location.as_str()),
            other => panic!("unexpected outcome {other:?}"),
        })
        .collect();
    assert_eq!(
        targets,
        vec![
            ("Ann", "Vex", "Cockpit"),
            ("Crew hit", "Gus", "Leg"),
            ("Crew hit", "Vex", "Leg"),
        ]
    );

    let vex = session.get(pilot).unwrap();
    assert_eq!(vex.wounds.len(), 2);
    assert!(vex.wounds[1].crew_hit);
    let gus = session.get(gunner).unwrap();
    assert_eq!(gus.wounds.len(), 1);
    assert!(gus.wounds[0].crew_hit);
}

#[test]
fn test_stun_weapon_leaves_stun_wounds() {
    let rules = rules();
    let (mut session, a, b) = duel();
    session.get_mut(a).unwrap().weapon = "Taser".into();

    let mut dice = ScriptedDice::new().with_successes([2, 0]).with_uniform([0, 10]);
    CombatContext::new(&mut session, &mut dice, &rules)
        .attack_target(a, b, 0, None, false)
        .unwrap();
    assert!(session.get(b).unwrap().wounds[0].is_stun);
}

#[test]
fn test_player_knocked_out_then_recovers() {
    let rules = rules();
    let (mut session, a, b) = duel();
    session
        .get_mut(b)
        .unwrap()
        .inflict_damage(Severity::Impair, "Knife - Arm".into(), false, false);
    session.get_mut(a).unwrap().action = Some(Action::attack(b));

    // Attack hits for a graze; every later roll comes up empty
    let mut dice = ScriptedDice::new().with_successes([3, 1]).with_uniform([0, 0]);
    let report = CombatContext::new(&mut session, &mut dice, &rules)
        .process_turn()
        .unwrap();

    assert_eq!(report.turn, 1);
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].kind, CombatEventKind::KnockedOut);
    assert_eq!(report.events[0].name, "Bob");
    let bob = session.get(b).unwrap();
    assert!(bob.is_ko);
    assert!(!bob.freshly_damaged);

    // Knocked out players stay in the fight and get a save each turn
    session.get_mut(a).unwrap().action = None;
    let mut dice = ScriptedDice::new().with_successes([1]);
    let report = CombatContext::new(&mut session, &mut dice, &rules)
        .process_turn()
        .unwrap();
    assert_eq!(report.events[0].kind, CombatEventKind::Recovered);
    assert!(!session.get(b).unwrap().is_ko);
}

#[test]
fn test_knocked_out_npc_leaves_the_fight() {
    let rules = rules();
    let (mut session, a, b) = duel();
    {
        let bob = session.get_mut(b).unwrap();
        bob.is_npc = true;
        bob.inflict_damage(Severity::Incap, "Rifle - Chest".into(), false, false);
        bob.freshly_damaged = true;
    }
    session.get_mut(a).unwrap().aim_target = Some(b);
    session.get_mut(a).unwrap().action = Some(Action::Aim { target: b });

    let mut dice = ScriptedDice::new();
    CombatContext::new(&mut session, &mut dice, &rules)
        .reset_for_new_turn(b)
        .unwrap();

    assert!(!session.contains(b));
    let kinds: Vec<_> = session.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![CombatEventKind::KnockedOut, CombatEventKind::LeftCombat]);
    let ann = session.get(a).unwrap();
    assert_eq!(ann.aim_target, None);
    assert_eq!(ann.action, None);
}

#[test]
fn test_leaving_clears_vehicle_seat() {
    let (mut session, _, _) = duel();
    let (viper, pilot, gunner) = crewed_viper(&mut session);

    let vex = session.leave_combat(pilot).unwrap();
    assert_eq!(vex.name, "Vex");
    let vehicle = session.vehicle(viper).unwrap();
    assert_eq!(vehicle.pilot, None);
    assert_eq!(vehicle.occupants(), vec![gunner]);
    assert!(session.leave_combat(pilot).is_err());
}

#[test]
fn test_npc_battle_is_reproducible_from_seed() {
    let rules = rules();
    let build = || {
        let (mut session, a, b) = duel();
        session.get_mut(a).unwrap().is_npc = true;
        session.get_mut(b).unwrap().is_npc = true;
        crewed_viper(&mut session);
        session
    };

    let mut first = vec![build(), build()];
    let mut second = first.clone();
    for _ in 0..5 {
        let a: Vec<_> = process_sessions(&mut first, &rules, 7)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        let b: Vec<_> = process_sessions(&mut second, &rules, 7)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_outcomes_serialize_with_kind_tag() {
    let outcome = Outcome::OutOfAmmo {
        actor: "Ann".into(),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["kind"], "out_of_ammo");
    assert_eq!(json["actor"], "Ann");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = CombatConfig::parse_toml("decisive_margin = 4\ncover_chances = [0, 60, 40, 20]")
        .unwrap();
    assert_eq!(config.decisive_margin, 4);
    assert_eq!(config.cover_chances, vec![0, 60, 40, 20]);
    assert_eq!(config.aim_bonus, CombatConfig::default().aim_bonus);

    assert!(CombatConfig::parse_toml("cover_chances = [10, 50]").is_err());
}
