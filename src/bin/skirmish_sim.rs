//! Headless Skirmish Runner
//!
//! Loads rules from a data directory, stages a small firefight with a crewed
//! fighter, lets the AI run both sides, and prints every turn's report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use skirmish::combat::{CombatContext, CombatSession, Combatant, Rulebook, TurnReport, Vehicle};
use skirmish::core::error::Result;
use skirmish::core::types::{Stance, TeamId};
use skirmish::ports::dice::SeededDice;

/// Headless Skirmish Runner - AI vs AI firefights
#[derive(Parser, Debug)]
#[command(name = "skirmish_sim")]
#[command(about = "Run an AI vs AI firefight and print turn reports")]
struct Args {
    /// Directory holding combat.toml, stats.toml and hitlocs.toml
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Maximum turns to run
    #[arg(long, default_value_t = 10)]
    turns: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print the roster after every turn
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct SkirmishResult {
    seed: u64,
    turns: Vec<TurnReport>,
    survivors: Vec<String>,
}

const BLUE: TeamId = 1;
const RED: TeamId = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skirmish=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let rules = Rulebook::load_dir(&args.data_dir)?;
    let mut session = stage_firefight()?;
    let mut dice = SeededDice::new(seed);

    let mut reports = Vec::new();
    for _ in 0..args.turns {
        if standing_teams(&session) < 2 {
            break;
        }
        let report = CombatContext::new(&mut session, &mut dice, &rules).process_turn()?;

        if args.format == "text" {
            print_report(&report);
        }
        if args.verbose {
            print_roster(&session);
        }
        reports.push(report);
    }

    let survivors: Vec<String> = session
        .active_combatants()
        .into_iter()
        .map(|c| c.name.clone())
        .collect();

    match args.format.as_str() {
        "json" => {
            let result = SkirmishResult {
                seed,
                turns: reports,
                survivors,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "text" => {
            println!("Seed: {}", seed);
            println!("Survivors: {}", survivors.join(", "));
        }
        other => {
            eprintln!("Unknown format '{}', expected json or text", other);
        }
    }
    Ok(())
}

/// Three infantry against a crewed Viper and an escort
fn stage_firefight() -> Result<CombatSession> {
    let mut session = CombatSession::new();

    session.join(
        soldier("Ann", BLUE, "Rifle")
            .with_armor("Tactical")
            .with_ammo(6),
    );
    session.join(
        soldier("Bo", BLUE, "MG")
            .with_armor("Flak")
            .with_ammo(20)
            .with_stance(Stance::Aggressive),
    );
    session.join(soldier("Cy", BLUE, "Grenade").with_ammo(1));

    let viper = session.add_vehicle(Vehicle::new("Viper"));
    let pilot = session.join(soldier("Vex", RED, "Pistol").with_ammo(12));
    let gunner = session.join(soldier("Gus", RED, "Rifle").with_ammo(6));
    session.board(pilot, viper, true)?;
    session.board(gunner, viper, false)?;

    session.join(
        soldier("Dee", RED, "Rifle")
            .with_armor("Flak")
            .with_ammo(6)
            .with_stance(Stance::Cover),
    );

    Ok(session)
}

fn soldier(name: &str, team: TeamId, weapon: &str) -> Combatant {
    Combatant::new(name, team, weapon)
        .npc()
        .with_ability("Firearms", 5)
        .with_ability("Demolitions", 4)
        .with_ability("Melee", 3)
        .with_ability("Reaction", 3)
        .with_ability("Composure", 3)
        .with_ability("Athletics", 3)
}

fn standing_teams(session: &CombatSession) -> usize {
    let mut teams: Vec<TeamId> = session
        .active_combatants()
        .into_iter()
        .map(|c| c.team)
        .collect();
    teams.sort_unstable();
    teams.dedup();
    teams.len()
}

fn print_report(report: &TurnReport) {
    println!("=== Turn {} ===", report.turn);
    for outcome in &report.outcomes {
        println!("  {}", outcome);
    }
    for event in &report.events {
        println!("  [{}] {}", event.kind.key(), event.name);
    }
}

fn print_roster(session: &CombatSession) {
    for c in session.combatants() {
        eprintln!(
            "  {} team={} stress={} ko={} wounds={} ammo={:?}",
            c.name,
            c.team,
            c.stress,
            c.is_ko,
            c.wounds.len(),
            c.ammo
        );
    }
}
