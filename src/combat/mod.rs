//! Combat resolution engine
//!
//! Records ([`Combatant`], [`Vehicle`]) live in a [`CombatSession`]. All
//! resolution runs through [`CombatContext`], which pairs a session with a
//! dice source and the shared [`Rulebook`].

pub mod action;
pub mod ai;
pub mod armor;
pub mod attack;
pub mod combatant;
pub mod context;
pub mod crew;
pub mod damage;
pub mod execute;
pub mod outcome;
pub mod scheduler;
pub mod session;
pub mod stress;
pub mod turn;

#[cfg(test)]
mod fixtures;

pub use action::Action;
pub use armor::{judge_contest, ArmorContest};
pub use attack::{cover_chance, AttackMargin};
pub use combatant::{Combatant, Vehicle, Wound};
pub use context::{CombatContext, Rulebook};
pub use damage::{adjusted_damage_roll, DamageInputs, Severity};
pub use outcome::Outcome;
pub use scheduler::{process_sessions, TurnReport};
pub use session::{CombatEvent, CombatEventKind, CombatSession};
