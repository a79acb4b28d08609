//! Turn processing
//!
//! A session's turn is strictly sequential: later steps read what earlier
//! ones changed. Separate sessions share nothing mutable, so a batch of them
//! runs in parallel with rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::context::{CombatContext, Rulebook};
use crate::combat::outcome::Outcome;
use crate::combat::session::{CombatEvent, CombatSession};
use crate::core::error::Result;
use crate::core::types::{SessionId, Turn};
use crate::ports::dice::SeededDice;

/// Everything that happened in one turn of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub session: SessionId,
    pub turn: Turn,
    pub outcomes: Vec<Outcome>,
    pub events: Vec<CombatEvent>,
}

impl CombatContext<'_> {
    /// Run one full turn
    ///
    /// 1. Knocked-out combatants try to come around
    /// 2. Conscious NPCs pick their actions
    /// 3. Queued actions resolve in roster order
    /// 4. Everyone still present is reset for the next turn
    pub fn process_turn(&mut self) -> Result<TurnReport> {
        self.session.turn += 1;
        let turn = self.session.turn;
        tracing::info!("Session {:?} turn {}", self.session.id, turn);

        let roster = self.session.combatant_ids();

        for &id in &roster {
            if self.session.get(id)?.is_ko {
                self.check_for_unknockout(id)?;
            }
        }

        for &id in &roster {
            let combatant = self.session.get(id)?;
            if combatant.is_npc && !combatant.is_ko {
                self.choose_action(id)?;
            }
        }

        let mut outcomes = Vec::new();
        for &id in &roster {
            if self.session.contains(id) {
                outcomes.extend(self.resolve_action(id)?);
            }
        }

        for &id in &roster {
            if self.session.contains(id) {
                self.reset_for_new_turn(id)?;
            }
        }

        Ok(TurnReport {
            session: self.session.id,
            turn,
            outcomes,
            events: self.session.drain_events(),
        })
    }
}

/// Run one turn of every session in parallel
///
/// Each session rolls its own dice, seeded from `seed` and the session id, so
/// a batch replays identically regardless of thread scheduling.
pub fn process_sessions(
    sessions: &mut [CombatSession],
    rules: &Rulebook,
    seed: u64,
) -> Vec<Result<TurnReport>> {
    sessions
        .par_iter_mut()
        .map(|session| {
            let mut dice = SeededDice::new(seed ^ session.id.seed_bits());
            CombatContext::new(session, &mut dice, rules).process_turn()
        })
        .collect()
}
