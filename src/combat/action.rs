//! Queued combat actions
//!
//! Exactly one action may be queued per combatant. Player commands and the
//! AI both write here; resolution reads it each turn.

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;

/// What a combatant intends to do this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Line up a shot; persists until another action is queued
    Aim { target: CombatantId },
    Attack {
        target: CombatantId,
        called_shot: Option<String>,
        modifier: i32,
    },
    Reload,
    /// Break free of whoever is holding us
    Escape,
    Explode { target: CombatantId },
    Suppress { target: CombatantId },
}

impl Action {
    /// Plain attack with no modifier or called shot
    pub fn attack(target: CombatantId) -> Self {
        Action::Attack {
            target,
            called_shot: None,
            modifier: 0,
        }
    }

    pub fn target(&self) -> Option<CombatantId> {
        match self {
            Action::Aim { target }
            | Action::Attack { target, .. }
            | Action::Explode { target }
            | Action::Suppress { target } => Some(*target),
            Action::Reload | Action::Escape => None,
        }
    }

    pub fn is_aim(&self) -> bool {
        matches!(self, Action::Aim { .. })
    }

    /// Cleared once resolved instead of repeating every turn
    pub fn is_single_shot(&self) -> bool {
        matches!(self, Action::Reload | Action::Escape)
    }

    /// Spends a round of ammunition when resolved
    pub fn uses_ammo(&self) -> bool {
        matches!(
            self,
            Action::Attack { .. } | Action::Explode { .. } | Action::Suppress { .. }
        )
    }
}
