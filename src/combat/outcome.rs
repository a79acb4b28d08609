//! Narration-ready outcomes of resolving actions
//!
//! Each outcome carries a stable message key plus the names it mentions.
//! Rendering and localization belong to the caller.

use serde::{Deserialize, Serialize};

use crate::combat::damage::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    AttackDodged {
        attacker: String,
        target: String,
    },
    AttackHitsCover {
        attacker: String,
        target: String,
    },
    AttackStoppedByArmor {
        attacker: String,
        target: String,
        location: String,
    },
    AttackHits {
        attacker: String,
        target: String,
        location: String,
        severity: Severity,
    },
    Aiming {
        actor: String,
        target: String,
    },
    OutOfAmmo {
        actor: String,
    },
    Reloaded {
        actor: String,
    },
    Escaped {
        actor: String,
        subduer: String,
    },
    EscapeFailed {
        actor: String,
        subduer: String,
    },
    /// Tried to escape with nobody holding on
    NotSubdued {
        actor: String,
    },
    Suppressed {
        actor: String,
        target: String,
    },
    SuppressionResisted {
        actor: String,
        target: String,
    },
}

impl Outcome {
    /// Message key for the client's localization table
    pub fn key(&self) -> &'static str {
        match self {
            Outcome::AttackDodged { .. } => "combat.attack_dodged",
            Outcome::AttackHitsCover { .. } => "combat.attack_hits_cover",
            Outcome::AttackStoppedByArmor { .. } => "combat.attack_stopped_by_armor",
            Outcome::AttackHits { .. } => "combat.attack_hits",
            Outcome::Aiming { .. } => "combat.aiming",
            Outcome::OutOfAmmo { .. } => "combat.out_of_ammo",
            Outcome::Reloaded { .. } => "combat.reloaded",
            Outcome::Escaped { .. } => "combat.escaped",
            Outcome::EscapeFailed { .. } => "combat.escape_failed",
            Outcome::NotSubdued { .. } => "combat.not_subdued",
            Outcome::Suppressed { .. } => "combat.suppressed",
            Outcome::SuppressionResisted { .. } => "combat.suppression_resisted",
        }
    }

    /// Whether the outcome put a wound on someone
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::AttackHits { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::AttackDodged { attacker, target } => {
                write!(f, "{attacker} attacks {target}, who dodges")
            }
            Outcome::AttackHitsCover { attacker, target } => {
                write!(f, "{attacker}'s attack on {target} hits cover")
            }
            Outcome::AttackStoppedByArmor {
                attacker,
                target,
                location,
            } => write!(f, "{attacker} hits {target} in the {location}, but armor stops it"),
            Outcome::AttackHits {
                attacker,
                target,
                location,
                severity,
            } => write!(f, "{attacker} hits {target} in the {location} ({severity})"),
            Outcome::Aiming { actor, target } => write!(f, "{actor} takes aim at {target}"),
            Outcome::OutOfAmmo { actor } => write!(f, "{actor} is out of ammo"),
            Outcome::Reloaded { actor } => write!(f, "{actor} reloads"),
            Outcome::Escaped { actor, subduer } => write!(f, "{actor} breaks free of {subduer}"),
            Outcome::EscapeFailed { actor, subduer } => {
                write!(f, "{actor} struggles against {subduer} without success")
            }
            Outcome::NotSubdued { actor } => write!(f, "{actor} isn't being held"),
            Outcome::Suppressed { actor, target } => write!(f, "{actor} pins {target} down"),
            Outcome::SuppressionResisted { actor, target } => {
                write!(f, "{target} keeps their head despite {actor}'s fire")
            }
        }
    }
}
