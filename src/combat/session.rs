//! Combat session state
//!
//! The session owns every combatant and vehicle in one fight and keeps the
//! roster order that actions resolve in.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::combatant::{Combatant, Vehicle};
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{CombatantId, SessionId, Turn, VehicleId};

/// Notable state changes observers care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatEventKind {
    KnockedOut,
    Recovered,
    LeftCombat,
}

impl CombatEventKind {
    pub fn key(&self) -> &'static str {
        match self {
            CombatEventKind::KnockedOut => "combat.is_koed",
            CombatEventKind::Recovered => "combat.is_no_longer_koed",
            CombatEventKind::LeftCombat => "combat.left_combat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub turn: Turn,
    pub kind: CombatEventKind,
    pub combatant: CombatantId,
    pub name: String,
}

/// Log of events not yet collected by a turn report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatEventLog {
    events: Vec<CombatEvent>,
}

impl CombatEventLog {
    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

/// One ongoing fight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSession {
    pub id: SessionId,
    pub turn: Turn,
    combatants: AHashMap<CombatantId, Combatant>,
    /// Join order; actions resolve in this order
    order: Vec<CombatantId>,
    vehicles: AHashMap<VehicleId, Vehicle>,
    log: CombatEventLog,
}

impl CombatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant to the end of the roster
    pub fn join(&mut self, combatant: Combatant) -> CombatantId {
        let id = combatant.id;
        tracing::debug!("{} joins the combat", combatant.name);
        self.order.push(id);
        self.combatants.insert(id, combatant);
        id
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> VehicleId {
        let id = vehicle.id;
        self.vehicles.insert(id, vehicle);
        id
    }

    /// Put a combatant in a vehicle, as pilot or passenger
    ///
    /// Taking the pilot's seat moves any current pilot to the passengers.
    pub fn board(&mut self, id: CombatantId, vehicle_id: VehicleId, as_pilot: bool) -> Result<()> {
        self.disembark(id)?;

        let vehicle = self
            .vehicles
            .get_mut(&vehicle_id)
            .ok_or(SkirmishError::VehicleNotFound(vehicle_id))?;
        if as_pilot {
            if let Some(previous) = vehicle.pilot.replace(id) {
                vehicle.passengers.push(previous);
            }
        } else {
            vehicle.passengers.push(id);
        }

        self.get_mut(id)?.vehicle = Some(vehicle_id);
        Ok(())
    }

    /// Take a combatant out of whatever vehicle they're in
    pub fn disembark(&mut self, id: CombatantId) -> Result<()> {
        let Some(vehicle_id) = self.get_mut(id)?.vehicle.take() else {
            return Ok(());
        };
        if let Some(vehicle) = self.vehicles.get_mut(&vehicle_id) {
            Self::remove_occupant(vehicle, id);
        }
        Ok(())
    }

    fn remove_occupant(vehicle: &mut Vehicle, id: CombatantId) {
        if vehicle.pilot == Some(id) {
            vehicle.pilot = None;
        }
        vehicle.passengers.retain(|p| *p != id);
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.combatants.contains_key(&id)
    }

    pub fn get(&self, id: CombatantId) -> Result<&Combatant> {
        self.combatants
            .get(&id)
            .ok_or(SkirmishError::CombatantNotFound(id))
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.combatants
            .get_mut(&id)
            .ok_or(SkirmishError::CombatantNotFound(id))
    }

    pub fn vehicle(&self, id: VehicleId) -> Result<&Vehicle> {
        self.vehicles.get(&id).ok_or(SkirmishError::VehicleNotFound(id))
    }

    /// Roster ids in join order
    pub fn combatant_ids(&self) -> Vec<CombatantId> {
        self.order.clone()
    }

    /// Combatants in join order
    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.order.iter().filter_map(|id| self.combatants.get(id))
    }

    /// Conscious combatants in join order
    pub fn active_combatants(&self) -> Vec<&Combatant> {
        self.combatants().filter(|c| !c.is_ko).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vehicle the combatant rides in as a passenger, if any
    pub fn riding_in(&self, id: CombatantId) -> Option<&Vehicle> {
        let vehicle_id = self.combatants.get(&id)?.vehicle?;
        self.vehicles
            .get(&vehicle_id)
            .filter(|v| v.is_passenger(id))
    }

    /// Whether someone is holding this combatant
    ///
    /// A hold only counts while the subduer is still in the fight and awake.
    pub fn is_subdued(&self, id: CombatantId) -> bool {
        self.combatants
            .get(&id)
            .and_then(|c| c.subdued_by)
            .and_then(|subduer| self.combatants.get(&subduer))
            .is_some_and(|subduer| !subduer.is_ko)
    }

    pub fn emit(&mut self, kind: CombatEventKind, id: CombatantId) {
        let name = self
            .combatants
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        tracing::info!("Turn {}: {} ({})", self.turn, name, kind.key());
        self.log.push(CombatEvent {
            turn: self.turn,
            kind,
            combatant: id,
            name,
        });
    }

    pub fn events(&self) -> &[CombatEvent] {
        self.log.events()
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.log.drain()
    }

    /// Remove a combatant from the fight
    ///
    /// Every reference other records hold to the combatant is cleared:
    /// vehicle seats, holds, aim targets and queued actions aimed at them.
    pub fn leave_combat(&mut self, id: CombatantId) -> Result<Combatant> {
        if !self.contains(id) {
            return Err(SkirmishError::CombatantNotFound(id));
        }
        self.emit(CombatEventKind::LeftCombat, id);
        let combatant = self
            .combatants
            .remove(&id)
            .ok_or(SkirmishError::CombatantNotFound(id))?;
        self.order.retain(|c| *c != id);

        for vehicle in self.vehicles.values_mut() {
            Self::remove_occupant(vehicle, id);
        }

        for other in self.combatants.values_mut() {
            if other.subdued_by == Some(id) {
                other.subdued_by = None;
            }
            if other.aim_target == Some(id) {
                other.aim_target = None;
            }
            if other.action.as_ref().and_then(|a| a.target()) == Some(id) {
                other.action = None;
            }
        }

        Ok(combatant)
    }
}
