//! Crew hits
//!
//! A hit on a vehicle location marked as a crew area sprays shrapnel over
//! everyone inside.

use crate::combat::context::CombatContext;
use crate::combat::damage::Severity;
use crate::combat::outcome::Outcome;
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::ports::hitloc::HitlocTarget;

impl CombatContext<'_> {
    /// Shrapnel hits on a vehicle's occupants, passengers first then the pilot
    ///
    /// Empty unless `target` is in a vehicle and `location` is one of the
    /// vehicle chart's crew areas.
    pub fn resolve_possible_crew_hit(
        &mut self,
        target: CombatantId,
        location: &str,
        severity: Severity,
    ) -> Result<Vec<Outcome>> {
        let Some(vehicle_id) = self.session.get(target)?.vehicle else {
            return Ok(Vec::new());
        };

        let (personal_chart, vehicle_chart) = self.chart_names(target)?;
        let charts = HitlocTarget {
            personal_chart: &personal_chart,
            vehicle_chart: vehicle_chart.as_deref(),
        };
        if !self.rules.hitlocs.chart(&charts, false)?.is_crew_area(location) {
            return Ok(Vec::new());
        }

        let occupants = self.session.vehicle(vehicle_id)?.occupants();
        let weapon = self.rules.config.shrapnel_weapon.clone();
        let label = self.rules.config.crew_hit_label.clone();
        let max_hits = self.rules.config.shrapnel_hits_per_occupant;

        tracing::info!(
            "{} hit to the {} sprays {} occupants",
            severity,
            location,
            occupants.len()
        );

        let mut outcomes = Vec::new();
        for occupant in occupants {
            let hits = if max_hits > 1 {
                1 + self.dice.uniform_int(max_hits)
            } else {
                1
            };
            for _ in 0..hits {
                outcomes.extend(self.resolve_attack(&label, occupant, &weapon, 0, None, true)?);
            }
        }
        Ok(outcomes)
    }
}
