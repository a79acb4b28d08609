//! Hit location charts
//!
//! A chart lists the locations an attack can land on, ordered from the
//! easiest to hit toward the most telling, plus which of them are vital,
//! critical, or expose a vehicle's crew.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SkirmishError};
use crate::ports::dice::Dice;

/// How dangerous a wound to a location is
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum LocationSeverity {
    #[default]
    Normal,
    Vital,
    Critical,
}

/// A single hit location chart
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitlocChart {
    pub locations: Vec<String>,
    #[serde(default)]
    pub vital_areas: Vec<String>,
    #[serde(default)]
    pub critical_areas: Vec<String>,
    /// Locations whose hits spray the vehicle's occupants
    #[serde(default)]
    pub crew_areas: Vec<String>,
}

impl HitlocChart {
    pub fn severity_of(&self, location: &str) -> LocationSeverity {
        if self.critical_areas.iter().any(|l| l == location) {
            LocationSeverity::Critical
        } else if self.vital_areas.iter().any(|l| l == location) {
            LocationSeverity::Vital
        } else {
            LocationSeverity::Normal
        }
    }

    pub fn is_crew_area(&self, location: &str) -> bool {
        self.crew_areas.iter().any(|l| l == location)
    }
}

/// Which charts apply to a target
#[derive(Debug, Clone, Copy)]
pub struct HitlocTarget<'a> {
    /// The combatant's own chart
    pub personal_chart: &'a str,
    /// The chart of the vehicle the combatant is in, if any
    pub vehicle_chart: Option<&'a str>,
}

impl<'a> HitlocTarget<'a> {
    /// Chart name in effect; crew hits always land on the person
    pub fn chart_name(&self, crew_hit: bool) -> &'a str {
        match self.vehicle_chart {
            Some(chart) if !crew_hit => chart,
            _ => self.personal_chart,
        }
    }
}

/// Hit location lookup
pub trait HitLocations: Send + Sync {
    fn chart_named(&self, name: &str) -> Result<&HitlocChart>;

    fn chart(&self, target: &HitlocTarget, crew_hit: bool) -> Result<&HitlocChart> {
        self.chart_named(target.chart_name(crew_hit))
    }

    fn severity(
        &self,
        target: &HitlocTarget,
        location: &str,
        crew_hit: bool,
    ) -> Result<LocationSeverity> {
        Ok(self.chart(target, crew_hit)?.severity_of(location))
    }

    /// Pick where an attack lands
    ///
    /// A called shot lands where called once the margin reaches
    /// `called_shot_margin`. Otherwise the draw is shifted up the chart by the
    /// margin and clamped to its last entry.
    fn determine_hitloc(
        &self,
        target: &HitlocTarget,
        margin: u32,
        called_shot: Option<&str>,
        crew_hit: bool,
        called_shot_margin: u32,
        dice: &mut dyn Dice,
    ) -> Result<String> {
        if let Some(called) = called_shot {
            if margin >= called_shot_margin {
                return Ok(called.to_string());
            }
        }

        let name = target.chart_name(crew_hit);
        let chart = self.chart_named(name)?;
        let count = chart.locations.len() as u32;
        if count == 0 {
            return Err(SkirmishError::EmptyHitlocChart(name.to_string()));
        }

        let index = (dice.uniform_int(count) + margin).min(count - 1);
        Ok(chart.locations[index as usize].clone())
    }
}

/// TOML-backed hit location charts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitlocCatalog {
    #[serde(default)]
    pub charts: AHashMap<String, HitlocChart>,
}

impl HitlocCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_chart(mut self, name: &str, chart: HitlocChart) -> Self {
        self.charts.insert(name.to_string(), chart);
        self
    }
}

impl HitLocations for HitlocCatalog {
    fn chart_named(&self, name: &str) -> Result<&HitlocChart> {
        self.charts
            .get(name)
            .ok_or_else(|| SkirmishError::UnknownHitlocChart(name.to_string()))
    }
}
