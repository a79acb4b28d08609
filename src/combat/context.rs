//! Resolution context
//!
//! Resolution operations need the session being mutated, a dice source and
//! the read-only rules (config plus stat and hit location lookups). They are
//! implemented as methods on [`CombatContext`], split across the modules of
//! this crate by concern.

use std::path::Path;

use crate::combat::session::CombatSession;
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::ports::dice::Dice;
use crate::ports::hitloc::{HitLocations, HitlocCatalog};
use crate::ports::stats::{StatCatalog, StatLookup};

/// Config file expected in a data directory
pub const CONFIG_FILE: &str = "combat.toml";
/// Stat catalog file expected in a data directory
pub const STATS_FILE: &str = "stats.toml";
/// Hit location charts file expected in a data directory
pub const HITLOCS_FILE: &str = "hitlocs.toml";

/// Read-only rules shared by every session
pub struct Rulebook {
    pub config: CombatConfig,
    pub stats: Box<dyn StatLookup>,
    pub hitlocs: Box<dyn HitLocations>,
}

impl Rulebook {
    pub fn new(
        config: CombatConfig,
        stats: impl StatLookup + 'static,
        hitlocs: impl HitLocations + 'static,
    ) -> Self {
        Self {
            config,
            stats: Box::new(stats),
            hitlocs: Box::new(hitlocs),
        }
    }

    /// Load config, stats and hit locations from a data directory
    ///
    /// A missing `combat.toml` falls back to the default config.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            CombatConfig::load(&config_path)?
        } else {
            tracing::info!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
            CombatConfig::default()
        };
        let stats = StatCatalog::load(&dir.join(STATS_FILE))?;
        let hitlocs = HitlocCatalog::load(&dir.join(HITLOCS_FILE))?;

        tracing::info!(
            "Loaded {} weapons, {} armor, {} vehicle types, {} hit location charts",
            stats.weapons.len(),
            stats.armor.len(),
            stats.vehicles.len(),
            hitlocs.charts.len()
        );

        Ok(Self::new(config, stats, hitlocs))
    }
}

/// Everything one resolution step works with
pub struct CombatContext<'a> {
    pub session: &'a mut CombatSession,
    pub dice: &'a mut dyn Dice,
    pub rules: &'a Rulebook,
}

impl<'a> CombatContext<'a> {
    pub fn new(session: &'a mut CombatSession, dice: &'a mut dyn Dice, rules: &'a Rulebook) -> Self {
        Self {
            session,
            dice,
            rules,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.rules.config
    }

    /// Personal and vehicle hit location chart names for a combatant
    pub(crate) fn chart_names(&self, id: CombatantId) -> Result<(String, Option<String>)> {
        let combatant = self.session.get(id)?;
        let vehicle_chart = match combatant.vehicle {
            Some(vehicle_id) => {
                let vehicle = self.session.vehicle(vehicle_id)?;
                let stat = self.rules.stats.vehicle_stat(&vehicle.vehicle_type, "hitloc_chart")?;
                Some(stat.as_text("hitloc_chart")?.to_string())
            }
            None => None,
        };
        Ok((combatant.hitloc_chart.clone(), vehicle_chart))
    }

    /// Armor protecting a combatant: the vehicle's if inside one, else their own
    pub(crate) fn armor_worn(&self, id: CombatantId) -> Result<Option<String>> {
        let combatant = self.session.get(id)?;
        match combatant.vehicle {
            Some(vehicle_id) => {
                let vehicle = self.session.vehicle(vehicle_id)?;
                let stat = self.rules.stats.vehicle_stat(&vehicle.vehicle_type, "armor")?;
                Ok(Some(stat.as_text("armor")?.to_string()))
            }
            None => Ok(combatant.armor.clone()),
        }
    }

    pub(crate) fn name_of(&self, id: CombatantId) -> Result<String> {
        Ok(self.session.get(id)?.name.clone())
    }
}
