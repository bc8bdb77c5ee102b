//! Scenario overrides applied to the building and the configuration before a run.
//!
//! Every section is optional. Numeric overrides that are not positive keep the
//! value coming from the building description or the default configuration.

use crate::Building;
use crate::EvacError;
use crate::UID;
use crate::building::transit::TransitKind;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::SimulationConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionType {
    /// Keep the number of people given for every zone in the building description
    #[default]
    FromBim,
    /// Fill every zone with the same density
    Uniform,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitsType {
    /// Keep the widths inferred from the geometry
    #[default]
    FromBim,
    /// Use the same width for all internal openings and another one for all exits
    Users,
}

/// Density for a group of zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDensity {
    pub ids: Vec<String>,
    pub density: f64,
}

/// Width for a group of transits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialWidth {
    pub ids: Vec<String>,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distribution {
    #[serde(rename = "type")]
    pub kind: DistributionType,
    /// People per m² for [`DistributionType::Uniform`]
    pub density: f64,
    pub special: Vec<SpecialDensity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitWidths {
    #[serde(rename = "type")]
    pub kind: TransitsType,
    /// Width (m) of doorways and internal doors for [`TransitsType::Users`]
    pub doorway_in: f64,
    /// Width (m) of exits for [`TransitsType::Users`]
    pub doorway_out: f64,
    pub special: Vec<SpecialWidth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modeling {
    pub step: f64,
    pub max_speed: f64,
    pub density_min: f64,
    pub density_max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub distribution: Distribution,
    pub transits: TransitWidths,
    pub modeling: Modeling,
    /// Identifiers of zones and transits closed for the whole run
    pub blocked: Vec<String>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the overrides. Unknown identifiers are topology errors.
    pub fn apply(&self, building: &mut Building, config: &mut SimulationConfig) -> Result<()> {
        self.apply_distribution(building)?;
        self.apply_widths(building)?;
        self.apply_blocked(building)?;
        self.apply_modeling(config);
        info!(
            "Scenario applied: {:.0} people, {} blocked elements",
            building.num_of_people(),
            self.blocked.len()
        );
        Ok(())
    }

    fn apply_distribution(&self, building: &mut Building) -> Result<()> {
        let d = &self.distribution;
        if d.kind == DistributionType::Uniform {
            for zone in building.zones_mut().iter_mut().filter(|z| !z.is_outside()) {
                zone.occupants = d.density * zone.area;
            }
        }
        for special in d.special.iter() {
            for id in special.ids.iter() {
                let i = building
                    .zone_index(&UID::from(id.as_str()))
                    .filter(|&i| !building.zones()[i].is_outside())
                    .ok_or_else(|| EvacError::topology(format!("Scenario refers to unknown zone {id}")))?;
                let zone = &mut building.zones_mut()[i];
                zone.occupants = special.density * zone.area;
                debug!("Zone {} gets {:.2} people", zone.name, zone.occupants);
            }
        }
        Ok(())
    }

    fn apply_widths(&self, building: &mut Building) -> Result<()> {
        let w = &self.transits;
        if w.kind == TransitsType::Users {
            for transit in building.transits_mut().iter_mut() {
                let width = match transit.kind {
                    TransitKind::DoorWay | TransitKind::DoorWayInt => w.doorway_in,
                    TransitKind::DoorWayOut => w.doorway_out,
                };
                if width > 0.0 {
                    transit.width = width;
                }
            }
        }
        for special in w.special.iter() {
            for id in special.ids.iter() {
                let i = building
                    .transit_index(&UID::from(id.as_str()))
                    .ok_or_else(|| EvacError::topology(format!("Scenario refers to unknown transit {id}")))?;
                if special.width > 0.0 {
                    building.transits_mut()[i].width = special.width;
                }
            }
        }
        Ok(())
    }

    fn apply_blocked(&self, building: &mut Building) -> Result<()> {
        for id in self.blocked.iter() {
            let uid = UID::from(id.as_str());
            if let Some(i) = building.transit_index(&uid) {
                building.transits_mut()[i].blocked = true;
            } else if let Some(i) = building.zone_index(&uid) {
                building.zones_mut()[i].blocked = true;
            } else {
                return Err(EvacError::topology(format!(
                    "Scenario blocks unknown element {id}"
                )));
            }
        }
        Ok(())
    }

    fn apply_modeling(&self, config: &mut SimulationConfig) {
        let m = &self.modeling;
        if m.step > 0.0 {
            config.modeling_step = m.step;
        }
        if m.max_speed > 0.0 {
            config.max_speed = m.max_speed;
        }
        if m.density_min > 0.0 {
            config.density_min = m.density_min;
        }
        if m.density_max > 0.0 {
            config.density_max = m.density_max;
        }
    }
}
