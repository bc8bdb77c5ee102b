//! Building model: zones and transits built from a building description.
//!
//! Zones and transits live in two vectors sorted by their sequential ids.
//! They refer to each other by external identifier; the adjacency graph
//! turns these references into indices.

pub mod description;
pub mod graph;
pub mod transit;
pub mod zone;

use crate::EvacError;
use crate::Polygon;
use crate::SortById;
use crate::UID;
use crate::geom::opening::{OpeningSide, infer_transit_width};
use anyhow::{Context, Result};
use description::{BuildingDescription, ElementSign};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use transit::{Transit, TransitKind};
use zone::{Zone, ZoneKind};

#[derive(Debug, Clone)]
pub struct Building {
    pub name: String,
    zones: Vec<Zone>,
    transits: Vec<Transit>,
}

impl Building {
    /// Builds zones and transits from a building description.
    ///
    /// Rooms and staircases get sequential ids in source order, and so do the
    /// openings. The outside zone is appended last and joined to every exit.
    /// Transit widths are inferred from the geometry of the adjacent zones.
    pub fn from_description(desc: &BuildingDescription) -> Result<Self> {
        let mut zones: Vec<Zone> = Vec::new();
        let mut transits: Vec<Transit> = Vec::new();

        for level in desc.levels.iter() {
            let mut num_zones = 0;
            let mut num_transits = 0;

            for el in level.elements.iter() {
                if !el.sign.is_zone() && !el.sign.is_transit() {
                    warn!("Skipping element of unknown kind: {} ({})", el.name, el.id);
                    continue;
                }
                let polygon = Polygon::new(el.points().to_vec())
                    .with_context(|| format!("Invalid outline of element {} ({})", el.name, el.id))?;
                let outputs: Vec<UID> = el.outputs.iter().map(|s| UID::from(s.as_str())).collect();

                if el.sign.is_zone() {
                    let kind = match el.sign {
                        ElementSign::Staircase => ZoneKind::Staircase,
                        _ => ZoneKind::Room,
                    };
                    let zone = Zone::new(
                        zones.len(),
                        UID::from(el.id.as_str()),
                        &el.name,
                        kind,
                        level.z_level,
                        polygon,
                        el.num_people,
                        outputs,
                    );
                    debug!("{zone}");
                    zones.push(zone);
                    num_zones += 1;
                } else {
                    let kind = match el.sign {
                        ElementSign::DoorWay => TransitKind::DoorWay,
                        ElementSign::DoorWayInt => TransitKind::DoorWayInt,
                        _ => TransitKind::DoorWayOut,
                    };
                    transits.push(Transit::new(
                        transits.len(),
                        UID::from(el.id.as_str()),
                        &el.name,
                        kind,
                        level.z_level,
                        polygon,
                        outputs,
                    ));
                    num_transits += 1;
                }
            }

            if num_zones == 0 || num_transits == 0 {
                return Err(EvacError::topology(format!(
                    "Level {} has {} zones and {} transits, both must be non-zero",
                    level.name, num_zones, num_transits
                )));
            }
        }

        let exits: Vec<UID> = transits
            .iter()
            .filter(|t| t.is_exit())
            .map(|t| t.uid.clone())
            .collect();
        zones.push(Zone::outside(zones.len(), exits));

        resolve_widths(&zones, &mut transits)?;

        zones.as_mut_slice().sort_by_id();
        transits.as_mut_slice().sort_by_id();

        let building = Self {
            name: desc.name.clone(),
            zones,
            transits,
        };
        info!(
            "Building \"{}\": {} zones, {} transits, {:.1} m², {:.0} people",
            building.name,
            building.zones.len() - 1,
            building.transits.len(),
            building.area(),
            building.num_of_people()
        );

        Ok(building)
    }

    /// Returns all zones, the outside last.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut [Zone] {
        &mut self.zones
    }

    pub fn transits(&self) -> &[Transit] {
        &self.transits
    }

    pub fn transits_mut(&mut self) -> &mut [Transit] {
        &mut self.transits
    }

    /// Mutable access to zones and transits at the same time.
    pub fn parts_mut(&mut self) -> (&mut [Zone], &mut [Transit]) {
        (&mut self.zones, &mut self.transits)
    }

    pub fn outside(&self) -> &Zone {
        &self.zones[self.zones.len() - 1]
    }

    pub fn zone_index(&self, uid: &UID) -> Option<usize> {
        self.zones.iter().position(|z| &z.uid == uid)
    }

    pub fn transit_index(&self, uid: &UID) -> Option<usize> {
        self.transits.iter().position(|t| &t.uid == uid)
    }

    /// Number of people still inside the building.
    pub fn num_of_people(&self) -> f64 {
        self.zones
            .iter()
            .filter(|z| !z.is_outside())
            .map(|z| z.occupants)
            .sum()
    }

    /// Number of people in all zones, the outside included.
    pub fn total_people(&self) -> f64 {
        self.zones.iter().map(|z| z.occupants).sum()
    }

    /// Floor area of the building (m²).
    pub fn area(&self) -> f64 {
        self.zones
            .iter()
            .filter(|z| !z.is_outside())
            .map(|z| z.area)
            .sum()
    }
}

/// Infers the width of every transit from the zones it joins.
fn resolve_widths(zones: &[Zone], transits: &mut [Transit]) -> Result<()> {
    let by_uid: HashMap<&UID, &Zone> = zones.iter().map(|z| (&z.uid, z)).collect();
    let outside = &zones[zones.len() - 1];

    for transit in transits.iter_mut() {
        let mut adjacent: Vec<&Zone> = Vec::with_capacity(2);
        for uid in transit.outputs.iter() {
            let zone = by_uid.get(uid).copied().ok_or_else(|| {
                EvacError::topology(format!(
                    "Transit {} ({}) refers to unknown zone {}",
                    transit.name, transit.uid, uid
                ))
            })?;
            adjacent.push(zone);
        }
        if transit.is_exit() && adjacent.len() == 1 {
            adjacent.push(outside);
        }
        if adjacent.len() != 2 {
            return Err(EvacError::topology(format!(
                "Transit {} ({}) joins {} zones, expected 2",
                transit.name,
                transit.uid,
                adjacent.len()
            )));
        }

        let side_a = opening_side(adjacent[0]);
        let side_b = opening_side(adjacent[1]);
        transit.width = infer_transit_width(
            &side_a,
            &side_b,
            &transit.polygon,
            transit.kind.opening_kind(),
        )
        .with_context(|| format!("Cannot infer width of transit {} ({})", transit.name, transit.uid))?;
        debug!("{transit}");
    }

    Ok(())
}

fn opening_side(zone: &Zone) -> OpeningSide<'_> {
    OpeningSide {
        polygon: zone.polygon.as_ref(),
        area: zone.area,
        z_level: zone.z_level,
        staircase: zone.is_staircase(),
    }
}
