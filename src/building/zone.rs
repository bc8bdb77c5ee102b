//! Zones are the spaces people occupy: rooms, staircases and the outside.

use crate::HasId;
use crate::Polygon;
use crate::UID;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Room,
    Staircase,
    /// Synthetic sink collecting everybody who left the building
    Outside,
}

#[derive(Debug, Clone)]
pub struct Zone {
    /// Sequential id, also the zone's node index in the adjacency graph
    pub id: usize,
    pub uid: UID,
    pub name: String,
    pub kind: ZoneKind,
    /// Elevation of the zone's level (m)
    pub z_level: f64,
    /// Floor polygon, `None` for the outside
    pub polygon: Option<Polygon>,
    /// Floor area (m²), infinite for the outside
    pub area: f64,
    /// Number of people in the zone
    pub occupants: f64,
    /// Identifiers of the adjacent transits
    pub outputs: Vec<UID>,
    pub visited: bool,
    pub blocked: bool,
    /// Time (min) needed to reach the outside from this zone, infinite until reached
    pub potential: f64,
}

impl HasId for Zone {
    fn id(&self) -> usize {
        self.id
    }
}

impl Zone {
    /// Creates a room or a staircase from its floor polygon.
    pub fn new(
        id: usize,
        uid: UID,
        name: &str,
        kind: ZoneKind,
        z_level: f64,
        polygon: Polygon,
        occupants: f64,
        outputs: Vec<UID>,
    ) -> Self {
        let area = polygon.area();
        Self {
            id,
            uid,
            name: name.to_string(),
            kind,
            z_level,
            polygon: Some(polygon),
            area,
            occupants,
            outputs,
            visited: false,
            blocked: false,
            potential: f64::INFINITY,
        }
    }

    /// Creates the outside zone. It has no floor, an infinite area and is
    /// joined to every exit in `outputs`.
    pub fn outside(id: usize, outputs: Vec<UID>) -> Self {
        Self {
            id,
            uid: UID::nil(),
            name: "Outside".to_string(),
            kind: ZoneKind::Outside,
            z_level: 0.,
            polygon: None,
            area: f64::INFINITY,
            occupants: 0.,
            outputs,
            visited: false,
            blocked: false,
            potential: f64::INFINITY,
        }
    }

    /// People per square meter.
    pub fn density(&self) -> f64 {
        self.occupants / self.area
    }

    pub fn is_outside(&self) -> bool {
        self.kind == ZoneKind::Outside
    }

    pub fn is_staircase(&self) -> bool {
        self.kind == ZoneKind::Staircase
    }

    /// Checks if the zone lists transit `uid` among its outputs.
    pub fn has_output(&self, uid: &UID) -> bool {
        self.outputs.iter().any(|o| o == uid)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zone({}, {:?}, \"{}\", area={:.2}, occupants={:.2})",
            self.id, self.kind, self.name, self.area, self.occupants
        )
    }
}
