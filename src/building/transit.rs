//! Transits are the openings people move through between two zones.

use crate::HasId;
use crate::Polygon;
use crate::UID;
use crate::geom::opening::OpeningKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitKind {
    /// Opening without a door leaf
    DoorWay,
    /// Internal door
    DoorWayInt,
    /// Exit to the outside
    DoorWayOut,
}

impl TransitKind {
    /// How the width of this kind of opening is measured.
    pub fn opening_kind(&self) -> OpeningKind {
        match self {
            Self::DoorWay => OpeningKind::Doorway,
            Self::DoorWayInt | Self::DoorWayOut => OpeningKind::Door,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transit {
    pub id: usize,
    pub uid: UID,
    pub name: String,
    pub kind: TransitKind,
    pub z_level: f64,
    pub polygon: Polygon,
    /// Effective width (m), NaN until inferred from the adjacent zones
    pub width: f64,
    /// Identifiers of the adjacent zones
    pub outputs: Vec<UID>,
    pub visited: bool,
    pub blocked: bool,
    /// Number of people who crossed the transit in the current step
    pub people_crossed: f64,
}

impl HasId for Transit {
    fn id(&self) -> usize {
        self.id
    }
}

impl Transit {
    pub fn new(
        id: usize,
        uid: UID,
        name: &str,
        kind: TransitKind,
        z_level: f64,
        polygon: Polygon,
        outputs: Vec<UID>,
    ) -> Self {
        Self {
            id,
            uid,
            name: name.to_string(),
            kind,
            z_level,
            polygon,
            width: f64::NAN,
            outputs,
            visited: false,
            blocked: false,
            people_crossed: 0.,
        }
    }

    pub fn is_exit(&self) -> bool {
        self.kind == TransitKind::DoorWayOut
    }
}

impl fmt::Display for Transit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transit({}, {:?}, \"{}\", width={:.2})",
            self.id, self.kind, self.name, self.width
        )
    }
}
