//! Building description: the parsed input shape the building model is built from.
//!
//! Levels hold elements, each element is a room, a staircase or one of the opening
//! variants, with a floor outline and the identifiers of its neighbors.
//! Serde field names follow the JSON building format.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Point;

/// Kind of a building element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementSign {
    Room,
    Staircase,
    /// Opening without a door leaf
    DoorWay,
    /// Internal door between two rooms or a room and a staircase
    DoorWayInt,
    /// Emergency exit leading outside
    DoorWayOut,
    Undefined,
}

impl ElementSign {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Room" => Self::Room,
            "Staircase" => Self::Staircase,
            "DoorWay" => Self::DoorWay,
            "DoorWayInt" => Self::DoorWayInt,
            "DoorWayOut" => Self::DoorWayOut,
            _ => Self::Undefined,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Room => "Room",
            Self::Staircase => "Staircase",
            Self::DoorWay => "DoorWay",
            Self::DoorWayInt => "DoorWayInt",
            Self::DoorWayOut => "DoorWayOut",
            Self::Undefined => "Undefined",
        }
    }

    pub fn is_zone(&self) -> bool {
        matches!(self, Self::Room | Self::Staircase)
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, Self::DoorWay | Self::DoorWayInt | Self::DoorWayOut)
    }
}

impl Serialize for ElementSign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ElementSign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Root of a building description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingDescription {
    #[serde(rename = "NameBuilding")]
    pub name: String,
    #[serde(rename = "Address", default)]
    pub address: Address,
    #[serde(rename = "Level")]
    pub levels: Vec<LevelDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "StreetAddress", default)]
    pub street_address: String,
    #[serde(rename = "AddInfo", default)]
    pub add_info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescription {
    #[serde(rename = "NameLevel")]
    pub name: String,
    /// Elevation of the level above ground (m)
    #[serde(rename = "ZLevel")]
    pub z_level: f64,
    #[serde(rename = "BuildElement")]
    pub elements: Vec<ElementDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDescription {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sign")]
    pub sign: ElementSign,
    /// Height of the element (m)
    #[serde(rename = "SizeZ", default)]
    pub size_z: f64,
    /// Outlines, only the first one is used
    #[serde(rename = "XY")]
    pub outlines: Vec<Outline>,
    /// Identifiers of the adjacent elements
    #[serde(rename = "Output", default)]
    pub outputs: Vec<String>,
    #[serde(rename = "NumPeople", default)]
    pub num_people: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outline {
    pub points: Vec<Point>,
}

impl BuildingDescription {
    pub fn new(name: &str, levels: Vec<LevelDescription>) -> Self {
        Self {
            name: name.to_string(),
            address: Address::default(),
            levels,
        }
    }
}

impl LevelDescription {
    pub fn new(name: &str, z_level: f64, elements: Vec<ElementDescription>) -> Self {
        Self {
            name: name.to_string(),
            z_level,
            elements,
        }
    }
}

impl ElementDescription {
    pub fn new(id: &str, name: &str, sign: ElementSign, points: Vec<Point>, outputs: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sign,
            size_z: 0.,
            outlines: vec![Outline { points }],
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            num_people: 0.,
        }
    }

    /// Sets the initial number of people (rooms only).
    pub fn with_people(mut self, num_people: f64) -> Self {
        self.num_people = num_people;
        self
    }

    /// Vertices of the first outline.
    pub fn points(&self) -> &[Point] {
        self.outlines
            .first()
            .map(|o| o.points.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_tags() {
        for sign in [
            ElementSign::Room,
            ElementSign::Staircase,
            ElementSign::DoorWay,
            ElementSign::DoorWayInt,
            ElementSign::DoorWayOut,
        ] {
            assert_eq!(ElementSign::from_tag(sign.tag()), sign);
        }
        assert_eq!(ElementSign::from_tag("Window"), ElementSign::Undefined);
        assert!(ElementSign::Staircase.is_zone());
        assert!(ElementSign::DoorWayOut.is_transit());
        assert!(!ElementSign::Undefined.is_zone() && !ElementSign::Undefined.is_transit());
    }

    #[test]
    fn test_deserialize_element() -> anyhow::Result<()> {
        let json = r#"{
            "Id": "{e1}",
            "Name": "Room_1",
            "Sign": "Room",
            "SizeZ": 3.0,
            "XY": [{"points": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 1, "y": 1}]}],
            "Output": ["{d1}"],
            "NumPeople": 15
        }"#;
        let element: ElementDescription = serde_json::from_str(json)?;
        assert_eq!(element.sign, ElementSign::Room);
        assert_eq!(element.points().len(), 3);
        assert_eq!(element.outputs, vec!["{d1}".to_string()]);
        assert_eq!(element.num_people, 15.);
        Ok(())
    }

    #[test]
    fn test_unknown_sign_is_undefined() -> anyhow::Result<()> {
        let json = r#"{"Id": "x", "Name": "w", "Sign": "Window", "XY": []}"#;
        let element: ElementDescription = serde_json::from_str(json)?;
        assert_eq!(element.sign, ElementSign::Undefined);
        assert!(element.points().is_empty());
        Ok(())
    }
}
