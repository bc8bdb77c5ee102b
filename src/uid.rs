use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// External identifier of a building element, as found in the building description.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct UID(String);

impl From<&str> for UID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for UID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl UID {
    /// Identifier reserved for the synthetic zone outside the building.
    pub fn nil() -> Self {
        Self(Uuid::nil().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil() {
        assert_eq!(UID::nil().as_str(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_from_and_display() {
        let uid = UID::from("{a1b2}");
        assert_eq!(uid, UID::from("{a1b2}".to_string()));
        assert_eq!(format!("{uid}"), "{a1b2}");
    }
}
