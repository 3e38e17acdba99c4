//! Aircraft service status as stored in the catalog.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Substring that places a status in the development bucket.
///
/// Matching is by containment, so "Development/Testing" and any future
/// status mentioning development are counted.
pub const DEVELOPMENT_MARKER: &str = "Development";

/// Service status of an aircraft.
///
/// Known values keep matching cheap and explicit; `Other` keeps any status the
/// dataset introduces verbatim so it still round-trips and displays.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AircraftStatus {
    Active,
    Retired,
    Development,
    DevelopmentTesting,
    Other(String),
}

impl Serialize for AircraftStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AircraftStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_label(&value))
    }
}

impl AircraftStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AircraftStatus::Active => "Active",
            AircraftStatus::Retired => "Retired",
            AircraftStatus::Development => "Development",
            AircraftStatus::DevelopmentTesting => "Development/Testing",
            AircraftStatus::Other(value) => value.as_str(),
        }
    }

    /// Map a catalog status label; unknown labels are kept verbatim.
    pub fn from_label(value: &str) -> Self {
        match value {
            "Active" => AircraftStatus::Active,
            "Retired" => AircraftStatus::Retired,
            "Development" => AircraftStatus::Development,
            "Development/Testing" => AircraftStatus::DevelopmentTesting,
            other => AircraftStatus::Other(other.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AircraftStatus::Active)
    }

    pub fn is_retired(&self) -> bool {
        matches!(self, AircraftStatus::Retired)
    }

    /// Development bucket membership; see [`DEVELOPMENT_MARKER`].
    pub fn is_development(&self) -> bool {
        self.as_str().contains(DEVELOPMENT_MARKER)
    }
}

impl std::fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
